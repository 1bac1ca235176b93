//! SHA-256 kernel registry.
//!
//! Two kernel families exist:
//!
//! - compression kernels (`CompressBlocksFn`): the 64-round compression
//!   function over whole 64-byte blocks, state updated cumulatively;
//! - double-hash kernels (`TransformD64Fn`): SHA256D over `width` independent
//!   64-byte messages per call, lanes fully independent.
//!
//! Every kernel is a stateless pure function; identity, capability
//! requirement, and batch width live here so the dispatcher and the
//! known-answer tests share one source of truth.

use backend::dispatch::Candidate;
use platform::Caps;

use super::{Sha256, d64};

pub type CompressBlocksFn = fn(&mut [u32; 8], &[u8]);
pub type TransformD64Fn = fn(&mut [u8], &[u8]);

// ─────────────────────────────────────────────────────────────────────────────
// Compression kernels
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Sha256KernelId {
  Portable = 0,
  #[cfg(target_arch = "x86_64")]
  X86Shani = 1,
  #[cfg(target_arch = "aarch64")]
  Aarch64Sha2 = 2,
}

pub const ALL: &[Sha256KernelId] = &[
  Sha256KernelId::Portable,
  #[cfg(target_arch = "x86_64")]
  Sha256KernelId::X86Shani,
  #[cfg(target_arch = "aarch64")]
  Sha256KernelId::Aarch64Sha2,
];

impl Sha256KernelId {
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      #[cfg(target_arch = "x86_64")]
      Self::X86Shani => "shani",
      #[cfg(target_arch = "aarch64")]
      Self::Aarch64Sha2 => "armv8",
    }
  }
}

#[inline]
#[must_use]
pub const fn required_caps(id: Sha256KernelId) -> Caps {
  match id {
    Sha256KernelId::Portable => Caps::NONE,
    #[cfg(target_arch = "x86_64")]
    Sha256KernelId::X86Shani => platform::caps::x86::SHANI_READY,
    #[cfg(target_arch = "aarch64")]
    Sha256KernelId::Aarch64Sha2 => platform::caps::aarch64::SHA2_READY,
  }
}

#[must_use]
pub fn compress_blocks_fn(id: Sha256KernelId) -> CompressBlocksFn {
  match id {
    Sha256KernelId::Portable => Sha256::compress_blocks_portable,
    #[cfg(target_arch = "x86_64")]
    Sha256KernelId::X86Shani => super::x86_64::compress_blocks_shani,
    #[cfg(target_arch = "aarch64")]
    Sha256KernelId::Aarch64Sha2 => super::aarch64::compress_blocks_armv8,
  }
}

/// Compression candidates, fastest first, portable fallback last.
pub(crate) const COMPRESS_CANDIDATES: &[Candidate<CompressBlocksFn>] = &[
  #[cfg(target_arch = "x86_64")]
  Candidate::new("shani", platform::caps::x86::SHANI_READY, super::x86_64::compress_blocks_shani),
  #[cfg(target_arch = "aarch64")]
  Candidate::new(
    "armv8",
    platform::caps::aarch64::SHA2_READY,
    super::aarch64::compress_blocks_armv8,
  ),
  Candidate::new("portable", Caps::NONE, Sha256::compress_blocks_portable),
];

// ─────────────────────────────────────────────────────────────────────────────
// Double-hash kernels
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Sha256d64KernelId {
  Portable = 0,
  #[cfg(target_arch = "x86_64")]
  X86Shani = 1,
  #[cfg(target_arch = "x86_64")]
  X86Shani2Way = 2,
  #[cfg(target_arch = "x86_64")]
  X86Sse41x4 = 3,
  #[cfg(target_arch = "x86_64")]
  X86Avx2x8 = 4,
  #[cfg(target_arch = "aarch64")]
  Aarch64Sha2 = 5,
}

pub const D64_ALL: &[Sha256d64KernelId] = &[
  Sha256d64KernelId::Portable,
  #[cfg(target_arch = "x86_64")]
  Sha256d64KernelId::X86Shani,
  #[cfg(target_arch = "x86_64")]
  Sha256d64KernelId::X86Shani2Way,
  #[cfg(target_arch = "x86_64")]
  Sha256d64KernelId::X86Sse41x4,
  #[cfg(target_arch = "x86_64")]
  Sha256d64KernelId::X86Avx2x8,
  #[cfg(target_arch = "aarch64")]
  Sha256d64KernelId::Aarch64Sha2,
];

impl Sha256d64KernelId {
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      #[cfg(target_arch = "x86_64")]
      Self::X86Shani | Self::X86Shani2Way => "shani",
      #[cfg(target_arch = "x86_64")]
      Self::X86Sse41x4 => "sse41",
      #[cfg(target_arch = "x86_64")]
      Self::X86Avx2x8 => "avx2",
      #[cfg(target_arch = "aarch64")]
      Self::Aarch64Sha2 => "armv8",
    }
  }

  /// Independent messages hashed per call.
  #[inline]
  #[must_use]
  pub const fn width(self) -> usize {
    match self {
      Self::Portable => 1,
      #[cfg(target_arch = "x86_64")]
      Self::X86Shani => 1,
      #[cfg(target_arch = "x86_64")]
      Self::X86Shani2Way => 2,
      #[cfg(target_arch = "x86_64")]
      Self::X86Sse41x4 => 4,
      #[cfg(target_arch = "x86_64")]
      Self::X86Avx2x8 => 8,
      #[cfg(target_arch = "aarch64")]
      Self::Aarch64Sha2 => 1,
    }
  }
}

#[inline]
#[must_use]
pub const fn d64_required_caps(id: Sha256d64KernelId) -> Caps {
  match id {
    Sha256d64KernelId::Portable => Caps::NONE,
    #[cfg(target_arch = "x86_64")]
    Sha256d64KernelId::X86Shani | Sha256d64KernelId::X86Shani2Way => platform::caps::x86::SHANI_READY,
    #[cfg(target_arch = "x86_64")]
    Sha256d64KernelId::X86Sse41x4 => platform::caps::x86::WIDE4_READY,
    #[cfg(target_arch = "x86_64")]
    Sha256d64KernelId::X86Avx2x8 => platform::caps::x86::WIDE8_READY,
    #[cfg(target_arch = "aarch64")]
    Sha256d64KernelId::Aarch64Sha2 => platform::caps::aarch64::SHA2_READY,
  }
}

#[must_use]
pub fn d64_fn(id: Sha256d64KernelId) -> TransformD64Fn {
  match id {
    Sha256d64KernelId::Portable => d64::transform_d64_portable,
    #[cfg(target_arch = "x86_64")]
    Sha256d64KernelId::X86Shani => super::x86_64::transform_d64_shani,
    #[cfg(target_arch = "x86_64")]
    Sha256d64KernelId::X86Shani2Way => super::x86_64::transform_d64_shani_2way,
    #[cfg(target_arch = "x86_64")]
    Sha256d64KernelId::X86Sse41x4 => super::x86_64::sse41::transform_d64_4way,
    #[cfg(target_arch = "x86_64")]
    Sha256d64KernelId::X86Avx2x8 => super::x86_64::avx2::transform_d64_8way,
    #[cfg(target_arch = "aarch64")]
    Sha256d64KernelId::Aarch64Sha2 => super::aarch64::transform_d64_armv8,
  }
}

/// Width-1 double-hash candidates.
pub(crate) const D64_CANDIDATES: &[Candidate<TransformD64Fn>] = &[
  #[cfg(target_arch = "x86_64")]
  Candidate::new(
    "shani",
    platform::caps::x86::SHANI_READY,
    super::x86_64::transform_d64_shani,
  ),
  #[cfg(target_arch = "aarch64")]
  Candidate::new(
    "armv8",
    platform::caps::aarch64::SHA2_READY,
    super::aarch64::transform_d64_armv8,
  ),
  Candidate::new("portable", Caps::NONE, d64::transform_d64_portable),
];

/// 2-lane double-hash candidates (no portable fallback; optional backend).
pub(crate) const D64_2WAY_CANDIDATES: &[Candidate<TransformD64Fn>] = &[
  #[cfg(target_arch = "x86_64")]
  Candidate::new(
    "shani",
    platform::caps::x86::SHANI_READY,
    super::x86_64::transform_d64_shani_2way,
  ),
];

/// 4-lane double-hash candidates.
pub(crate) const D64_4WAY_CANDIDATES: &[Candidate<TransformD64Fn>] = &[
  #[cfg(target_arch = "x86_64")]
  Candidate::new(
    "sse41",
    platform::caps::x86::WIDE4_READY,
    super::x86_64::sse41::transform_d64_4way,
  ),
];

/// 8-lane double-hash candidates.
pub(crate) const D64_8WAY_CANDIDATES: &[Candidate<TransformD64Fn>] = &[
  #[cfg(target_arch = "x86_64")]
  Candidate::new(
    "avx2",
    platform::caps::x86::WIDE8_READY,
    super::x86_64::avx2::transform_d64_8way,
  ),
];
