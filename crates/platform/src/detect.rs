//! Runtime CPU detection.
//!
//! This module provides the `caps()` implementation behind the crate root:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via the standard library's feature macros, `std` only)
//! - Caching (`OnceLock` under `std`)
//! - User-supplied overrides for testing and known-hardware deployments
//! - Miri fallback (always portable)
//!
//! Runtime detection strictly widens the compile-time set: a feature the
//! binary was compiled to assume is always reported.

use crate::caps::Caps;

#[cfg(feature = "std")]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "std")]
static HAS_OVERRIDE: AtomicBool = AtomicBool::new(false);

#[cfg(feature = "std")]
static OVERRIDE: std::sync::Mutex<Option<Caps>> = std::sync::Mutex::new(None);

#[cfg(feature = "std")]
static DETECTED: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();

/// Capabilities guaranteed by the compilation target.
#[inline]
#[must_use]
#[allow(unused_mut)]
fn compile_time() -> Caps {
  let mut caps = Caps::NONE;

  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;
    if cfg!(target_feature = "ssse3") {
      caps = caps | x86::SSSE3;
    }
    if cfg!(target_feature = "sse4.1") {
      caps = caps | x86::SSE41;
    }
    if cfg!(target_feature = "sse4.2") {
      caps = caps | x86::SSE42;
    }
    if cfg!(target_feature = "avx") {
      caps = caps | x86::AVX;
    }
    if cfg!(target_feature = "avx2") {
      caps = caps | x86::AVX2;
    }
    if cfg!(target_feature = "sha") {
      caps = caps | x86::SHA;
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;
    if cfg!(target_feature = "neon") {
      caps = caps | aarch64::NEON;
    }
    if cfg!(target_feature = "sha2") {
      caps = caps | aarch64::SHA2;
    }
  }

  caps
}

/// Full detection: compile-time features widened by runtime probing.
#[cfg(all(feature = "std", not(miri)))]
#[must_use]
#[allow(unused_mut)]
fn detect() -> Caps {
  let mut caps = compile_time();

  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;
    if std::arch::is_x86_feature_detected!("ssse3") {
      caps = caps | x86::SSSE3;
    }
    if std::arch::is_x86_feature_detected!("sse4.1") {
      caps = caps | x86::SSE41;
    }
    if std::arch::is_x86_feature_detected!("sse4.2") {
      caps = caps | x86::SSE42;
    }
    // The avx/avx2 macros only report true when the OS has enabled the
    // extended register state, so no separate XGETBV check is needed here.
    if std::arch::is_x86_feature_detected!("avx") {
      caps = caps | x86::AVX;
    }
    if std::arch::is_x86_feature_detected!("avx2") {
      caps = caps | x86::AVX2;
    }
    if std::arch::is_x86_feature_detected!("sha") {
      caps = caps | x86::SHA;
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;
    if std::arch::is_aarch64_feature_detected!("neon") {
      caps = caps | aarch64::NEON;
    }
    if std::arch::is_aarch64_feature_detected!("sha2") {
      caps = caps | aarch64::SHA2;
    }
  }

  caps
}

#[cfg(all(feature = "std", miri))]
#[must_use]
fn detect() -> Caps {
  // Miri cannot interpret SIMD intrinsics; report portable-only.
  Caps::NONE
}

#[inline]
#[must_use]
pub(crate) fn caps() -> Caps {
  #[cfg(feature = "std")]
  {
    if HAS_OVERRIDE.load(Ordering::Acquire) {
      if let Ok(guard) = OVERRIDE.lock() {
        if let Some(value) = *guard {
          return value;
        }
      }
    }
    *DETECTED.get_or_init(detect)
  }

  #[cfg(not(feature = "std"))]
  {
    compile_time()
  }
}

#[cfg(feature = "std")]
pub(crate) fn set_caps_override(value: Option<Caps>) {
  if let Ok(mut guard) = OVERRIDE.lock() {
    *guard = value;
    HAS_OVERRIDE.store(value.is_some(), Ordering::Release);
  }
}

#[cfg(feature = "std")]
#[inline]
#[must_use]
pub(crate) fn has_override() -> bool {
  HAS_OVERRIDE.load(Ordering::Acquire)
}
