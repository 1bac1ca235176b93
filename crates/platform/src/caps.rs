//! CPU capability representation.
//!
//! [`Caps`] is a 128-bit bitset representing available CPU features. Each bit
//! corresponds to a specific ISA extension. The bits are architecture-specific
//! but the API is uniform across all targets.
//!
//! # Bit Layout
//!
//! - Bits 0-63: x86/x86_64 features
//! - Bits 64-127: aarch64 features
//!
//! A capability set detected on one architecture never has bits from another
//! architecture's range, so requirement checks degrade to "not satisfied"
//! rather than misfiring across targets.

/// CPU capabilities: a 128-bit feature bitset.
///
/// This is the core type for capability-based dispatch. Use [`has()`](Caps::has)
/// to check if required features are available.
///
/// # Thread Safety
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 2]);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self([0; 2]);

  /// Capability set with a single bit set.
  #[inline]
  #[must_use]
  pub(crate) const fn bit(n: u32) -> Self {
    if n < 64 {
      Self([1u64 << n, 0])
    } else {
      Self([0, 1u64 << (n - 64)])
    }
  }

  /// Create a capability set from raw words.
  ///
  /// Primarily useful for testing and fuzzing; normal usage should prefer
  /// the predefined constants.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 2]) -> Self {
    Self(words)
  }

  /// Check if all features in `required` are present.
  ///
  /// This is the core dispatch check, marked `#[inline(always)]` for zero overhead.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0[0] & required.0[0]) == required.0[0] && (self.0[1] & required.0[1]) == required.0[1]
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self([self.0[0] | other.0[0], self.0[1] | other.0[1]])
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0[0] == 0 && self.0[1] == 0
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Caps({:#018x}, {:#018x})", self.0[0], self.0[1])
  }
}

/// x86/x86_64 feature bits.
pub mod x86 {
  use super::Caps;

  pub const SSSE3: Caps = Caps::bit(0);
  pub const SSE41: Caps = Caps::bit(1);
  pub const SSE42: Caps = Caps::bit(2);
  /// AVX with OS register-save enablement already verified by detection.
  pub const AVX: Caps = Caps::bit(3);
  pub const AVX2: Caps = Caps::bit(4);
  /// SHA extensions (`sha256rnds2` and friends).
  pub const SHA: Caps = Caps::bit(5);

  /// SHA-NI-ready: the SHA extensions plus the shuffle/blend support the
  /// kernels lean on.
  pub const SHANI_READY: Caps = Caps([SHA.0[0] | SSSE3.0[0] | SSE41.0[0], 0]);

  /// 4-lane batch-ready.
  pub const WIDE4_READY: Caps = Caps([SSE41.0[0], 0]);

  /// 8-lane batch-ready (AVX2 implies OS enablement at detection time).
  pub const WIDE8_READY: Caps = Caps([AVX2.0[0] | AVX.0[0], 0]);
}

/// aarch64 feature bits.
pub mod aarch64 {
  use super::Caps;

  /// Baseline on AArch64, still probed explicitly for uniformity.
  pub const NEON: Caps = Caps::bit(64);
  /// ARMv8 SHA2 crypto extensions (`sha256h`, `sha256su0`, ...).
  pub const SHA2: Caps = Caps::bit(65);

  /// SHA2-extension-ready.
  pub const SHA2_READY: Caps = Caps([0, NEON.0[1] | SHA2.0[1]]);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn has_requires_all_bits() {
    let c = x86::SHA | x86::SSSE3;
    assert!(c.has(x86::SHA));
    assert!(c.has(x86::SSSE3));
    assert!(!c.has(x86::SHANI_READY)); // SSE41 missing
    assert!((c | x86::SSE41).has(x86::SHANI_READY));
  }

  #[test]
  fn none_is_subset_of_everything() {
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(x86::AVX2.has(Caps::NONE));
    assert!(!Caps::NONE.has(x86::AVX2));
  }

  #[test]
  fn arch_ranges_do_not_overlap() {
    let x = x86::SHANI_READY | x86::WIDE8_READY | x86::SSE42;
    let a = aarch64::SHA2_READY;
    assert_eq!(x.0[1], 0);
    assert_eq!(a.0[0], 0);
  }

  #[test]
  fn ready_masks_contain_expected_features() {
    assert!(x86::SHANI_READY.has(x86::SHA));
    assert!(x86::SHANI_READY.has(x86::SSSE3));
    assert!(x86::SHANI_READY.has(x86::SSE41));
    assert!(x86::WIDE8_READY.has(x86::AVX2));
    assert!(aarch64::SHA2_READY.has(aarch64::SHA2));
    assert!(aarch64::SHA2_READY.has(aarch64::NEON));
  }
}
