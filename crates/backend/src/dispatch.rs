//! Kernel dispatch: capability-gated selection.
//!
//! - [`Candidate`]: a kernel with capability requirements
//! - [`Selected`]: the result of kernel selection
//! - [`select`]: choose the best kernel from an ordered candidate list
//!
//! # Usage
//!
//! Algorithm crates register kernels as an ordered list of `Candidate`s,
//! fastest first:
//!
//! ```ignore
//! use backend::dispatch::{Candidate, Selected, select};
//! use platform::{Caps, caps::x86};
//!
//! fn select_compress() -> Selected<fn(&mut [u32; 8], &[u8])> {
//!     let caps = platform::caps();
//!     select(caps, &[
//!         Candidate::new("shani", x86::SHANI_READY, compress_shani),
//!         Candidate::new("portable", Caps::NONE, compress_portable),
//!     ])
//! }
//! ```

use platform::Caps;

/// A candidate kernel with capability requirements.
///
/// Candidates are ordered from best to worst. The dispatcher selects the
/// first candidate whose requirements are satisfied by the detected capabilities.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "shani").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The kernel function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Human-readable name of the selected kernel.
  pub name: &'static str,
  /// The selected kernel function.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the best kernel from a candidate list.
///
/// Returns the first candidate whose `requires` is satisfied by `caps`.
///
/// # Panics
///
/// Panics if no candidate matches. The last candidate should always have
/// `requires = Caps::NONE` as a portable fallback.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  for candidate in candidates {
    if caps.has(candidate.requires) {
      return Selected::new(candidate.name, candidate.func);
    }
  }

  panic!("no matching kernel; candidate list must include a portable fallback");
}

/// Select the best kernel, or `None` when no requirement is met.
///
/// Used for optional backends (batch widths) that have no portable fallback.
#[inline]
#[must_use]
pub fn select_optional<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Option<Selected<F>> {
  candidates
    .iter()
    .find(|candidate| caps.has(candidate.requires))
    .map(|candidate| Selected::new(candidate.name, candidate.func))
}

#[cfg(test)]
mod tests {
  use platform::caps::x86;

  use super::*;

  type DemoFn = fn(u32) -> u32;

  fn portable(x: u32) -> u32 {
    x
  }

  fn fast(x: u32) -> u32 {
    x.wrapping_mul(2)
  }

  #[test]
  fn select_portable_fallback() {
    let candidates: &[Candidate<DemoFn>] = &[
      Candidate::new("fast", x86::AVX2, fast),
      Candidate::new("portable", Caps::NONE, portable),
    ];

    let selected = select(Caps::NONE, candidates);
    assert_eq!(selected.name, "portable");
    assert_eq!((selected.func)(3), 3);
  }

  #[test]
  fn select_best_match() {
    let candidates: &[Candidate<DemoFn>] = &[
      Candidate::new("fast", x86::AVX2, fast),
      Candidate::new("portable", Caps::NONE, portable),
    ];

    let selected = select(x86::AVX2 | x86::SSE41, candidates);
    assert_eq!(selected.name, "fast");
    assert_eq!((selected.func)(3), 6);
  }

  #[test]
  fn select_skips_unavailable() {
    let candidates: &[Candidate<DemoFn>] = &[
      Candidate::new("needs_avx2", x86::AVX2, fast),
      Candidate::new("needs_sse41", x86::SSE41, fast),
      Candidate::new("portable", Caps::NONE, portable),
    ];

    let selected = select(x86::SSE41, candidates);
    assert_eq!(selected.name, "needs_sse41");
  }

  #[test]
  fn select_optional_returns_none_without_match() {
    let candidates: &[Candidate<DemoFn>] = &[Candidate::new("needs_avx2", x86::AVX2, fast)];

    assert!(select_optional(Caps::NONE, candidates).is_none());
    assert!(select_optional(x86::AVX2, candidates).is_some());
  }

  #[test]
  #[should_panic(expected = "no matching kernel")]
  fn select_panics_on_empty_list() {
    let candidates: &[Candidate<DemoFn>] = &[];
    let _ = select(Caps::NONE, candidates);
  }
}
