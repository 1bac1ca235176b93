//! CPU detection and capabilities for fastsha.
//!
//! This crate is the single source of truth for CPU feature detection across
//! the fastsha workspace. It answers the question: "What instructions can I
//! legally run on this machine?"
//!
//! # Main Entry Point
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//! if caps.has(x86::SHANI_READY) {
//!     // Use the SHA-NI kernels
//! }
//! ```
//!
//! # Design
//!
//! 1. **One API**: Algorithm crates query [`caps()`] instead of doing ad-hoc detection.
//! 2. **Zero-cost when possible**: Compile-time features are detected via `cfg!`.
//! 3. **Cached otherwise**: Runtime detection runs once and is cached in a `OnceLock`.
//! 4. **OS enablement included**: The standard library's feature macros already
//!    account for OS register-save state (XSAVE) when reporting AVX features;
//!    this crate consumes that as an opaque boolean.
//! 5. **Miri-safe**: Under Miri, always returns portable-only caps.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::Caps;

/// Get detected CPU capabilities.
///
/// This is the main entry point for capability-based dispatch.
///
/// # Caching
///
/// - With `std`: runtime detection runs once and is cached in a `OnceLock`.
/// - Without `std`: only compile-time target features are reported (cheap
///   enough to recompute per call).
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override value instead of detecting.
/// Intended for tests (forcing the portable path) and for embedders that know
/// their deployment hardware. Call before anything caches a kernel selection;
/// consumers that have already resolved their dispatch tables will not
/// re-resolve.
#[cfg(feature = "std")]
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[cfg(feature = "std")]
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}
