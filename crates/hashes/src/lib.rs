//! Capability-dispatched SHA-256 and SHA256D.
//!
//! This crate implements SHA-256 with interchangeable computational backends.
//! The portable scalar core works everywhere; accelerated kernels (x86 SHA
//! extensions, ARMv8 SHA2 extensions, SSE4.1/AVX2 multi-lane double-hash) are
//! selected once per process by capability probing and validated against a
//! known-answer self-test before they are trusted.
//!
//! # Modules
//!
//! - [`crypto`] - The SHA-256 hasher, batch double-hash driver, and dispatcher.
//!
//! # Fallibility Discipline
//!
//! `unwrap`, `expect`, and panicking indexing are denied in non-test code;
//! block-math-heavy files opt back in with a file-level allow where fixed-size
//! arrays make indexing the clearest idiom.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod crypto;

mod util;

pub use crypto::{BackendSummary, Sha256, auto_detect, sha256_d64, verify_sha256_kernels};
pub use traits::Digest;
