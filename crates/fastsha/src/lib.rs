//! fastsha: capability-dispatched SHA-256 and SHA256D.
//!
//! This facade re-exports the public surface of the workspace:
//!
//! - [`Sha256`] - streaming hasher implementing [`Digest`]
//! - [`sha256_d64`] - batch double-SHA256 over concatenated 64-byte messages
//! - [`auto_detect`] - probe, self-test, and report the selected backends
//! - [`platform`] - capability detection, for embedders and tests
//!
//! # Example
//!
//! ```
//! use fastsha::{Digest as _, Sha256};
//!
//! // One-time diagnostics; dispatch itself is lazy and cached.
//! let backends = fastsha::auto_detect();
//! let _ = backends;
//!
//! let mut h = Sha256::new();
//! h.update(b"hello ");
//! h.update(b"world");
//! let digest = h.finalize();
//! assert_eq!(digest, Sha256::digest(b"hello world"));
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub use hashes::{BackendSummary, Sha256, auto_detect, sha256_d64, verify_sha256_kernels};
// Re-export platform for capability introspection and overrides.
pub use platform;
pub use traits::Digest;

#[cfg(test)]
mod tests {
  use std::format;

  use super::Sha256;

  #[test]
  fn facade_round_trip() {
    let summary = super::auto_detect();
    // Every platform reports at least a width-1 backend.
    assert!(!format!("{summary}").is_empty());

    let digest = Sha256::digest(b"abc");
    let mut out = [0u8; 32];
    let block = [0u8; 64];
    super::sha256_d64(&mut out, &block, 1);
    assert_ne!(digest, out);
  }
}
