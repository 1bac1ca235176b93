//! Cryptographic hash functions.

pub mod sha256;

pub use sha256::Sha256;
pub use sha256::dispatch::{BackendSummary, auto_detect, sha256_d64};
pub use sha256::kernel_test::verify_sha256_kernels;
