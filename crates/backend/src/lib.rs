//! Backend crate: dispatch primitives for fastsha.
//!
//! This crate provides the foundation for the fastsha acceleration subsystem:
//!
//! - **Dispatch**: capability-gated kernel selection over ordered candidate lists
//! - **Caching**: compute-once-publish-many lazy cells (`OnceCache`)
//! - **Capabilities**: re-exports from `platform` for convenience
//!
//! # Architecture
//!
//! Algorithm crates register kernels as an ordered list of [`dispatch::Candidate`]s,
//! best first. [`dispatch::select`] picks the first candidate whose capability
//! requirement is satisfied by the detected [`platform::Caps`]. The selected
//! table is cached in a [`OnceCache`] so concurrent first callers never observe
//! a partially-populated table: the initializer runs once and the published
//! value is immutable thereafter.
//!
//! Validation of a selected table (known-answer self-tests) is the algorithm
//! crate's responsibility and must happen inside the cache initializer, before
//! the table becomes observable.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod dispatch;

pub use cache::OnceCache;
// Re-export platform types for convenience.
pub use platform;
