//! Backend selection, validation, and the batch double-hash driver.
//!
//! The active backend table is computed exactly once per process: capability
//! probing picks the fastest eligible kernel for each role, the known-answer
//! self-test validates the whole table, and only then is it published through
//! a [`OnceCache`]. Concurrent first callers either run the initializer or
//! wait for the published value; nobody observes a partial table. Repeated
//! calls (and repeated [`auto_detect`]) are no-ops returning the cached
//! selection.
//!
//! A self-test failure is fatal by design: an accelerated kernel that was
//! capability-detected but produces wrong output must never be used, and
//! silently falling back would hide a serious platform or implementation bug.

#![allow(clippy::indexing_slicing)] // Block-sized slicing after explicit length asserts

use backend::OnceCache;
use backend::dispatch::{Selected, select, select_optional};
use platform::Caps;

use super::kernel_test;
use super::kernels::{
  COMPRESS_CANDIDATES, CompressBlocksFn, D64_2WAY_CANDIDATES, D64_4WAY_CANDIDATES, D64_8WAY_CANDIDATES,
  D64_CANDIDATES, TransformD64Fn,
};
use super::BLOCK_LEN;

/// The process-wide backend table.
///
/// Populated once during dispatch, read-only thereafter. Invariant: every
/// function in here has passed the known-answer self-test.
#[derive(Clone, Copy)]
pub(crate) struct ActiveBackends {
  pub(crate) compress: Selected<CompressBlocksFn>,
  pub(crate) d64: Selected<TransformD64Fn>,
  pub(crate) d64_2way: Option<Selected<TransformD64Fn>>,
  pub(crate) d64_4way: Option<Selected<TransformD64Fn>>,
  pub(crate) d64_8way: Option<Selected<TransformD64Fn>>,
}

static ACTIVE: OnceCache<ActiveBackends> = OnceCache::new();

/// Resolve the backend table for a given capability set, without validation.
pub(crate) fn select_backends(caps: Caps) -> ActiveBackends {
  let compress = select(caps, COMPRESS_CANDIDATES);
  let d64 = select(caps, D64_CANDIDATES);
  let d64_2way = select_optional(caps, D64_2WAY_CANDIDATES);

  // A dedicated hash-instruction core outruns the generic wide-register
  // kernels on the same parts, and its interleaved 2-way covers batching;
  // the 4/8-way kernels stay uninstalled in that configuration.
  let dedicated = caps.has(platform::caps::x86::SHANI_READY);
  let (d64_4way, d64_8way) = if dedicated {
    (None, None)
  } else {
    (
      select_optional(caps, D64_4WAY_CANDIDATES),
      select_optional(caps, D64_8WAY_CANDIDATES),
    )
  };

  ActiveBackends {
    compress,
    d64,
    d64_2way,
    d64_4way,
    d64_8way,
  }
}

/// The validated, published backend table.
///
/// # Panics
///
/// Panics if any selected backend fails the known-answer self-test.
pub(crate) fn active() -> ActiveBackends {
  ACTIVE.get_or_init(|| {
    let table = select_backends(platform::caps());
    if let Err(failure) = kernel_test::verify(&table) {
      panic!("sha256 backend self-test failed: {failure}; refusing to publish untrusted kernels");
    }
    table
  })
}

/// Summary of the selected backends, for logs and diagnostics.
///
/// The `Display` form looks like `"shani(1way),shani(2way)"` or
/// `"portable(1way),sse41(4way),avx2(8way)"`. It is not a stable
/// machine-readable contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackendSummary {
  compress: &'static str,
  wide: [Option<(&'static str, usize)>; 3],
}

impl core::fmt::Display for BackendSummary {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "{}(1way)", self.compress)?;
    for &(name, width) in self.wide.iter().flatten() {
      write!(f, ",{name}({width}way)")?;
    }
    Ok(())
  }
}

/// Probe, validate, and publish the backend table, returning the summary.
///
/// Idempotent: the first call performs selection and self-test, later calls
/// return the cached result.
///
/// # Panics
///
/// Panics if a selected backend fails the known-answer self-test.
#[must_use]
pub fn auto_detect() -> BackendSummary {
  let table = active();
  BackendSummary {
    compress: table.compress.name,
    wide: [
      table.d64_2way.map(|kernel| (kernel.name, 2)),
      table.d64_4way.map(|kernel| (kernel.name, 4)),
      table.d64_8way.map(|kernel| (kernel.name, 8)),
    ],
  }
}

/// Double-SHA256 of `blocks` concatenated 64-byte messages.
///
/// `input` holds `blocks` messages of exactly 64 bytes each; `out` receives
/// `blocks` digests of 32 bytes each, in matching order. The widest installed
/// batch kernel is drained first, then narrower ones, then the width-1
/// kernel, minimizing transform invocations.
///
/// # Panics
///
/// Panics if `input` or `out` does not match `blocks` exactly. Undersized
/// buffers are a programming-contract violation; truncating a hash output
/// silently would be a security bug.
pub fn sha256_d64(out: &mut [u8], input: &[u8], blocks: usize) {
  assert_eq!(
    input.len(),
    blocks * BLOCK_LEN,
    "input must hold exactly `blocks` 64-byte messages"
  );
  assert_eq!(out.len(), blocks * 32, "output must hold exactly `blocks` 32-byte digests");

  let table = active();
  let mut input = input;
  let mut out = out;
  let mut remaining = blocks;

  if let Some(kernel) = table.d64_8way {
    while remaining >= 8 {
      let (chunk, rest) = core::mem::take(&mut out).split_at_mut(8 * 32);
      (kernel.func)(chunk, &input[..8 * BLOCK_LEN]);
      out = rest;
      input = &input[8 * BLOCK_LEN..];
      remaining -= 8;
    }
  }
  if let Some(kernel) = table.d64_4way {
    while remaining >= 4 {
      let (chunk, rest) = core::mem::take(&mut out).split_at_mut(4 * 32);
      (kernel.func)(chunk, &input[..4 * BLOCK_LEN]);
      out = rest;
      input = &input[4 * BLOCK_LEN..];
      remaining -= 4;
    }
  }
  if let Some(kernel) = table.d64_2way {
    while remaining >= 2 {
      let (chunk, rest) = core::mem::take(&mut out).split_at_mut(2 * 32);
      (kernel.func)(chunk, &input[..2 * BLOCK_LEN]);
      out = rest;
      input = &input[2 * BLOCK_LEN..];
      remaining -= 2;
    }
  }
  while remaining > 0 {
    let (chunk, rest) = core::mem::take(&mut out).split_at_mut(32);
    (table.d64.func)(chunk, &input[..BLOCK_LEN]);
    out = rest;
    input = &input[BLOCK_LEN..];
    remaining -= 1;
  }
}
