//! Double-SHA256 of one fixed 64-byte block.
//!
//! The input shape is fixed, so both padding blocks are compile-time
//! constants:
//!
//! - hash 1 processes the 64 data bytes, then a constant padding block
//!   carrying the 0x80 terminator and the 512-bit message length;
//! - hash 2 processes one block holding the 32 intermediate digest bytes,
//!   its own 0x80 terminator, and the 256-bit length.
//!
//! The composition below runs over any compression kernel, which is how
//! architectures without a fused double-hash kernel (and the portable build)
//! provide their width-1 backend.

#![allow(clippy::indexing_slicing)] // Fixed-size padding layout

use super::{BLOCK_LEN, H0, Sha256, kernels::CompressBlocksFn, state_to_bytes};

/// Padding block for a 64-byte message: terminator plus 512-bit length.
pub(crate) const PADDING_ONE_BLOCK: [u8; BLOCK_LEN] = {
  let mut block = [0u8; BLOCK_LEN];
  block[0] = 0x80;
  block[62] = 0x02;
  block
};

/// Second-hash block tail: terminator at byte 32, 256-bit length.
const DIGEST_BLOCK_TEMPLATE: [u8; BLOCK_LEN] = {
  let mut block = [0u8; BLOCK_LEN];
  block[32] = 0x80;
  block[62] = 0x01;
  block
};

/// SHA256D over one 64-byte block via two compression passes per hash.
#[inline]
pub(crate) fn transform_d64_via(compress: CompressBlocksFn, out: &mut [u8], input: &[u8]) {
  debug_assert_eq!(input.len(), BLOCK_LEN);
  debug_assert_eq!(out.len(), 32);

  let mut state = H0;
  compress(&mut state, input);
  compress(&mut state, &PADDING_ONE_BLOCK);

  let mut block = DIGEST_BLOCK_TEMPLATE;
  block[..32].copy_from_slice(&state_to_bytes(&state));

  let mut state = H0;
  compress(&mut state, &block);
  out.copy_from_slice(&state_to_bytes(&state));
}

/// Width-1 portable SHA256D kernel.
pub(crate) fn transform_d64_portable(out: &mut [u8], input: &[u8]) {
  transform_d64_via(Sha256::compress_blocks_portable, out, input);
}
