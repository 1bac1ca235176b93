//! SHA-256 aarch64 kernel using the ARMv8 SHA2 extensions.
//!
//! The double hash on this architecture goes through the generic two-call
//! composition over this compression kernel. A fused in-register double-hash
//! variant would skip the state stores between passes, but no verified
//! implementation exists yet; the composition is the correctness-preserving
//! baseline.
//!
//! # Safety
//!
//! The `unsafe fn`s here require the `sha2` target feature. The safe wrappers
//! are only installed after `aarch64::SHA2_READY` has been detected, and the
//! known-answer self-test re-validates the pairing before publication.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::inline_always)]
#![allow(clippy::undocumented_unsafe_blocks)]

use core::arch::aarch64::*;

use super::{BLOCK_LEN, K, d64};

#[target_feature(enable = "sha2")]
unsafe fn compress_blocks_impl(state: &mut [u32; 8], blocks: &[u8]) {
  let (chunks, rest) = blocks.as_chunks::<BLOCK_LEN>();
  debug_assert!(rest.is_empty(), "compression input must be whole blocks");

  let mut s0 = vld1q_u32(state.as_ptr());
  let mut s1 = vld1q_u32(state.as_ptr().add(4));

  for block in chunks {
    let save0 = s0;
    let save1 = s1;

    // Load the block big-endian into the rotating schedule window.
    let mut m = [
      vreinterpretq_u32_u8(vrev32q_u8(vld1q_u8(block.as_ptr()))),
      vreinterpretq_u32_u8(vrev32q_u8(vld1q_u8(block.as_ptr().add(16)))),
      vreinterpretq_u32_u8(vrev32q_u8(vld1q_u8(block.as_ptr().add(32)))),
      vreinterpretq_u32_u8(vrev32q_u8(vld1q_u8(block.as_ptr().add(48)))),
    ];

    // 16 quad-round steps; the first 12 also expand the schedule, producing
    // w16..w63 in place.
    for i in 0..16 {
      let tmp0 = vaddq_u32(m[i & 3], vld1q_u32(K.as_ptr().add(4 * i)));
      if i < 12 {
        m[i & 3] = vsha256su0q_u32(m[i & 3], m[(i + 1) & 3]);
      }
      let tmp2 = s0;
      s0 = vsha256hq_u32(s0, s1, tmp0);
      s1 = vsha256h2q_u32(s1, tmp2, tmp0);
      if i < 12 {
        m[i & 3] = vsha256su1q_u32(m[i & 3], m[(i + 2) & 3], m[(i + 3) & 3]);
      }
    }

    s0 = vaddq_u32(s0, save0);
    s1 = vaddq_u32(s1, save1);
  }

  vst1q_u32(state.as_mut_ptr(), s0);
  vst1q_u32(state.as_mut_ptr().add(4), s1);
}

/// ARMv8 SHA2-extension compression kernel.
pub(crate) fn compress_blocks_armv8(state: &mut [u32; 8], blocks: &[u8]) {
  // SAFETY: installed only when `aarch64::SHA2_READY` capabilities are detected.
  unsafe { compress_blocks_impl(state, blocks) }
}

/// Width-1 double hash via the generic composition.
pub(crate) fn transform_d64_armv8(out: &mut [u8], input: &[u8]) {
  d64::transform_d64_via(compress_blocks_armv8, out, input);
}
