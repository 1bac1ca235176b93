//! SHA-256 x86_64 kernels using the SHA extensions.
//!
//! The SHA extensions process one block per instruction stream; the 2-way
//! double-hash kernel interleaves two independent streams per round group to
//! fill the pipeline. Wider batches live in the [`sse41`] and [`avx2`]
//! submodules, which use generic lane-parallel vector arithmetic instead of
//! the dedicated instructions.
//!
//! # Safety
//!
//! The `unsafe fn`s in this module require the `sha`, `ssse3`, and `sse4.1`
//! target features. The safe wrappers are only ever installed in the dispatch
//! table after the corresponding capabilities have been detected, and the
//! known-answer self-test re-validates the pairing before publication.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::inline_always)]
#![allow(clippy::undocumented_unsafe_blocks)]

use core::arch::x86_64::*;

use super::{BLOCK_LEN, H0, K, d64};

pub(crate) mod avx2;
pub(crate) mod sse41;

/// Shuffle mask reversing the bytes of each 32-bit lane (big-endian loads).
#[inline(always)]
unsafe fn bswap_mask() -> __m128i {
  _mm_set_epi64x(0x0c0d0e0f08090a0b_u64 as i64, 0x0405060700010203_u64 as i64)
}

/// Pack `[a,b,c,d,e,f,g,h]` words into the (ABEF, CDGH) register layout the
/// `sha256rnds2` instruction expects.
#[inline(always)]
unsafe fn pack_state(state: &[u32; 8]) -> (__m128i, __m128i) {
  let abcd = _mm_loadu_si128(state.as_ptr().cast());
  let efgh = _mm_loadu_si128(state.as_ptr().add(4).cast());
  let tmp = _mm_shuffle_epi32(abcd, 0xb1); // CDAB
  let efgh = _mm_shuffle_epi32(efgh, 0x1b); // EFGH
  let abef = _mm_alignr_epi8(tmp, efgh, 8);
  let cdgh = _mm_blend_epi16(efgh, tmp, 0xf0);
  (abef, cdgh)
}

/// Inverse of [`pack_state`]: recover `(ABCD, EFGH)` word vectors.
#[inline(always)]
unsafe fn unpack_state(abef: __m128i, cdgh: __m128i) -> (__m128i, __m128i) {
  let tmp = _mm_shuffle_epi32(abef, 0x1b); // FEBA
  let cdgh = _mm_shuffle_epi32(cdgh, 0xb1); // DCHG
  let abcd = _mm_blend_epi16(tmp, cdgh, 0xf0);
  let efgh = _mm_alignr_epi8(cdgh, tmp, 8);
  (abcd, efgh)
}

/// Load one 64-byte block as four big-endian schedule vectors.
#[inline(always)]
unsafe fn load_msg(block: &[u8]) -> [__m128i; 4] {
  let mask = bswap_mask();
  [
    _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().cast()), mask),
    _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().add(16).cast()), mask),
    _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().add(32).cast()), mask),
    _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().add(48).cast()), mask),
  ]
}

/// Four rounds: add the round constants for words `k..k+4`, then run both
/// `sha256rnds2` halves.
#[inline(always)]
unsafe fn quad_round(abef: &mut __m128i, cdgh: &mut __m128i, m: __m128i, k: usize) {
  let msg = _mm_add_epi32(m, _mm_loadu_si128(K.as_ptr().add(k).cast()));
  *cdgh = _mm_sha256rnds2_epu32(*cdgh, *abef, msg);
  *abef = _mm_sha256rnds2_epu32(*abef, *cdgh, _mm_shuffle_epi32(msg, 0x0e));
}

/// One full 64-round compression of the schedule vectors in `m`, including
/// the Merkle–Damgård feed-forward.
///
/// The schedule recurrence is expressed over the rotating window `m[0..4]`:
/// at step `i`, `sha256msg2` finalizes the next vector (steps 3..=14) and
/// `sha256msg1` pre-mixes the previous one (steps 1..=12), exactly the
/// ordering of the unrolled reference sequence.
#[inline(always)]
unsafe fn process_block(abef: &mut __m128i, cdgh: &mut __m128i, m: &mut [__m128i; 4]) {
  let save_abef = *abef;
  let save_cdgh = *cdgh;

  for i in 0..16 {
    quad_round(abef, cdgh, m[i & 3], 4 * i);

    let prev = m[(i + 3) & 3];
    let cur = m[i & 3];
    if (3..=14).contains(&i) {
      let next = m[(i + 1) & 3];
      m[(i + 1) & 3] = _mm_sha256msg2_epu32(_mm_add_epi32(next, _mm_alignr_epi8(cur, prev, 4)), cur);
    }
    if (1..=12).contains(&i) {
      m[(i + 3) & 3] = _mm_sha256msg1_epu32(prev, cur);
    }
  }

  *abef = _mm_add_epi32(*abef, save_abef);
  *cdgh = _mm_add_epi32(*cdgh, save_cdgh);
}

/// Schedule vectors for the constant padding block of a 64-byte message.
#[inline(always)]
unsafe fn padding_msg() -> [__m128i; 4] {
  [
    _mm_set_epi32(0, 0, 0, 0x80000000_u32 as i32),
    _mm_setzero_si128(),
    _mm_setzero_si128(),
    _mm_set_epi32(0x200, 0, 0, 0),
  ]
}

/// Schedule vectors for the second hash: the intermediate digest words plus
/// the constant 0x80 terminator and 256-bit length.
#[inline(always)]
unsafe fn digest_msg(abcd: __m128i, efgh: __m128i) -> [__m128i; 4] {
  [
    abcd,
    efgh,
    _mm_set_epi32(0, 0, 0, 0x80000000_u32 as i32),
    _mm_set_epi32(0x100, 0, 0, 0),
  ]
}

#[target_feature(enable = "sha,ssse3,sse4.1")]
unsafe fn compress_blocks_impl(state: &mut [u32; 8], blocks: &[u8]) {
  let (chunks, rest) = blocks.as_chunks::<BLOCK_LEN>();
  debug_assert!(rest.is_empty(), "compression input must be whole blocks");

  let (mut abef, mut cdgh) = pack_state(state);
  for block in chunks {
    let mut m = load_msg(block);
    process_block(&mut abef, &mut cdgh, &mut m);
  }
  let (abcd, efgh) = unpack_state(abef, cdgh);
  _mm_storeu_si128(state.as_mut_ptr().cast(), abcd);
  _mm_storeu_si128(state.as_mut_ptr().add(4).cast(), efgh);
}

#[target_feature(enable = "sha,ssse3,sse4.1")]
unsafe fn transform_d64_2way_impl(out: &mut [u8], input: &[u8]) {
  debug_assert_eq!(input.len(), 2 * BLOCK_LEN);
  debug_assert_eq!(out.len(), 2 * 32);

  let (init_abef, init_cdgh) = pack_state(&H0);

  // Hash 1 over both lanes: data block, then the constant padding block.
  // The per-lane calls sit back to back so the two dependency chains
  // interleave in the pipeline.
  let mut a_abef = init_abef;
  let mut a_cdgh = init_cdgh;
  let mut b_abef = init_abef;
  let mut b_cdgh = init_cdgh;

  let mut am = load_msg(&input[..BLOCK_LEN]);
  let mut bm = load_msg(&input[BLOCK_LEN..]);
  process_block(&mut a_abef, &mut a_cdgh, &mut am);
  process_block(&mut b_abef, &mut b_cdgh, &mut bm);

  let mut am = padding_msg();
  let mut bm = padding_msg();
  process_block(&mut a_abef, &mut a_cdgh, &mut am);
  process_block(&mut b_abef, &mut b_cdgh, &mut bm);

  // Hash 2 over the intermediate digests; padding is again constant.
  let (a_abcd, a_efgh) = unpack_state(a_abef, a_cdgh);
  let (b_abcd, b_efgh) = unpack_state(b_abef, b_cdgh);
  let mut am = digest_msg(a_abcd, a_efgh);
  let mut bm = digest_msg(b_abcd, b_efgh);

  let mut a_abef = init_abef;
  let mut a_cdgh = init_cdgh;
  let mut b_abef = init_abef;
  let mut b_cdgh = init_cdgh;
  process_block(&mut a_abef, &mut a_cdgh, &mut am);
  process_block(&mut b_abef, &mut b_cdgh, &mut bm);

  let mask = bswap_mask();
  let (a_abcd, a_efgh) = unpack_state(a_abef, a_cdgh);
  _mm_storeu_si128(out.as_mut_ptr().cast(), _mm_shuffle_epi8(a_abcd, mask));
  _mm_storeu_si128(out.as_mut_ptr().add(16).cast(), _mm_shuffle_epi8(a_efgh, mask));
  let (b_abcd, b_efgh) = unpack_state(b_abef, b_cdgh);
  _mm_storeu_si128(out.as_mut_ptr().add(32).cast(), _mm_shuffle_epi8(b_abcd, mask));
  _mm_storeu_si128(out.as_mut_ptr().add(48).cast(), _mm_shuffle_epi8(b_efgh, mask));
}

/// SHA-NI compression kernel.
pub(crate) fn compress_blocks_shani(state: &mut [u32; 8], blocks: &[u8]) {
  // SAFETY: installed only when `x86::SHANI_READY` capabilities are detected.
  unsafe { compress_blocks_impl(state, blocks) }
}

/// Width-1 SHA-NI double hash via the generic composition.
pub(crate) fn transform_d64_shani(out: &mut [u8], input: &[u8]) {
  d64::transform_d64_via(compress_blocks_shani, out, input);
}

/// Width-2 SHA-NI double hash with interleaved instruction streams.
pub(crate) fn transform_d64_shani_2way(out: &mut [u8], input: &[u8]) {
  // SAFETY: installed only when `x86::SHANI_READY` capabilities are detected.
  unsafe { transform_d64_2way_impl(out, input) }
}
