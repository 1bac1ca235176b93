//! 4-way SHA256D kernel: four independent messages in the lanes of `__m128i`.
//!
//! Every vector holds one schedule word position across the four lanes, so a
//! single pass of the round function advances four unrelated hashes in
//! lockstep. There is no cross-lane data flow anywhere; batching is purely a
//! matter of shared instruction issue.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::inline_always)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::undocumented_unsafe_blocks)]

use core::arch::x86_64::*;

use crate::crypto::sha256::{H0, K};

const LANES: usize = 4;

#[inline(always)]
unsafe fn add(x: __m128i, y: __m128i) -> __m128i {
  _mm_add_epi32(x, y)
}

#[inline(always)]
unsafe fn add4(x: __m128i, y: __m128i, z: __m128i, w: __m128i) -> __m128i {
  add(add(x, y), add(z, w))
}

#[inline(always)]
unsafe fn add5(x: __m128i, y: __m128i, z: __m128i, w: __m128i, v: __m128i) -> __m128i {
  add(add(add(x, y), add(z, w)), v)
}

#[inline(always)]
unsafe fn xor3(x: __m128i, y: __m128i, z: __m128i) -> __m128i {
  _mm_xor_si128(_mm_xor_si128(x, y), z)
}

#[inline(always)]
unsafe fn ch(x: __m128i, y: __m128i, z: __m128i) -> __m128i {
  _mm_xor_si128(z, _mm_and_si128(x, _mm_xor_si128(y, z)))
}

#[inline(always)]
unsafe fn maj(x: __m128i, y: __m128i, z: __m128i) -> __m128i {
  _mm_or_si128(_mm_and_si128(x, y), _mm_and_si128(z, _mm_or_si128(x, y)))
}

#[inline(always)]
unsafe fn big_sigma0(x: __m128i) -> __m128i {
  xor3(
    _mm_or_si128(_mm_srli_epi32(x, 2), _mm_slli_epi32(x, 30)),
    _mm_or_si128(_mm_srli_epi32(x, 13), _mm_slli_epi32(x, 19)),
    _mm_or_si128(_mm_srli_epi32(x, 22), _mm_slli_epi32(x, 10)),
  )
}

#[inline(always)]
unsafe fn big_sigma1(x: __m128i) -> __m128i {
  xor3(
    _mm_or_si128(_mm_srli_epi32(x, 6), _mm_slli_epi32(x, 26)),
    _mm_or_si128(_mm_srli_epi32(x, 11), _mm_slli_epi32(x, 21)),
    _mm_or_si128(_mm_srli_epi32(x, 25), _mm_slli_epi32(x, 7)),
  )
}

#[inline(always)]
unsafe fn small_sigma0(x: __m128i) -> __m128i {
  xor3(
    _mm_or_si128(_mm_srli_epi32(x, 7), _mm_slli_epi32(x, 25)),
    _mm_or_si128(_mm_srli_epi32(x, 18), _mm_slli_epi32(x, 14)),
    _mm_srli_epi32(x, 3),
  )
}

#[inline(always)]
unsafe fn small_sigma1(x: __m128i) -> __m128i {
  xor3(
    _mm_or_si128(_mm_srli_epi32(x, 17), _mm_slli_epi32(x, 15)),
    _mm_or_si128(_mm_srli_epi32(x, 19), _mm_slli_epi32(x, 13)),
    _mm_srli_epi32(x, 10),
  )
}

#[inline(always)]
fn be32(input: &[u8], pos: usize) -> i32 {
  u32::from_be_bytes([input[pos], input[pos + 1], input[pos + 2], input[pos + 3]]) as i32
}

/// Gather one big-endian schedule word from each lane's 64-byte message.
#[inline(always)]
unsafe fn read4(input: &[u8], offset: usize) -> __m128i {
  _mm_set_epi32(
    be32(input, 192 + offset),
    be32(input, 128 + offset),
    be32(input, 64 + offset),
    be32(input, offset),
  )
}

/// Scatter one state word per lane as big-endian digest bytes.
#[inline(always)]
unsafe fn write4(out: &mut [u8], offset: usize, v: __m128i) {
  let mut words = [0u32; LANES];
  _mm_storeu_si128(words.as_mut_ptr().cast(), v);
  for (lane, word) in words.iter().enumerate() {
    let pos = lane * 32 + offset;
    out[pos..pos + 4].copy_from_slice(&word.to_be_bytes());
  }
}

/// 64 rounds over all four lanes, schedule expanded in a 16-vector ring.
#[inline(always)]
unsafe fn compress4(state: &mut [__m128i; 8], mut w: [__m128i; 16]) {
  let mut a = state[0];
  let mut b = state[1];
  let mut c = state[2];
  let mut d = state[3];
  let mut e = state[4];
  let mut f = state[5];
  let mut g = state[6];
  let mut h = state[7];

  for i in 0..64 {
    if i >= 16 {
      w[i & 15] = add4(
        small_sigma1(w[(i + 14) & 15]),
        w[(i + 9) & 15],
        small_sigma0(w[(i + 1) & 15]),
        w[i & 15],
      );
    }
    let t1 = add5(h, big_sigma1(e), ch(e, f, g), _mm_set1_epi32(K[i] as i32), w[i & 15]);
    let t2 = add(big_sigma0(a), maj(a, b, c));

    h = g;
    g = f;
    f = e;
    e = add(d, t1);
    d = c;
    c = b;
    b = a;
    a = add(t1, t2);
  }

  state[0] = add(state[0], a);
  state[1] = add(state[1], b);
  state[2] = add(state[2], c);
  state[3] = add(state[3], d);
  state[4] = add(state[4], e);
  state[5] = add(state[5], f);
  state[6] = add(state[6], g);
  state[7] = add(state[7], h);
}

/// Constant padding block of a 64-byte message, broadcast across lanes.
#[inline(always)]
unsafe fn padding_w() -> [__m128i; 16] {
  let mut w = [_mm_setzero_si128(); 16];
  w[0] = _mm_set1_epi32(0x80000000_u32 as i32);
  w[15] = _mm_set1_epi32(0x200);
  w
}

/// Second-hash block: intermediate digest words plus constant padding.
#[inline(always)]
unsafe fn digest_w(digest: &[__m128i; 8]) -> [__m128i; 16] {
  let mut w = [_mm_setzero_si128(); 16];
  w[..8].copy_from_slice(digest);
  w[8] = _mm_set1_epi32(0x80000000_u32 as i32);
  w[15] = _mm_set1_epi32(0x100);
  w
}

#[target_feature(enable = "sse4.1")]
unsafe fn transform_impl(out: &mut [u8], input: &[u8]) {
  debug_assert_eq!(input.len(), LANES * 64);
  debug_assert_eq!(out.len(), LANES * 32);

  let mut w = [_mm_setzero_si128(); 16];
  for (i, slot) in w.iter_mut().enumerate() {
    *slot = read4(input, 4 * i);
  }

  let mut state = [_mm_setzero_si128(); 8];
  for (slot, init) in state.iter_mut().zip(H0) {
    *slot = _mm_set1_epi32(init as i32);
  }

  compress4(&mut state, w);
  compress4(&mut state, padding_w());

  let digest = state;
  for (slot, init) in state.iter_mut().zip(H0) {
    *slot = _mm_set1_epi32(init as i32);
  }
  compress4(&mut state, digest_w(&digest));

  for (i, v) in state.iter().enumerate() {
    write4(out, 4 * i, *v);
  }
}

/// Width-4 SHA256D kernel.
pub(crate) fn transform_d64_4way(out: &mut [u8], input: &[u8]) {
  // SAFETY: installed only when `x86::WIDE4_READY` capabilities are detected.
  unsafe { transform_impl(out, input) }
}
