use hashes::crypto::Sha256;
use proptest::prelude::*;
use traits::Digest as _;

fn sha2_ref(data: &[u8]) -> [u8; 32] {
  use sha2::Digest as _;
  let out = sha2::Sha256::digest(data);
  let mut bytes = [0u8; 32];
  bytes.copy_from_slice(&out);
  bytes
}

proptest! {
  #[test]
  fn one_shot_matches_sha2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    prop_assert_eq!(Sha256::digest(&data), sha2_ref(&data));
  }

  #[test]
  fn streaming_matches_sha2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    let expected = sha2_ref(&data);

    let mut h = Sha256::new();
    let mut i = 0usize;
    while i < data.len() {
      let step = (data[i] as usize % 97) + 1;
      let end = core::cmp::min(data.len(), i + step);
      h.update(&data[i..end]);
      i = end;
    }

    prop_assert_eq!(h.finalize(), expected);
  }

  #[test]
  fn every_eligible_kernel_agrees(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    prop_assert_eq!(hashes::verify_sha256_kernels(&data), Ok(()));
  }

  #[test]
  fn batch_double_hash_matches_composition(blocks in 0usize..24, seed in any::<u8>()) {
    let input: Vec<u8> = (0..blocks * 64).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
    let mut out = vec![0u8; blocks * 32];
    hashes::sha256_d64(&mut out, &input, blocks);

    for lane in 0..blocks {
      let message = &input[lane * 64..(lane + 1) * 64];
      let expected = sha2_ref(&sha2_ref(message));
      prop_assert_eq!(&out[lane * 32..(lane + 1) * 32], &expected[..]);
    }
  }
}

#[test]
fn compress_kernels_match_portable_across_block_counts() {
  use hashes::crypto::sha256::kernels;

  let caps = platform::caps();
  let data: Vec<u8> = (0..16 * 64u32).map(|i| (i as u8).wrapping_mul(13).wrapping_add(7)).collect();

  for &id in kernels::ALL {
    if !caps.has(kernels::required_caps(id)) {
      continue;
    }
    let compress = kernels::compress_blocks_fn(id);
    for blocks in 0..=16usize {
      let mut state = [0x01234567u32, 0x89abcdef, 0x0f1e2d3c, 0x4b5a6978, 0xdeadbeef, 0xfeedface, 0x0badf00d, 0xcafebabe];
      let mut reference = state;
      compress(&mut state, &data[..blocks * 64]);
      kernels::compress_blocks_fn(kernels::Sha256KernelId::Portable)(&mut reference, &data[..blocks * 64]);
      assert_eq!(state, reference, "kernel={} blocks={}", id.as_str(), blocks);
    }
  }
}
