use hashes::crypto::Sha256;
use hashes::sha256_d64;

fn double_sha256(message: &[u8]) -> [u8; 32] {
  Sha256::digest(&Sha256::digest(message))
}

#[test]
fn output_order_matches_input_order() {
  // 27 blocks exercises the 8-way, 4-way, 2-way, and scalar drains in one
  // call on fully-accelerated hosts; lane digests must land in input order.
  let blocks = 27usize;
  let input: Vec<u8> = (0..blocks * 64).map(|i| (i / 64) as u8).collect();
  let mut out = vec![0u8; blocks * 32];
  sha256_d64(&mut out, &input, blocks);

  for lane in 0..blocks {
    let expected = double_sha256(&vec![lane as u8; 64]);
    assert_eq!(&out[lane * 32..(lane + 1) * 32], &expected[..], "lane {lane}");
  }
}

#[test]
fn zero_blocks_is_a_no_op() {
  let mut out = [0u8; 0];
  sha256_d64(&mut out, &[], 0);
}

#[test]
fn single_block_matches_composition() {
  let message = [0u8; 64];
  let mut out = [0u8; 32];
  sha256_d64(&mut out, &message, 1);
  assert_eq!(out, double_sha256(&message));
}

#[test]
fn misaligned_batch_input_is_handled() {
  // Slice into a buffer at an odd offset so accelerated kernels see inputs
  // without any particular alignment.
  let blocks = 9usize;
  let mut backing = vec![0u8; blocks * 64 + 1];
  for (i, byte) in backing.iter_mut().enumerate() {
    *byte = (i % 199) as u8;
  }
  let input = &backing[1..];

  let mut out = vec![0u8; blocks * 32];
  sha256_d64(&mut out, input, blocks);

  for lane in 0..blocks {
    let expected = double_sha256(&input[lane * 64..(lane + 1) * 64]);
    assert_eq!(&out[lane * 32..(lane + 1) * 32], &expected[..], "lane {lane}");
  }
}

#[test]
#[should_panic(expected = "64-byte messages")]
fn mismatched_block_count_is_rejected() {
  let input = [0u8; 128];
  let mut out = [0u8; 32];
  sha256_d64(&mut out, &input, 1);
}
