use hashes::crypto::Sha256;
use traits::Digest as _;

fn hex(bytes: &[u8]) -> String {
  bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn fips_short_message_vectors() {
  assert_eq!(
    hex(&Sha256::digest(b"")),
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
  );
  assert_eq!(
    hex(&Sha256::digest(b"abc")),
    "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
  );
  assert_eq!(
    hex(&Sha256::digest(
      b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"
    )),
    "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
  );
}

#[test]
fn length_boundaries_match_reference() {
  use sha2::Digest as _;

  // 55 bytes pads within one block; 56 and 64 need a second padding block.
  for len in [55usize, 56, 57, 63, 64, 65, 119, 120] {
    let data = vec![0x5au8; len];
    let expected = sha2::Sha256::digest(&data);
    assert_eq!(&Sha256::digest(&data)[..], &expected[..], "len={len}");
  }
}

#[test]
fn trailing_update_after_finalize_continues_the_stream() {
  let mut h = Sha256::new();
  h.update(b"split");
  let early = h.finalize();
  assert_eq!(early, h.finalize(), "finalize must be idempotent");

  h.update(b"-point");
  assert_eq!(h.finalize(), Sha256::digest(b"split-point"));
}

#[test]
fn large_input_bit_length_is_64_bit() {
  // 512 MiB exceeds a 32-bit *bit* counter (2^32 bits = 512 MiB); the length
  // field must still be correct.
  let chunk = vec![0u8; 1 << 20];
  let mut h = Sha256::new();
  for _ in 0..512 {
    h.update(&chunk);
  }
  let ours = h.finalize();

  use sha2::Digest as _;
  let mut reference = sha2::Sha256::new();
  for _ in 0..512 {
    reference.update(&chunk);
  }
  assert_eq!(&ours[..], &reference.finalize()[..]);
}

#[test]
fn auto_detect_reports_selected_backends() {
  let summary = hashes::auto_detect().to_string();
  assert!(summary.contains("(1way)"), "summary was {summary:?}");
  // Dispatch is idempotent.
  assert_eq!(summary, hashes::auto_detect().to_string());
}
