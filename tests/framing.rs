//! End-to-end checks of the framing library: frame, persist, read back,
//! validate like the boot loader would.

use bitstream_framer::framing::{self, METADATA_LEN};
use bitstream_framer::{frame, output, verify, VerifyError};

#[test]
fn framed_file_roundtrips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let dst = dir.path().join("shield.bin");

    let image: Vec<u8> = (0u32..2048).map(|i| (i % 251) as u8).collect();
    let framed = frame(&image).unwrap();
    output::write_image(&dst, &framed).unwrap();

    let written = std::fs::read(&dst).unwrap();
    assert_eq!(written.len(), image.len() + METADATA_LEN);
    assert_eq!(verify(&written).unwrap(), &image[..]);
}

#[test]
fn framed_file_matches_known_layout() {
    let dir = tempfile::tempdir().unwrap();
    let dst = dir.path().join("abc.bin");

    output::write_image(&dst, &frame(b"abc").unwrap()).unwrap();

    // size = 3, payload = "abc", CRC32("abc") = 0x352441C2, both fields
    // little-endian.
    assert_eq!(
        std::fs::read(&dst).unwrap(),
        [0x03, 0x00, 0x00, 0x00, 0x61, 0x62, 0x63, 0xC2, 0x41, 0x24, 0x35]
    );
}

#[test]
fn corruption_on_disk_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let dst = dir.path().join("corrupt.bin");

    output::write_image(&dst, &frame(b"payload under test").unwrap()).unwrap();

    let mut written = std::fs::read(&dst).unwrap();
    let middle = written.len() / 2;
    written[middle] ^= 0x80;
    assert!(matches!(
        verify(&written),
        Err(VerifyError::ChecksumMismatch { .. })
    ));
}

#[test]
fn empty_image_produces_eight_zero_bytes_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let dst = dir.path().join("empty.bin");

    output::write_image(&dst, &frame(&[]).unwrap()).unwrap();

    let written = std::fs::read(&dst).unwrap();
    assert_eq!(written, vec![0u8; METADATA_LEN]);
    assert_eq!(framing::checksum(&[]), 0);
}
