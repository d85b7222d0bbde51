//! The framed image format understood by the shield's boot loader.
//!
//! A framed image is the raw bitstream wrapped in just enough metadata for
//! the loader to find its extent and check its integrity before flashing:
//!
//! ```text
//! offset 0..4        payload length N, little-endian u32
//! offset 4..4+N      payload, verbatim copy of the source image
//! offset 4+N..4+N+4  CRC32 of the payload, little-endian u32
//! ```
//!
//! The checksum is the standard reflected CRC32 (polynomial 0xEDB88320),
//! the same algorithm zlib and PNG use.

use thiserror::Error;

/// Length of the little-endian size field preceding the payload.
pub const HEADER_LEN: usize = 4;
/// Length of the little-endian CRC32 field following the payload.
pub const TRAILER_LEN: usize = 4;
/// Total framing overhead added to a payload.
pub const METADATA_LEN: usize = HEADER_LEN + TRAILER_LEN;

/// The errors that can occur while framing an image.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// The image does not fit the 32-bit size field of the frame header.
    ///
    /// The loader reads the payload length as an unsigned 32-bit integer, so
    /// images larger than `u32::MAX` bytes cannot be represented. They are
    /// rejected outright instead of wrapping the length around.
    #[error("image is {len} bytes, which exceeds the {max} byte limit of the frame header", max = u32::MAX)]
    ImageTooLarge {
        /// Size of the rejected image in bytes.
        len: usize,
    },
}

/// The errors that can occur while validating a framed image.
///
/// These mirror the checks the shield's boot loader performs before it
/// accepts a blob for flashing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// The blob is shorter than the fixed framing metadata.
    #[error("framed image is {len} bytes, shorter than the {METADATA_LEN} byte framing metadata")]
    TooShort {
        /// Size of the rejected blob in bytes.
        len: usize,
    },
    /// The length field in the header disagrees with the actual payload extent.
    #[error("header declares a {header} byte payload but the file contains {actual} bytes")]
    LengthMismatch {
        /// Payload length according to the frame header.
        header: usize,
        /// Payload length implied by the file size.
        actual: usize,
    },
    /// The stored checksum does not match the payload.
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// CRC32 stored in the frame trailer.
        stored: u32,
        /// CRC32 recomputed over the payload.
        computed: u32,
    },
}

/// Computes the CRC32 checksum of an image.
pub fn checksum(image: &[u8]) -> u32 {
    crc::crc32::checksum_ieee(image)
}

/// Frames a raw image for the boot loader.
///
/// Returns a new buffer holding the little-endian payload length, the
/// payload and the little-endian CRC32 of the payload, in that order. The
/// output is always exactly [`METADATA_LEN`] bytes longer than the input.
///
/// Fails with [`FramingError::ImageTooLarge`] if the image length does not
/// fit the 32-bit header field. An empty image is valid and frames to eight
/// zero bytes.
pub fn frame(image: &[u8]) -> Result<Vec<u8>, FramingError> {
    let size = u32::try_from(image.len())
        .map_err(|_| FramingError::ImageTooLarge { len: image.len() })?;
    let crc = checksum(image);

    let mut framed = Vec::with_capacity(image.len() + METADATA_LEN);
    framed.extend_from_slice(&size.to_le_bytes());
    framed.extend_from_slice(image);
    framed.extend_from_slice(&crc.to_le_bytes());
    Ok(framed)
}

/// Validates a framed image and returns its payload.
///
/// Performs the same checks as the boot loader: the blob must be large
/// enough to hold the framing metadata, the header length must match the
/// actual payload extent, and the stored CRC32 must match the payload.
pub fn verify(framed: &[u8]) -> Result<&[u8], VerifyError> {
    if framed.len() < METADATA_LEN {
        return Err(VerifyError::TooShort { len: framed.len() });
    }

    let (header, rest) = framed.split_at(HEADER_LEN);
    let (payload, trailer) = rest.split_at(rest.len() - TRAILER_LEN);

    let size = u32::from_le_bytes(header.try_into().unwrap()) as usize;
    if size != payload.len() {
        return Err(VerifyError::LengthMismatch {
            header: size,
            actual: payload.len(),
        });
    }

    let stored = u32::from_le_bytes(trailer.try_into().unwrap());
    let computed = checksum(payload);
    if stored != computed {
        return Err(VerifyError::ChecksumMismatch { stored, computed });
    }

    Ok(payload)
}
