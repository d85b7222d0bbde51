//! Post-processing for FPGA CI test shield firmware images.
//!
//! The shield's boot loader refuses to flash a bare bitstream: it expects a
//! self-describing blob carrying the payload length up front and a CRC32 of
//! the payload at the end. This crate produces (and validates) that blob.
//! The [`framing`] module holds the pure byte transforms, [`output`] the
//! atomic file persistence; the `bitstream-framer` binary wires them to the
//! filesystem.

pub mod framing;
pub mod output;

pub use framing::{frame, verify, FramingError, VerifyError};
