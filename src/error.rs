//! Library-wide error and result types.

use std::io;

use thiserror::Error;

/// Result alias used throughout jtex.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Every variant is terminal at this layer: decoding stops at the first
/// error and the value is surfaced whole to the caller. The taxonomy is
/// deliberately coarse - it distinguishes "not a JTEX file"
/// ([`Error::InvalidMagicNumber`]) from "corrupt or truncated data"
/// ([`Error::OutOfRange`], [`Error::Compression`]) from "transport failure"
/// ([`Error::Io`]).
#[derive(Debug, Error)]
pub enum Error {
    /// The stream does not begin with the `JTEX` signature.
    #[error("invalid magic number")]
    InvalidMagicNumber,
    /// A header field is outside its valid range or inconsistent with the
    /// rest of the header. The payload names the offending field.
    #[error("value out of range: {0}")]
    OutOfRange(&'static str),
    /// Decompression of the pixel payload failed. The underlying
    /// [`LzError`] is reachable through [`std::error::Error::source`].
    #[error("decompression error: {0}")]
    Compression(#[from] LzError),
    /// An underlying read from the input stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors produced by the LZ decompression layer.
///
/// Split into a "malformed stream" kind and a catch-all, so callers can
/// tell structurally corrupt input apart from everything else without
/// depending on decoder internals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LzError {
    /// The compressed stream is structurally invalid: a back-reference
    /// points before the start of the output, a copy would overrun the
    /// declared output size, or the stream ends in the middle of a unit.
    #[error("malformed LZ stream: {0}")]
    Malformed(&'static str),
    /// Any other decompression failure, e.g. a stream that ends cleanly
    /// but produced fewer bytes than the header declared.
    #[error("decompression produced an unexpected result")]
    Unknown,
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_names_the_offending_field() {
        let err = Error::OutOfRange("colour type code");
        assert_eq!(err.to_string(), "value out of range: colour type code");
    }

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "stream ended");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn compression_error_preserves_cause() {
        let err: Error = LzError::Malformed("back-reference before start of output").into();
        let cause = err.source().expect("compression errors carry a cause");
        assert_eq!(
            cause.to_string(),
            "malformed LZ stream: back-reference before start of output"
        );
    }

    #[test]
    fn magic_mismatch_has_no_cause() {
        assert!(Error::InvalidMagicNumber.source().is_none());
    }
}
