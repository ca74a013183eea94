//! Decompression of JTEX pixel payloads.
//!
//! A JTEX header declares whether its payload is stored raw or compressed
//! with one of two Nintendo LZ schemes; the declared scheme maps onto
//! [`lz::LzVariant`]:
//!
//! | Header code | Scheme | Notes |
//! |-------------|--------|-------|
//! | `0x10` | [`lz::LzVariant::Lz10`] | 4-bit match lengths (3..=18) |
//! | `0x11` | [`lz::LzVariant::Lz11`] | variable-width lengths up to 65808 |
//!
//! The decompressed size is never taken from the payload: the container
//! header fixes it as `width x height x bits-per-pixel`, and
//! [`lz::decompress`] enforces that the stream produces exactly that many
//! bytes. Errors stay in the layer's own taxonomy
//! ([`crate::error::LzError`]); the decoder wraps them as
//! [`crate::Error::Compression`] at the format boundary.

pub mod lz;
