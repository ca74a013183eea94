//! Parsers for the supported image container formats.
//!
//! Conventions shared by everything under this module:
//!
//! * **Generic over** [`std::io::Read`] - pass a [`std::fs::File`], a
//!   [`std::io::Cursor`], a network stream, or anything else that can
//!   produce bytes. JTEX is a linear format, so no `Seek` bound is needed
//!   and a plain forward-only stream is enough.
//! * **Headers parse separately** - `Header::parse` reads and validates
//!   metadata only, leaving the stream at the first payload byte. Decoding
//!   pixels is an explicit second step.
//! * **Untrusted input** - every length, offset, and code read from the
//!   stream is validated before use; corrupt data surfaces as a typed
//!   [`crate::Error`], never as a panic or an out-of-bounds access.
//! * **Decompression is separate** - the LZ layer lives in
//!   [`crate::compression`] and keeps its own error taxonomy; parsers wrap
//!   it at the format boundary.

pub mod jtex;
