//! **jtex** - a decoder for the Nintendo Jupiter Texture (JTEX) image
//! container.
//!
//! The format is read-only here: a stream comes in, a flat pixel buffer
//! tagged with width, height, and a generic colour type comes out, ready
//! for whatever image pipeline sits downstream.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`formats::jtex`] | Header parsing, pixel reconstruction, orchestration |
//! | [`compression`]   | Nintendo LZ10/LZ11 payload decompression |
//! | [`error`]         | Library-wide error taxonomy |
//!
//! # Decoding
//! ```no_run
//! # fn main() -> jtex::Result<()> {
//! let file = std::fs::File::open("Prs_P_254_C.jtex")?;
//! let image = jtex::decode(file)?;
//! assert_eq!(
//!     image.pixels.len(),
//!     image.width as usize * image.height as usize
//!         * image.colour_type.bytes_per_pixel(),
//! );
//! # Ok(())
//! # }
//! ```
//!
//! For metadata without the cost of decompression, parse the header alone
//! with [`Header::parse`].

pub mod compression;
pub mod error;
pub mod formats;
pub mod utils;

pub use error::{Error, LzError, Result};
pub use formats::jtex::{
    ColourType, Compression, DecodedImage, Header, JtexDecoder, JupiterColourType, decode,
};
