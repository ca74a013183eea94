//! JTEX (Jupiter Texture) - compressed image container.
//!
//! A small, read-only texture format: one image per file, optionally
//! LZ-compressed, with a handful of native pixel encodings. The decoder
//! produces a flat byte buffer tagged with a generic colour type; palette
//! lookup for the indexed encodings is the caller's concern.
//!
//! ## Layout
//! ```text
//! [0x00] Magic "JTEX"        (4 bytes)
//! [0x04] Width               (u32 LE)
//! [0x08] Height              (u32 LE)
//! [0x0C] ColourType code     (u8, see table below)
//! [0x0D] Compression code    (u8: 0x00 none, 0x10 LZ10, 0x11 LZ11)
//! [0x0E] PayloadSize         (u32 LE)
//! [0x12] Payload             (PayloadSize bytes of pixel data)
//! ```
//!
//! A compressed payload is a bare LZ unit stream (see
//! [`crate::compression::lz`]); its decompressed size is fixed by the
//! header as `Width x Height x bits-per-pixel`, rounded up to whole bytes.
//! An uncompressed payload must be exactly that size.
//!
//! ## Colour types
//! ```text
//! Code  Native      Bits/px  Stored as                 Decodes to
//! 0     L8          8        luminance                 L8
//! 1     La8         16       luminance, alpha          La8
//! 2     Rgba8888    32       A B G R                   Rgba8
//! 3     Rgb888      24       B G R                     Rgb8
//! 4     Rgba4444    16       4-bit A B G R             Rgba8
//! 5     Rgba5551    16       u16 LE, R5 G5 B5 A1       Rgba8
//! 6     Indexed8    8        one palette index/byte    L8 (indices)
//! 7     Indexed4    4        two indices/byte, low     L8 (indices)
//!                            nibble first
//! ```
//!
//! Pixels are stored row-major with no tiling or row padding.

use std::io::Read;

use crate::compression::lz::{self, LzVariant};
use crate::utils::{expect_magic, read_u8, read_u32_le, read_vec};
use crate::{Error, Result};

/// The four-byte signature every JTEX stream starts with.
pub const MAGIC: [u8; 4] = *b"JTEX";

/// Generic colour vocabulary shared with the downstream image pipeline.
///
/// Every [`JupiterColourType`] decodes to exactly one of these; the decoded
/// pixel buffer holds `bytes_per_pixel` bytes per pixel in the channel
/// order the name suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourType {
    /// One luminance (or palette-index) byte per pixel.
    L8,
    /// Luminance and alpha, one byte each.
    La8,
    /// Red, green, blue, one byte each.
    Rgb8,
    /// Red, green, blue, alpha, one byte each.
    Rgba8,
}

impl ColourType {
    /// Bytes per pixel in a decoded buffer of this colour type.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::L8 => 1,
            Self::La8 => 2,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Pixel encodings native to the JTEX container.
///
/// Distinct from [`ColourType`]: these describe how pixels sit in the file,
/// not what the decoder hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JupiterColourType {
    /// 8-bit luminance (greyscale).
    L8,
    /// 8-bit luminance with 8-bit alpha.
    La8,
    /// 32-bit RGBA, stored byte-reversed (ABGR).
    Rgba8888,
    /// 24-bit RGB, stored byte-reversed (BGR).
    Rgb888,
    /// 16-bit RGBA, 4 bits per channel, stored as ABGR nibbles.
    Rgba4444,
    /// 16-bit RGBA, 5 bits per colour channel and a 1-bit alpha.
    Rgba5551,
    /// 8-bit palette indices; palette lookup is external.
    Indexed8,
    /// 4-bit palette indices, two per byte; palette lookup is external.
    Indexed4,
}

impl JupiterColourType {
    /// Bits per pixel as stored in the payload.
    pub fn bits_per_pixel(self) -> usize {
        match self {
            Self::Indexed4 => 4,
            Self::L8 | Self::Indexed8 => 8,
            Self::La8 | Self::Rgba4444 | Self::Rgba5551 => 16,
            Self::Rgb888 => 24,
            Self::Rgba8888 => 32,
        }
    }

    /// The header code for this colour type.
    pub fn code(self) -> u8 {
        match self {
            Self::L8 => 0,
            Self::La8 => 1,
            Self::Rgba8888 => 2,
            Self::Rgb888 => 3,
            Self::Rgba4444 => 4,
            Self::Rgba5551 => 5,
            Self::Indexed8 => 6,
            Self::Indexed4 => 7,
        }
    }

    /// The generic colour type this encoding decodes to.
    pub fn generic(self) -> ColourType {
        match self {
            Self::L8 | Self::Indexed8 | Self::Indexed4 => ColourType::L8,
            Self::La8 => ColourType::La8,
            Self::Rgb888 => ColourType::Rgb8,
            Self::Rgba8888 | Self::Rgba4444 | Self::Rgba5551 => ColourType::Rgba8,
        }
    }
}

impl TryFrom<u8> for JupiterColourType {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::L8),
            1 => Ok(Self::La8),
            2 => Ok(Self::Rgba8888),
            3 => Ok(Self::Rgb888),
            4 => Ok(Self::Rgba4444),
            5 => Ok(Self::Rgba5551),
            6 => Ok(Self::Indexed8),
            7 => Ok(Self::Indexed4),
            _ => Err(Error::OutOfRange("colour type code")),
        }
    }
}

/// Payload compression declared by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Raw pixel data, exactly `raw_size` bytes.
    None,
    /// LZ10-compressed unit stream.
    Lz10,
    /// LZ11-compressed unit stream.
    Lz11,
}

impl Compression {
    /// The header code for this compression mode.
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Lz10 => 0x10,
            Self::Lz11 => 0x11,
        }
    }

    /// The LZ variant to decompress with, or [`None`] for raw payloads.
    pub fn variant(self) -> Option<LzVariant> {
        match self {
            Self::None => None,
            Self::Lz10 => Some(LzVariant::Lz10),
            Self::Lz11 => Some(LzVariant::Lz11),
        }
    }
}

impl TryFrom<u8> for Compression {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0x00 => Ok(Self::None),
            0x10 => Ok(Self::Lz10),
            0x11 => Ok(Self::Lz11),
            _ => Err(Error::OutOfRange("compression code")),
        }
    }
}

/// Parsed and validated JTEX header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Native pixel encoding of the payload.
    pub colour_type: JupiterColourType,
    /// Payload compression mode.
    pub compression: Compression,
    /// Byte count of the (possibly compressed) payload.
    pub payload_size: u32,
}

impl Header {
    /// Parse and validate a JTEX header from `r`.
    ///
    /// `r` must be positioned at the start of the magic. On success the
    /// stream is positioned at the first payload byte; no payload bytes are
    /// read. This is also the header-only entry point for callers that want
    /// metadata without paying for decompression.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        expect_magic(r, &MAGIC)?;

        let width = read_u32_le(r)?;
        let height = read_u32_le(r)?;
        let colour_type = JupiterColourType::try_from(read_u8(r)?)?;
        let compression = Compression::try_from(read_u8(r)?)?;
        let payload_size = read_u32_le(r)?;

        let header = Self {
            width,
            height,
            colour_type,
            compression,
            payload_size,
        };
        header.validate()?;
        Ok(header)
    }

    /// Byte count of the payload after decompression (before pixel
    /// reconstruction).
    ///
    /// Fails with [`Error::OutOfRange`] if the dimensions overflow.
    pub fn raw_size(&self) -> Result<usize> {
        let bits = (self.width as u64)
            .checked_mul(self.height as u64)
            .and_then(|area| area.checked_mul(self.colour_type.bits_per_pixel() as u64))
            .ok_or(Error::OutOfRange("image dimensions"))?;
        usize::try_from(bits.div_ceil(8)).map_err(|_| Error::OutOfRange("image dimensions"))
    }

    /// Byte count of the reconstructed pixel buffer.
    pub fn decoded_size(&self) -> Result<usize> {
        let bytes = (self.width as u64)
            .checked_mul(self.height as u64)
            .and_then(|area| {
                area.checked_mul(self.colour_type.generic().bytes_per_pixel() as u64)
            })
            .ok_or(Error::OutOfRange("image dimensions"))?;
        usize::try_from(bytes).map_err(|_| Error::OutOfRange("image dimensions"))
    }

    /// Whether the payload is LZ-compressed.
    pub fn is_compressed(&self) -> bool {
        self.compression != Compression::None
    }

    /// Cross-field validation: sizes must be computable without overflow and
    /// `payload_size` must be plausible for the declared compression mode.
    fn validate(&self) -> Result<()> {
        let raw_size = self.raw_size()? as u64;
        self.decoded_size()?;

        let payload_size = u64::from(self.payload_size);
        match self.compression {
            Compression::None => {
                if payload_size != raw_size {
                    return Err(Error::OutOfRange("payload size"));
                }
            }
            Compression::Lz10 | Compression::Lz11 => {
                // A real stream is never larger than a literal-only encoding
                // (one control byte per 8 literals) plus alignment padding,
                // and never empty when output is expected.
                let worst_case = raw_size + raw_size.div_ceil(8) + 15;
                if (raw_size > 0 && payload_size == 0) || payload_size > worst_case {
                    return Err(Error::OutOfRange("payload size"));
                }
            }
        }
        Ok(())
    }
}

/// A fully decoded image, the terminal artifact of [`decode`].
///
/// `pixels` holds exactly `width x height x colour_type.bytes_per_pixel()`
/// bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Generic colour type of `pixels`.
    pub colour_type: ColourType,
    /// Reconstructed pixel data.
    pub pixels: Vec<u8>,
}

/// JTEX decoder: parses, decompresses, and reconstructs in one pass.
///
/// The format does not lend itself to streaming (the LZ window spans the
/// whole payload), so the image is materialised up front; the accessors then
/// answer metadata queries without further work. Use [`Header::parse`]
/// directly when pixels are not needed.
pub struct JtexDecoder {
    header: Header,
    colour_type: ColourType,
    pixel_buffer: Vec<u8>,
}

impl JtexDecoder {
    /// Decode a JTEX stream from `reader`.
    ///
    /// Stops at the first error: magic or range failures from the header,
    /// [`Error::Compression`] from the LZ layer, [`Error::Io`] from the
    /// stream itself.
    pub fn new<R: Read>(mut reader: R) -> Result<Self> {
        let header = Header::parse(&mut reader)?;
        let payload = read_vec(&mut reader, header.payload_size as usize)?;

        let raw = match header.compression.variant() {
            Some(variant) => lz::decompress(&payload, variant, header.raw_size()?)?,
            None => payload,
        };

        let (colour_type, pixel_buffer) =
            reconstruct(&raw, header.colour_type, header.width, header.height);

        Ok(Self {
            header,
            colour_type,
            pixel_buffer,
        })
    }

    /// The validated header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Image dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.header.width, self.header.height)
    }

    /// Generic colour type of the decoded pixels.
    pub fn colour_type(&self) -> ColourType {
        self.colour_type
    }

    /// Native colour type the payload was stored as.
    pub fn native_colour_type(&self) -> JupiterColourType {
        self.header.colour_type
    }

    /// Total decoded byte count.
    pub fn total_bytes(&self) -> u64 {
        self.pixel_buffer.len() as u64
    }

    /// Consume the decoder, yielding the decoded image.
    pub fn into_image(self) -> DecodedImage {
        DecodedImage {
            width: self.header.width,
            height: self.header.height,
            colour_type: self.colour_type,
            pixels: self.pixel_buffer,
        }
    }
}

/// Decode a complete JTEX stream into a [`DecodedImage`].
pub fn decode<R: Read>(reader: R) -> Result<DecodedImage> {
    Ok(JtexDecoder::new(reader)?.into_image())
}

/// Reinterpret the raw payload bytes as pixels of the generic colour type.
///
/// `raw` must already have the exact size the header declares for
/// `colour_type`; the header parser guarantees this, so a wrong-sized output
/// here is a bug, not bad input.
fn reconstruct(
    raw: &[u8],
    colour_type: JupiterColourType,
    width: u32,
    height: u32,
) -> (ColourType, Vec<u8>) {
    /// Every 4-bit value times 0x11, i.e. `v * 255 / 15` exactly.
    const EXPAND_4_BIT: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE,
        0xFF,
    ];
    /// Every 5-bit value times 255/31, rounded to nearest.
    const EXPAND_5_BIT: [u8; 32] = [
        0x00, 0x08, 0x10, 0x19, 0x21, 0x29, 0x31, 0x3A, 0x42, 0x4A, 0x52, 0x5A, 0x63, 0x6B, 0x73,
        0x7B, 0x84, 0x8C, 0x94, 0x9C, 0xA5, 0xAD, 0xB5, 0xBD, 0xC5, 0xCE, 0xD6, 0xDE, 0xE6, 0xEF,
        0xF7, 0xFF,
    ];

    let generic = colour_type.generic();
    let expected_len = width as usize * height as usize * generic.bytes_per_pixel();
    let mut pixels = Vec::with_capacity(expected_len);

    match colour_type {
        JupiterColourType::L8 | JupiterColourType::La8 | JupiterColourType::Indexed8 => {
            pixels.extend_from_slice(raw);
        }
        JupiterColourType::Indexed4 => {
            for &packed in raw {
                pixels.push(packed & 0x0F);
                // The high nibble of the last byte is padding when the pixel
                // count is odd.
                if pixels.len() < expected_len {
                    pixels.push(packed >> 4);
                }
            }
        }
        JupiterColourType::Rgb888 => {
            for bgr in raw.chunks_exact(3) {
                pixels.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
            }
        }
        JupiterColourType::Rgba8888 => {
            for abgr in raw.chunks_exact(4) {
                pixels.extend_from_slice(&[abgr[3], abgr[2], abgr[1], abgr[0]]);
            }
        }
        JupiterColourType::Rgba4444 => {
            for abgr in raw.chunks_exact(2) {
                pixels.extend_from_slice(&[
                    EXPAND_4_BIT[(abgr[1] >> 4) as usize],
                    EXPAND_4_BIT[(abgr[1] & 0x0F) as usize],
                    EXPAND_4_BIT[(abgr[0] >> 4) as usize],
                    EXPAND_4_BIT[(abgr[0] & 0x0F) as usize],
                ]);
            }
        }
        JupiterColourType::Rgba5551 => {
            for pair in raw.chunks_exact(2) {
                let value = u16::from_le_bytes([pair[0], pair[1]]);
                pixels.extend_from_slice(&[
                    EXPAND_5_BIT[((value >> 11) & 0x1F) as usize],
                    EXPAND_5_BIT[((value >> 6) & 0x1F) as usize],
                    EXPAND_5_BIT[((value >> 1) & 0x1F) as usize],
                    (value & 1) as u8 * 0xFF,
                ]);
            }
        }
    }

    assert_eq!(
        pixels.len(),
        expected_len,
        "reconstructed pixel buffer has the wrong size"
    );
    (generic, pixels)
}
