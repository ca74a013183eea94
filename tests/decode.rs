use std::io::{self, Cursor, Read};

use jtex::compression::lz::{self, LzVariant};
use jtex::{ColourType, Compression, Error, Header, JtexDecoder, JupiterColourType, LzError};

// --- Helpers ---

/// Assemble a complete JTEX stream from header fields and a payload.
fn jtex_file(
    width: u32,
    height: u32,
    colour_type: JupiterColourType,
    compression: Compression,
    payload: &[u8],
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(18 + payload.len());
    bytes.extend_from_slice(b"JTEX");
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.push(colour_type.code());
    bytes.push(compression.code());
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Reference encoder for the literal-only subset of the LZ unit stream.
///
/// Every 8 bytes get a zero control byte (all-literal group); the final
/// group may be short, which a decoder must accept once the declared output
/// size is reached. Literal units are identical in LZ10 and LZ11, so the
/// output is valid for either variant.
fn encode_literals(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len().div_ceil(8));
    for group in data.chunks(8) {
        out.push(0x00);
        out.extend_from_slice(group);
    }
    out
}

/// A reader that always fails, for exercising transport errors.
struct BrokenPipe;

impl Read for BrokenPipe {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader died"))
    }
}

// --- Uncompressed decoding ---

#[test]
fn decodes_a_small_indexed_image() {
    let payload: Vec<u8> = (0..16).collect();
    let file = jtex_file(4, 4, JupiterColourType::Indexed8, Compression::None, &payload);

    let image = jtex::decode(Cursor::new(file)).unwrap();
    assert_eq!((image.width, image.height), (4, 4));
    assert_eq!(image.colour_type, ColourType::L8);
    assert_eq!(image.pixels, payload);
}

#[test]
fn payload_one_byte_short_is_an_error() {
    // Same 4x4 indexed header, but the declared payload is 15 bytes.
    let payload: Vec<u8> = (0..15).collect();
    let file = jtex_file(4, 4, JupiterColourType::Indexed8, Compression::None, &payload);

    match jtex::decode(Cursor::new(file)) {
        Err(Error::OutOfRange(field)) => assert_eq!(field, "payload size"),
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn rgba_channels_are_reordered_end_to_end() {
    // Two ABGR pixels.
    let payload = [0x40, 0x30, 0x20, 0x10, 0x80, 0x70, 0x60, 0x50];
    let file = jtex_file(2, 1, JupiterColourType::Rgba8888, Compression::None, &payload);

    let image = jtex::decode(Cursor::new(file)).unwrap();
    assert_eq!(image.colour_type, ColourType::Rgba8);
    assert_eq!(
        image.pixels,
        [0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80]
    );
}

#[test]
fn not_a_jtex_stream() {
    let mut stream = vec![0x00, 0x00, 0x00, 0x00];
    stream.extend_from_slice(&[0xFF; 32]);
    assert!(matches!(
        jtex::decode(Cursor::new(stream)),
        Err(Error::InvalidMagicNumber)
    ));
}

// --- Compressed decoding ---

#[test]
fn lz10_payload_round_trips() {
    let original: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(37)).collect();
    let file = jtex_file(
        8,
        8,
        JupiterColourType::L8,
        Compression::Lz10,
        &encode_literals(&original),
    );

    let image = jtex::decode(Cursor::new(file)).unwrap();
    assert_eq!(image.colour_type, ColourType::L8);
    assert_eq!(image.pixels, original);
}

#[test]
fn lz11_payload_with_a_match_decodes() {
    // One literal followed by a length-15 distance-1 copy: 16 bytes of 0xAA.
    let payload = [0x40, 0xAA, 0xE0, 0x00];
    let file = jtex_file(8, 2, JupiterColourType::L8, Compression::Lz11, &payload);

    let image = jtex::decode(Cursor::new(file)).unwrap();
    assert_eq!(image.pixels, vec![0xAA; 16]);
}

#[test]
fn reference_encoder_round_trips_through_the_decompressor() {
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        vec![0x42],
        (0..8).collect(),
        (0..9).collect(),
        (0..200u8).map(|i| i.wrapping_mul(13) ^ (i >> 3)).collect(),
    ];
    for input in inputs {
        for variant in [LzVariant::Lz10, LzVariant::Lz11] {
            let out = lz::decompress(&encode_literals(&input), variant, input.len()).unwrap();
            assert_eq!(out, input);
        }
    }
}

#[test]
fn corrupt_back_reference_is_a_compression_error() {
    // First unit claims a copy from before the start of the output.
    let payload = [0x80, 0x00, 0x00, 0x00];
    let file = jtex_file(4, 4, JupiterColourType::L8, Compression::Lz10, &payload);

    match jtex::decode(Cursor::new(file)) {
        Err(Error::Compression(LzError::Malformed(_))) => {}
        other => panic!("expected a malformed-stream error, got {other:?}"),
    }
}

#[test]
fn short_compressed_stream_is_a_compression_error() {
    // A clean all-literal group of 8 bytes where 16 were declared.
    let payload = encode_literals(&[0u8; 8]);
    let file = jtex_file(4, 4, JupiterColourType::L8, Compression::Lz10, &payload);

    match jtex::decode(Cursor::new(file)) {
        Err(Error::Compression(LzError::Unknown)) => {}
        other => panic!("expected the catch-all compression error, got {other:?}"),
    }
}

// --- Header-only parsing ---

#[test]
fn header_parse_skips_decompression() {
    // The payload is garbage that would never decompress; parsing just the
    // header must not care.
    let file = jtex_file(4, 4, JupiterColourType::L8, Compression::Lz10, &[0xFF; 20]);

    let mut cursor = Cursor::new(&file);
    let header = Header::parse(&mut cursor).unwrap();
    assert_eq!(cursor.position(), 18);
    assert_eq!(header.raw_size().unwrap(), 16);
    assert!(header.is_compressed());

    // Full decoding of the same stream does fail.
    assert!(matches!(
        jtex::decode(Cursor::new(&file)),
        Err(Error::Compression(_))
    ));
}

// --- Decoder accessors ---

#[test]
fn decoder_reports_metadata() {
    let payload = [0u8; 12];
    let file = jtex_file(2, 2, JupiterColourType::Rgb888, Compression::None, &payload);

    let decoder = JtexDecoder::new(Cursor::new(file)).unwrap();
    assert_eq!(decoder.dimensions(), (2, 2));
    assert_eq!(decoder.native_colour_type(), JupiterColourType::Rgb888);
    assert_eq!(decoder.colour_type(), ColourType::Rgb8);
    assert_eq!(decoder.total_bytes(), 12);
    assert_eq!(decoder.header().payload_size, 12);

    let image = decoder.into_image();
    assert_eq!(image.pixels.len(), 12);
}

// --- Transport failures ---

#[test]
fn truncated_stream_is_an_io_error() {
    let file = jtex_file(4, 4, JupiterColourType::Indexed8, Compression::None, &[0u8; 16]);
    // Cut the stream in the middle of the payload.
    assert!(matches!(
        jtex::decode(Cursor::new(&file[..24])),
        Err(Error::Io(_))
    ));
}

#[test]
fn failing_reader_propagates_verbatim() {
    match jtex::decode(BrokenPipe) {
        Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}
