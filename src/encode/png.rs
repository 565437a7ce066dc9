//! # PNG Encoder
//!
//! Writes the minimal PNG subset: 8-bit truecolor with alpha, no interlace,
//! filter type 0 on every scanline, one `IDAT` chunk.
//!
//! ## Byte Layout
//!
//! ```text
//! 89 50 4E 47 0D 0A 1A 0A                       signature
//! [len:u32be]["IHDR"][w:u32be h:u32be 08 06 00 00 00][crc:u32be]
//! [len:u32be]["IDAT"][zlib(0 row0 | 0 row1 | ...)][crc:u32be]
//! [00000000]["IEND"][AE 42 60 82]
//! ```
//!
//! The CRC is IEEE CRC-32 (reflected polynomial `0xEDB88320`) over the
//! chunk type followed by its data.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::error::{Result, YearDotsError};
use crate::raster::{BYTES_PER_PIXEL, Canvas};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const BIT_DEPTH: u8 = 8;
/// Truecolor with alpha.
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;

static CRC_TABLE: [u32; 256] = crc_table();

const fn crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// Running CRC-32 over several byte slices.
#[derive(Debug, Clone, Copy)]
pub struct Crc32(u32);

impl Crc32 {
    pub fn new() -> Self {
        Self(0xFFFF_FFFF)
    }

    pub fn update(&mut self, bytes: &[u8]) {
        let mut c = self.0;
        for &b in bytes {
            c = CRC_TABLE[((c ^ u32::from(b)) & 0xFF) as usize] ^ (c >> 8);
        }
        self.0 = c;
    }

    pub fn finish(self) -> u32 {
        self.0 ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// CRC-32 of one buffer.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(bytes);
    crc.finish()
}

/// A chunk before framing.
#[derive(Debug, Clone, Copy)]
pub struct PngChunk<'a> {
    pub kind: [u8; 4],
    pub data: &'a [u8],
}

impl PngChunk<'_> {
    /// Append `length | type | data | crc` to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let len = u32::try_from(self.data.len())
            .ok()
            .filter(|&n| n <= i32::MAX as u32)
            .ok_or_else(|| {
                YearDotsError::Encoding(format!(
                    "{} chunk of {} bytes exceeds the PNG limit",
                    String::from_utf8_lossy(&self.kind),
                    self.data.len()
                ))
            })?;

        let mut crc = Crc32::new();
        crc.update(&self.kind);
        crc.update(self.data);

        out.reserve(12 + self.data.len());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&self.kind);
        out.extend_from_slice(self.data);
        out.extend_from_slice(&crc.finish().to_be_bytes());
        Ok(())
    }
}

/// Prefix each row with the filter-type byte.
fn frame_scanlines(canvas: &Canvas) -> Vec<u8> {
    let stride = canvas.width() * BYTES_PER_PIXEL;
    let mut raw = Vec::with_capacity(canvas.height() * (stride + 1));
    for y in 0..canvas.height() {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(canvas.row(y));
    }
    raw
}

fn compress(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(raw.len() / 8), Compression::best());
    encoder
        .write_all(raw)
        .map_err(|e| YearDotsError::Encoding(format!("DEFLATE failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| YearDotsError::Encoding(format!("DEFLATE failed: {}", e)))
}

fn dimension(value: usize, axis: &str) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v > 0 && v <= i32::MAX as u32)
        .ok_or_else(|| YearDotsError::Encoding(format!("{} {} is out of PNG range", axis, value)))
}

/// Encode `canvas` as a PNG byte stream.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let width = dimension(canvas.width(), "width")?;
    let height = dimension(canvas.height(), "height")?;

    let mut header = [0u8; 13];
    header[0..4].copy_from_slice(&width.to_be_bytes());
    header[4..8].copy_from_slice(&height.to_be_bytes());
    header[8] = BIT_DEPTH;
    header[9] = COLOR_TYPE_RGBA;
    // compression, filter method, interlace: all 0

    let compressed = compress(&frame_scanlines(canvas))?;

    let mut out =
        Vec::with_capacity(PNG_SIGNATURE.len() + compressed.len() + 3 * 12 + header.len());
    out.extend_from_slice(&PNG_SIGNATURE);
    PngChunk { kind: *b"IHDR", data: &header }.write_to(&mut out)?;
    PngChunk { kind: *b"IDAT", data: &compressed }.write_to(&mut out)?;
    PngChunk { kind: *b"IEND", data: &[] }.write_to(&mut out)?;

    tracing::debug!(width, height, bytes = out.len(), "encoded PNG");
    Ok(out)
}
