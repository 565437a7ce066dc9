//! JPEG output via the `image` crate's baseline encoder.
//!
//! JPEG has no alpha channel, so pixels are composited over black first.

use image::ImageEncoder;
use image::codecs::jpeg::JpegEncoder;

use crate::error::{Result, YearDotsError};
use crate::raster::Canvas;

/// Quality used when the caller does not pick one.
pub const DEFAULT_QUALITY: u8 = 90;

fn over_black(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}

/// Encode `canvas` as JPEG at `quality` (clamped to 1..=100).
pub fn encode_jpeg(canvas: &Canvas, quality: u8) -> Result<Vec<u8>> {
    let quality = quality.clamp(1, 100);
    let rgb: Vec<u8> = canvas
        .pixels()
        .chunks_exact(4)
        .flat_map(|p| {
            [
                over_black(p[0], p[3]),
                over_black(p[1], p[3]),
                over_black(p[2], p[3]),
            ]
        })
        .collect();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(
            &rgb,
            canvas.width() as u32,
            canvas.height() as u32,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e: image::ImageError| YearDotsError::Encoding(format!("JPEG: {}", e)))?;

    tracing::debug!(quality, bytes = out.len(), "encoded JPEG");
    Ok(out)
}
