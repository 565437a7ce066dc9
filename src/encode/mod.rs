//! # Image Encoding
//!
//! | Format | Encoder | Notes |
//! |--------|---------|-------|
//! | PNG | [`png::encode_png`] | Hand-written container, zlib payload via flate2 |
//! | JPEG | [`jpeg::encode_jpeg`] | `image` crate, alpha composited over black |

pub mod jpeg;
pub mod png;

pub use jpeg::{DEFAULT_QUALITY, encode_jpeg};
pub use png::encode_png;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::raster::Canvas;

/// Output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Format implied by a file name or URL path extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let (_, ext) = path.rsplit_once('.')?;
        ext.parse().ok()
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            other => Err(format!("unknown image format '{}' (expected png or jpg)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encode `canvas` in `format`; `quality` only applies to JPEG.
pub fn encode(canvas: &Canvas, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => encode_png(canvas),
        OutputFormat::Jpeg => encode_jpeg(canvas, quality),
    }
}
