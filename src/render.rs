//! # Render Entry Points
//!
//! Glue between the calendar, the scene composer and the encoders.
//!
//! ## Presets
//!
//! | Preset | Size | Grid |
//! |--------|------|------|
//! | `square` | 1080x1080 | 28 columns |
//! | `story` | 1080x1920 | 19 columns |
//! | `og` | 1200x630 | 37 columns |
//! | custom | up to 4096x4096 | by aspect |
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use yeardots::calendar::YearProgress;
//! use yeardots::render::{Preset, RenderOptions, render_preset};
//!
//! let progress = YearProgress::for_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
//! let png = render_preset(Preset::Square, &progress, &RenderOptions::default())?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok::<(), yeardots::YearDotsError>(())
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::calendar::YearProgress;
use crate::encode::{self, DEFAULT_QUALITY, OutputFormat};
use crate::error::{Result, YearDotsError};
use crate::scene::{LayoutVariant, render_scene};

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 4096;

/// Named output sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Square,
    Story,
    /// Open Graph link preview card
    Og,
    Custom { width: u32, height: u32 },
}

impl Preset {
    /// Custom size, validated against [`MAX_DIMENSION`].
    pub fn custom(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Preset::Custom { width, height })
    }

    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Preset::Square => (1080, 1080),
            Preset::Story => (1080, 1920),
            Preset::Og => (1200, 630),
            Preset::Custom { width, height } => (width, height),
        }
    }

    pub fn variant(self) -> LayoutVariant {
        let (width, height) = self.dimensions();
        LayoutVariant::for_size(width, height)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Square => f.write_str("square"),
            Preset::Story => f.write_str("story"),
            Preset::Og => f.write_str("og"),
            Preset::Custom { width, height } => write!(f, "{}x{}", width, height),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(Preset::Square),
            "story" => Ok(Preset::Story),
            "og" => Ok(Preset::Og),
            other => Err(format!("unknown preset '{}' (expected square, story or og)", other)),
        }
    }
}

/// Encoder settings for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// JPEG quality (1..=100). Default: 90
    pub quality: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: DEFAULT_QUALITY,
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    let valid = 1..=MAX_DIMENSION;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(YearDotsError::Geometry(format!(
            "image size {}x{} must be within 1..={} on both axes",
            width, height, MAX_DIMENSION
        )))
    }
}

/// Render a `width x height` PNG of `progress`.
pub fn render_image(width: u32, height: u32, progress: &YearProgress) -> Result<Vec<u8>> {
    render_with_options(width, height, progress, &RenderOptions::default())
}

/// Render a `width x height` image of `progress` in the requested format.
pub fn render_with_options(
    width: u32,
    height: u32,
    progress: &YearProgress,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    check_dimensions(width, height)?;
    let canvas = render_scene(width, height, progress, LayoutVariant::for_size(width, height))?;
    encode::encode(&canvas, options.format, options.quality)
}

/// Render one of the named presets.
pub fn render_preset(
    preset: Preset,
    progress: &YearProgress,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let (width, height) = preset.dimensions();
    render_with_options(width, height, progress, options)
}

/// Download name, e.g. `year-dots-2026-story.jpg`.
pub fn file_name(year: i32, preset: Preset, format: OutputFormat) -> String {
    format!("year-dots-{}-{}.{}", year, preset, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn progress() -> YearProgress {
        YearProgress::for_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn test_preset_dimensions() {
        assert_eq!(Preset::Square.dimensions(), (1080, 1080));
        assert_eq!(Preset::Story.dimensions(), (1080, 1920));
        assert_eq!(Preset::Og.dimensions(), (1200, 630));
        assert_eq!(Preset::Og.variant(), LayoutVariant::Wide);
        assert_eq!("STORY".parse::<Preset>(), Ok(Preset::Story));
        assert!("banner".parse::<Preset>().is_err());
    }

    #[test]
    fn test_custom_bounds() {
        assert!(Preset::custom(800, 600).is_ok());
        assert!(Preset::custom(0, 600).is_err());
        assert!(Preset::custom(800, MAX_DIMENSION + 1).is_err());
        assert!(render_image(5000, 1080, &progress()).is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            file_name(2026, Preset::Story, OutputFormat::Jpeg),
            "year-dots-2026-story.jpg"
        );
        assert_eq!(
            file_name(2026, Preset::Custom { width: 800, height: 600 }, OutputFormat::Png),
            "year-dots-2026-800x600.png"
        );
    }

    #[test]
    fn test_render_image_is_png() {
        let png = render_image(1200, 630, &progress()).unwrap();
        assert_eq!(&png[..8], &encode::png::PNG_SIGNATURE);
    }
}
