//! # yeardots - Year Progress Images
//!
//! yeardots renders a year as a grid of dots (one per day, filled for days
//! that have started) with `filled/total` and `percent%` headers, and encodes
//! it for social posts, stories and Open Graph previews. It provides:
//!
//! - **Calendar engine**: leap-aware day counting in any IANA time zone
//! - **Raster canvas**: RGBA pixels, rectangles, disks, rings, 5x7 bitmap text
//! - **Grid layout**: dot size and gap that fit a content area
//! - **Encoders**: hand-written PNG container, JPEG via `image`
//! - **Server**: `/generate` endpoint returning fresh images
//!
//! ## Quick Start
//!
//! ```
//! use chrono::Utc;
//! use yeardots::{calendar, render};
//!
//! let progress = calendar::compute_year_progress(Utc::now(), Some("UTC"))?;
//! let png = render::render_image(1080, 1920, &progress)?;
//! assert_eq!(&png[1..4], b"PNG");
//!
//! # Ok::<(), yeardots::error::YearDotsError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`calendar`] | Year progress from a date and time zone |
//! | [`raster`] | Canvas and drawing primitives |
//! | [`layout`] | Dot grid solver |
//! | [`scene`] | Image composition |
//! | [`encode`] | PNG and JPEG encoders |
//! | [`render`] | Presets and render entry points |
//! | [`server`] | HTTP server |
//! | [`error`] | Error types |

pub mod calendar;
pub mod encode;
pub mod error;
pub mod layout;
pub mod raster;
pub mod render;
pub mod scene;
pub mod server;

// Re-exports for convenience
pub use calendar::{YearProgress, compute_year_progress};
pub use error::YearDotsError;
pub use render::{Preset, RenderOptions, render_image};
