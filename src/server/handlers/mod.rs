//! HTTP handlers for the server.

pub mod generate;
pub mod layout;

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::encode::{DEFAULT_QUALITY, OutputFormat};
use crate::error::YearDotsError;
use crate::render::Preset;

/// Query parameters shared by `/generate` and `/layout`.
#[derive(Debug, Default, Deserialize)]
pub struct ImageQuery {
    /// `square` (default), `story`, `og`; anything else selects `w`/`h`
    pub format: Option<String>,
    /// `png` or `jpg` (default); a path extension takes precedence
    pub ext: Option<String>,
    /// IANA time zone for the calendar date
    pub tz: Option<String>,
    /// JPEG quality; out-of-range values are clamped to 1..=100
    pub q: Option<u32>,
    pub w: Option<u32>,
    pub h: Option<u32>,
}

impl ImageQuery {
    pub fn preset(&self) -> Result<Preset, YearDotsError> {
        let format = self.format.as_deref().unwrap_or("square");
        match format.parse::<Preset>() {
            Ok(preset) => Ok(preset),
            // Unrecognized formats fall back to an explicit size
            Err(_) => Preset::custom(self.w.unwrap_or(1080), self.h.unwrap_or(1080)),
        }
    }

    pub fn quality(&self) -> u8 {
        match self.q {
            Some(q) => q.clamp(1, 100) as u8,
            None => DEFAULT_QUALITY,
        }
    }

    pub fn output_format(&self, path: &str) -> Result<OutputFormat, String> {
        if let Some(format) = OutputFormat::from_path(path) {
            return Ok(format);
        }
        match self.ext.as_deref() {
            Some(ext) => ext.parse(),
            None => Ok(OutputFormat::Jpeg),
        }
    }
}

/// Map a render error to an HTTP status and plain-text body.
pub fn error_response(err: YearDotsError) -> (StatusCode, String) {
    let status = if err.is_caller_error() {
        tracing::warn!(error = %err, "rejected request");
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(error = %err, "render failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, format!("Error: {}", err))
}

/// GET /healthz
pub async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "ok")
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Not found",
    )
}
