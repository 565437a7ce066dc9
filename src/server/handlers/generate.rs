//! Image download handler.

use axum::{
    extract::{Query, State},
    http::{HeaderName, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    calendar::compute_year_progress,
    render::{RenderOptions, file_name, render_preset},
};

use super::super::state::AppState;
use super::{ImageQuery, error_response};

/// GET /generate[.png|.jpg|.jpeg] - Render today's image.
///
/// The response is never cacheable: the date changes daily.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<ImageQuery>,
) -> Result<Response, (StatusCode, String)> {
    let format = query
        .output_format(uri.path())
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Error: {}", e)))?;
    let preset = query.preset().map_err(error_response)?;
    let time_zone = state.time_zone(query.tz.as_deref());
    let options = RenderOptions {
        format,
        quality: query.quality(),
    };

    // Run CPU-intensive rendering in blocking task to avoid starving the tokio runtime
    let (progress, bytes) = tokio::task::spawn_blocking(move || {
        let progress = compute_year_progress(Utc::now(), time_zone.as_deref())?;
        let bytes = render_preset(preset, &progress, &options)?;
        Ok::<_, crate::YearDotsError>((progress, bytes))
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Task error: {}", e)))?
    .map_err(error_response)?;

    tracing::info!(
        %preset,
        %format,
        filled = progress.filled,
        total = progress.total,
        bytes = bytes.len(),
        "generated image"
    );

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (header::CACHE_CONTROL, "no-store".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", file_name(progress.year, preset, format)),
        ),
        (HeaderName::from_static("x-year"), progress.year.to_string()),
        (HeaderName::from_static("x-filled"), progress.filled.to_string()),
        (HeaderName::from_static("x-total"), progress.total.to_string()),
        (HeaderName::from_static("x-percent"), progress.percent.clone()),
    ];

    Ok((headers, bytes).into_response())
}
