//! Layout API handler.
//!
//! Serves the resolved scene geometry so the browser export can draw the
//! same grid onto its own canvas.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    calendar::{YearProgress, compute_year_progress},
    render::Preset,
    scene::{Dot, ScenePlan, plan_scene},
};

use super::super::state::AppState;
use super::{ImageQuery, error_response};

/// Body of `GET /layout`.
#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub progress: YearProgress,
    pub preset: Preset,
    pub plan: ScenePlan,
    pub dots: Vec<Dot>,
}

/// GET /layout - Scene geometry for today's image.
pub async fn layout(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImageQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let preset = query.preset().map_err(error_response)?;
    let time_zone = state.time_zone(query.tz.as_deref());

    let progress = compute_year_progress(Utc::now(), time_zone.as_deref()).map_err(error_response)?;
    let (width, height) = preset.dimensions();
    let plan = plan_scene(width, height, &progress, preset.variant()).map_err(error_response)?;
    let dots = plan.dots().collect();

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(LayoutResponse {
            progress,
            preset,
            plan,
            dots,
        }),
    ))
}
