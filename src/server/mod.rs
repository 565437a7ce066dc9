//! # HTTP Server for Year Progress Images
//!
//! Serves freshly rendered images for automations and link previews.
//!
//! ## Usage
//!
//! ```bash
//! yeardots serve --listen 0.0.0.0:4173 --tz America/Santiago
//! ```
//!
//! ## Routes
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /generate` | JPEG (default) or PNG, `?format=square\|story\|og&ext=png&tz=...&q=90` |
//! | `GET /generate.png`, `/generate.jpg` | Same, format from the extension |
//! | `GET /layout` | Scene geometry as JSON |
//! | `GET /healthz` | Liveness probe |

mod handlers;
mod state;

pub use state::{AppState, DEFAULT_LISTEN_ADDR, ServerConfig};

use axum::{Router, routing::get};
use chrono::Utc;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::calendar::compute_year_progress;
use crate::error::YearDotsError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate", get(handlers::generate::generate))
        .route("/generate.png", get(handlers::generate::generate))
        .route("/generate.jpg", get(handlers::generate::generate))
        .route("/generate.jpeg", get(handlers::generate::generate))
        .route("/layout", get(handlers::layout::layout))
        .route("/healthz", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use yeardots::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), yeardots::error::YearDotsError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:4173".to_string(),
///     default_time_zone: Some("America/Santiago".to_string()),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), YearDotsError> {
    // A bad default zone would fail every request; refuse to start instead
    compute_year_progress(Utc::now(), config.default_time_zone.as_deref())?;

    let app = router(Arc::new(AppState::new(config.clone())));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            YearDotsError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    tracing::info!(
        listen = %config.listen_addr,
        time_zone = config.default_time_zone.as_deref().unwrap_or("local"),
        "yeardots HTTP server started"
    );
    tracing::info!(
        "Image endpoint: http://{}/generate?format=square",
        config.listen_addr
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| YearDotsError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
