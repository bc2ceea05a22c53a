//! Axum route handlers for the card generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateCardRequest {
    /// Defaults to empty so an absent field takes the same validation path
    /// as an explicitly empty one.
    #[serde(default)]
    pub intro: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateCardResponse {
    pub html: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate
///
/// Validates the introduction, then asks the producer for card markup.
/// The producer absorbs all remote failures, so the only error a client can
/// see here is the empty-intro rejection.
pub async fn handle_generate_card(
    State(state): State<AppState>,
    Json(request): Json<GenerateCardRequest>,
) -> Result<Json<GenerateCardResponse>, AppError> {
    if request.intro.trim().is_empty() {
        return Err(AppError::Validation("intro cannot be empty".to_string()));
    }

    let preview: String = request.intro.chars().take(30).collect();
    info!(
        "card requested: {} chars, preview {preview:?}",
        request.intro.chars().count()
    );

    let html = state.producer.produce(&request.intro).await;

    Ok(Json(GenerateCardResponse { html }))
}
