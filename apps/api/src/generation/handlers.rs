//! Axum route handlers for the Content API.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::orchestrator::{handle_request, GenerationRequest, GenerationResponse};
use crate::state::AppState;

/// POST /api/v1/content/generate
///
/// The single entry point: brand-voice calibration when `formats` is empty,
/// full generation otherwise. The gateway credential is checked up front so a
/// misconfigured deployment fails before any work is done.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    if state.config.anthropic_api_key.trim().is_empty() {
        return Err(AppError::Configuration(
            "ANTHROPIC_API_KEY is not set".to_string(),
        ));
    }

    let response = handle_request(Arc::clone(&state.gateway), request).await?;
    Ok(Json(response))
}
