//! Request Orchestrator — normalization, validation, profile resolution, and
//! the concurrent per-format fan-out.
//!
//! Flow: normalize examples → analyze-only short-circuit → validate →
//!       resolve profile (fresh analysis wins over a supplied one) →
//!       spawn one generation task per format → join in request order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::formats::ContentFormat;
use crate::generation::generator::{generate_for_format, GeneratedContent};
use crate::llm_client::ModelGateway;
use crate::voice::analyzer::analyze;
use crate::voice::models::{normalize_examples, BrandVoiceProfile, ExampleListInput};

/// The single inbound request shape. `formats` empty with examples present
/// means calibration only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub formats: Vec<ContentFormat>,
    #[serde(default)]
    pub brand_voice_examples: Option<ExampleListInput>,
    /// Precomputed profile from an earlier calibration call. Ignored when
    /// fresh examples are supplied.
    #[serde(default)]
    pub brand_voice: Option<BrandVoiceProfile>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub contents: Vec<GeneratedContent>,
    /// The profile that steered generation, echoed back so the caller can
    /// cache it — present whether it was freshly analyzed or supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_voice_analysis: Option<BrandVoiceProfile>,
}

/// Handles one request end to end. Analysis failures degrade to the default
/// profile and single-format failures degrade to inline error strings, so the
/// only hard errors here are validation and task panics.
pub async fn handle_request(
    gateway: Arc<dyn ModelGateway>,
    request: GenerationRequest,
) -> Result<GenerationResponse, AppError> {
    // Legacy flat string lists are normalized here; nothing downstream ever
    // sees the legacy shape.
    let examples = request
        .brand_voice_examples
        .map(normalize_examples)
        .unwrap_or_default();

    // Calibration-only path: examples but no formats.
    if !examples.is_empty() && request.formats.is_empty() {
        info!("Analyze-only request with {} example(s)", examples.len());
        let profile = analyze(&examples, gateway.as_ref()).await;
        return Ok(GenerationResponse {
            contents: vec![],
            brand_voice_analysis: Some(profile),
        });
    }

    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic is required".to_string()));
    }
    if request.industry.trim().is_empty() {
        return Err(AppError::Validation("industry is required".to_string()));
    }
    if request.formats.is_empty() {
        return Err(AppError::Validation(
            "at least one content format is required".to_string(),
        ));
    }

    let profile = if !examples.is_empty() {
        Some(analyze(&examples, gateway.as_ref()).await)
    } else {
        request.brand_voice.clone()
    };

    // One task per format, joined in request order: the output order equals
    // the requested order regardless of which call completes first.
    let mut tasks = Vec::with_capacity(request.formats.len());
    for format in request.formats.iter().copied() {
        let gateway = Arc::clone(&gateway);
        let topic = request.topic.clone();
        let industry = request.industry.clone();
        let profile = profile.clone();
        tasks.push(tokio::spawn(async move {
            generate_for_format(gateway.as_ref(), &topic, &industry, format, profile.as_ref())
                .await
        }));
    }

    let mut contents = Vec::with_capacity(tasks.len());
    for task in tasks {
        let item = task
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("generation task panicked: {e}")))?;
        contents.push(item);
    }

    info!(
        "Generated {} content item(s) for topic '{}'",
        contents.len(),
        request.topic
    );

    Ok(GenerationResponse {
        contents,
        brand_voice_analysis: profile,
    })
}
