use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::listings::{ContentError, GenerationRequest, GenerationResult, ListingDraft};
use crate::server::app::AppState;

/// Body accepted by the content endpoints.
///
/// Missing fields deserialize as empty and are rejected by validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody {
    #[serde(default)]
    pub original_description: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let status = match &self {
            ContentError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ContentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContentError::Provider(_) => StatusCode::BAD_GATEWAY,
            ContentError::RetriesExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

fn parse_body(
    payload: Result<Json<GenerateContentBody>, JsonRejection>,
) -> Result<GenerationRequest, ContentError> {
    let Json(body) = payload.map_err(|e| ContentError::InvalidInput(e.body_text()))?;
    GenerationRequest::new(body.original_description, body.address)
}

/// Generate marketing content for a property
///
/// Returns the generated content, or `{ error }` with 400 for missing input
/// and 5xx for provider or configuration failures.
pub async fn generate_content_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateContentBody>, JsonRejection>,
) -> Result<Json<GenerationResult>, ContentError> {
    let request = parse_body(payload)?;
    let content = state.generator.generate_for(&request).await?;
    Ok(Json(content))
}

/// Create a publishable listing draft
///
/// Falls back to placeholder content when generation fails, so only an
/// invalid body produces an error.
pub async fn draft_listing_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateContentBody>, JsonRejection>,
) -> Result<Json<ListingDraft>, ContentError> {
    let request = parse_body(payload)?;
    Ok(Json(state.listings.draft(request).await))
}
