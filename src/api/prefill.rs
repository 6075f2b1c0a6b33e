//! DOI prefill endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{RecordId, RecordSummary},
    services::prefill::PrefillOutcome,
};

/// Prefill request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PrefillRequest {
    /// DOI to look up on Crossref
    #[validate(length(min = 1, message = "DOI is required"))]
    pub doi: String,
    /// Collection receiving the new record
    #[schema(value_type = i64)]
    pub collection_id: RecordId,
}

/// List collections that can receive new records
#[utoipa::path(
    get,
    path = "/collections",
    tag = "prefill",
    responses(
        (status = 200, description = "Available collections", body = Vec<RecordSummary>)
    )
)]
pub async fn list_collections(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<RecordSummary>>> {
    let collections = state.services.prefill.list_collections().await?;
    Ok(Json(collections))
}

/// Create an unpublished record from a DOI
#[utoipa::path(
    post,
    path = "/prefill",
    tag = "prefill",
    request_body = PrefillRequest,
    responses(
        (status = 201, description = "Record created", body = PrefillOutcome),
        (status = 200, description = "Crossref returned no information", body = PrefillOutcome),
        (status = 400, description = "Missing DOI"),
        (status = 404, description = "Unknown collection"),
        (status = 409, description = "DOI already exists")
    )
)]
pub async fn prefill(
    State(state): State<crate::AppState>,
    Json(request): Json<PrefillRequest>,
) -> AppResult<(StatusCode, Json<PrefillOutcome>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = state
        .services
        .prefill
        .prefill(request.collection_id, &request.doi)
        .await?;

    let status = match outcome {
        PrefillOutcome::Created { .. } => StatusCode::CREATED,
        PrefillOutcome::NoInformation { .. } => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}
