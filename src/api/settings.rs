//! Settings endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{FieldKey, PrefillSettings, SettingsPayload},
};

/// DOI field that can be mapped onto a destination field
#[derive(Serialize, ToSchema)]
pub struct DoiField {
    /// Key used in `field_settings`
    pub key: FieldKey,
    /// Display label
    pub label: String,
}

/// Settings response
#[derive(Serialize, ToSchema)]
pub struct SettingsResponse {
    /// Saved (or default) settings
    pub settings: SettingsPayload,
    /// Every mappable DOI field
    pub doi_fields: Vec<DoiField>,
}

impl From<&PrefillSettings> for SettingsResponse {
    fn from(settings: &PrefillSettings) -> Self {
        Self {
            settings: SettingsPayload::from(settings),
            doi_fields: FieldKey::ALL
                .into_iter()
                .map(|key| DoiField {
                    key,
                    label: key.label().to_string(),
                })
                .collect(),
        }
    }
}

/// Get current settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current settings", body = SettingsResponse)
    )
)]
pub async fn get_settings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<SettingsResponse>> {
    let settings = state.services.settings.get_settings().await?;
    Ok(Json(SettingsResponse::from(&settings)))
}

/// Update settings
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    request_body = SettingsPayload,
    responses(
        (status = 200, description = "Settings updated", body = SettingsResponse),
        (status = 400, description = "Invalid field key or term mapping")
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    Json(request): Json<SettingsPayload>,
) -> AppResult<Json<SettingsResponse>> {
    let settings = state.services.settings.update_settings(request).await?;
    Ok(Json(SettingsResponse::from(&settings)))
}
