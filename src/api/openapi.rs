//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, prefill, settings};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DOI Prefill API",
        version = "0.3.0",
        description = "Create catalog records from Crossref DOI metadata",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Settings
        settings::get_settings,
        settings::update_settings,
        // Prefill
        prefill::list_collections,
        prefill::prefill,
    ),
    components(
        schemas(
            // Settings
            settings::SettingsResponse,
            settings::DoiField,
            crate::models::SettingsPayload,
            crate::models::settings::TermPair,
            crate::models::FieldKey,
            // Prefill
            prefill::PrefillRequest,
            crate::services::prefill::PrefillOutcome,
            crate::models::RecordSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "settings", description = "Field and term mapping settings"),
        (name = "prefill", description = "Record creation from DOI")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
