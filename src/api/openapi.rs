//! OpenAPI specification endpoints

use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

use crate::api::{analysis, health, review};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TrustBites Review Intelligence API",
        description = "Fake-review detection for restaurant reviews"
    ),
    paths(
        review::ingest_review,
        review::list_reviews,
        review::get_review,
        review::analyze_review,
        analysis::run_analysis,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        crate::model::ReviewRecord,
        crate::model::NewReview,
        crate::model::AnalysisReport,
        crate::service::analysis::BatchSelector,
        crate::service::analysis::BatchOutcome,
        review::ReviewListResponse,
        review::IngestResponse,
        health::LivenessResponse,
        health::ReadinessResponse,
        health::DependencyStatus,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
