//! REST API endpoint for batch analysis runs

use actix_web::{post, web, HttpResponse, Responder};

use crate::api::ApiError;
use crate::service::analysis::{BatchOutcome, BatchSelector};
use crate::service::AnalysisService;

/// Run a batch analysis over pending reviews.
///
/// The body selects the reviews: explicit `review_ids`, a `restaurant_id`,
/// or `analyze_all_pending`. Per-review failures are counted, not fatal.
#[utoipa::path(
    post,
    path = "/v1/analysis/run",
    request_body = BatchSelector,
    responses(
        (status = 200, description = "Batch run finished", body = BatchOutcome),
        (status = 400, description = "No selector specified"),
        (status = 500, description = "Internal server error")
    ),
    tag = "analysis"
)]
#[post("/v1/analysis/run")]
pub async fn run_analysis(
    service: web::Data<AnalysisService>,
    body: web::Json<BatchSelector>,
) -> Result<impl Responder, ApiError> {
    let outcome = service.run_batch(&body).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(run_analysis);
}
