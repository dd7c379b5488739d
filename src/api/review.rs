//! REST API endpoints for reviews

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::ApiError;
use crate::db::models::ListReviewsQuery;
use crate::model::{AnalysisReport, NewReview, ReviewRecord};
use crate::service::AnalysisService;

/// Query parameters for listing reviews
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReviewsParams {
    /// Page number (1-indexed, default: 1)
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
    /// Filter by restaurant
    pub restaurant_id: Option<String>,
    /// Filter by status (pending, genuine, fake)
    pub status: Option<String>,
}

/// Paginated response for reviews
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewRecord>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}

/// Response for a newly ingested review
#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub review_id: String,
    pub status: String,
}

/// Ingest a new review in pending state
#[utoipa::path(
    post,
    path = "/v1/reviews",
    request_body = NewReview,
    responses(
        (status = 201, description = "Review ingested", body = IngestResponse),
        (status = 400, description = "Invalid review"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reviews"
)]
#[post("/v1/reviews")]
pub async fn ingest_review(
    service: web::Data<AnalysisService>,
    body: web::Json<NewReview>,
) -> Result<impl Responder, ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("review text must not be empty".to_string()));
    }

    let review_id = service.ingest(&body).await?;

    Ok(HttpResponse::Created().json(IngestResponse {
        review_id,
        status: "pending".to_string(),
    }))
}

/// List reviews with pagination and filters
#[utoipa::path(
    get,
    path = "/v1/reviews",
    params(ListReviewsParams),
    responses(
        (status = 200, description = "Reviews retrieved successfully", body = ReviewListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "reviews"
)]
#[get("/v1/reviews")]
pub async fn list_reviews(
    service: web::Data<AnalysisService>,
    query: web::Query<ListReviewsParams>,
) -> Result<impl Responder, ApiError> {
    let db_query = ListReviewsQuery {
        page: query.page,
        page_size: query.page_size,
        restaurant_id: query.restaurant_id.clone(),
        status: query.status.clone(),
    };

    let paginated = service.list_reviews(db_query).await?;

    Ok(HttpResponse::Ok().json(ReviewListResponse {
        reviews: paginated.reviews,
        page: paginated.page,
        page_size: paginated.page_size,
        total_count: paginated.total_count,
        total_pages: paginated.total_pages,
    }))
}

/// Get a review by ID
#[utoipa::path(
    get,
    path = "/v1/reviews/{id}",
    params(
        ("id" = String, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review retrieved successfully", body = ReviewRecord),
        (status = 404, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reviews"
)]
#[get("/v1/reviews/{id}")]
pub async fn get_review(
    service: web::Data<AnalysisService>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let review = service.get_review(&id).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// Analyze one review now and return the full report
#[utoipa::path(
    post,
    path = "/v1/reviews/{id}/analyze",
    params(
        ("id" = String, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review analyzed", body = AnalysisReport),
        (status = 404, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reviews"
)]
#[post("/v1/reviews/{id}/analyze")]
pub async fn analyze_review(
    service: web::Data<AnalysisService>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let report = service.analyze_review(&id).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure review routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ingest_review)
        .service(list_reviews)
        .service(get_review)
        .service(analyze_review);
}
