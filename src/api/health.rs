//! Liveness and readiness endpoints
//!
//! Readiness gates on the database alone: analysis degrades to basic mode
//! without the NLP service and runs uncached without Redis, so those two are
//! reported per dependency but never fail the probe.

use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::nlp::NlpServiceClient;
use crate::service::AnalysisCache;

#[derive(Serialize, ToSchema)]
pub struct LivenessResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub dependencies: DependencyStatus,
}

/// Per-dependency health as seen from this process
#[derive(Serialize, ToSchema)]
pub struct DependencyStatus {
    /// `healthy` or `unhealthy`; an unhealthy database fails the probe
    pub database: String,
    /// `enabled` or `disabled`; reviews are classified fresh without Redis
    pub cache: String,
    /// `reachable` or `unreachable`; analysis degrades to basic keyword
    /// mode while the extractor is away
    pub nlp: String,
}

/// Liveness probe: the process is up and serving requests
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = LivenessResponse)
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(LivenessResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe: checks the database and reports the NLP extractor and
/// cache alongside it
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    ),
    tag = "health"
)]
#[get("/health/ready")]
pub async fn readiness(
    db_pool: web::Data<PgPool>,
    cache: web::Data<Option<AnalysisCache>>,
    nlp: web::Data<NlpServiceClient>,
) -> impl Responder {
    let database_ok = match sqlx::query("SELECT 1").fetch_one(db_pool.get_ref()).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(error = %e, "Database readiness check failed");
            false
        }
    };

    let nlp_status = match nlp.ping().await {
        Ok(()) => "reachable",
        Err(e) => {
            tracing::warn!(error = %e, "NLP service unreachable, analysis will degrade");
            "unreachable"
        }
    };

    let cache_status = match cache.as_ref() {
        Some(_) => "enabled",
        None => "disabled",
    };

    let response = ReadinessResponse {
        status: if database_ok { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dependencies: DependencyStatus {
            database: if database_ok { "healthy" } else { "unhealthy" }.to_string(),
            cache: cache_status.to_string(),
            nlp: nlp_status.to_string(),
        },
    };

    if database_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(readiness);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};

    #[actix_web::test]
    async fn liveness_always_reports_ok() {
        let app = actix_test::init_service(App::new().service(liveness)).await;
        let req = actix_test::TestRequest::get().uri("/health/live").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[test]
    fn readiness_payload_reports_every_dependency() {
        let response = ReadinessResponse {
            status: "ready".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            dependencies: DependencyStatus {
                database: "healthy".to_string(),
                cache: "disabled".to_string(),
                nlp: "unreachable".to_string(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["dependencies"]["database"], "healthy");
        assert_eq!(json["dependencies"]["cache"], "disabled");
        assert_eq!(json["dependencies"]["nlp"], "unreachable");
    }
}
