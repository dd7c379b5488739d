//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::repository::ReviewRepository;
use crate::model::Config;
use crate::nlp::NlpServiceClient;
use crate::service::{AnalysisCache, AnalysisService, FakeReviewClassifier};

/// Application state containing all services and shared resources
///
/// This struct centralizes service initialization and makes it easy to inject
/// dependencies into Actix-web handlers.
pub struct AppState {
    /// Database connection pool
    pub db_pool: Arc<PgPool>,
    /// Redis cache (optional)
    pub cache: Option<AnalysisCache>,
    /// NLP signal extractor client, shared with the readiness probe
    pub nlp_client: Arc<NlpServiceClient>,
    /// Review analysis service
    pub analysis_service: Arc<AnalysisService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Database connection and schema initialization
    /// 2. Redis cache initialization (optional)
    /// 3. NLP client construction
    /// 4. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Initialize PostgreSQL database
        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Initialize database schema
        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Initialize Redis cache (optional - will log warning if Redis is unavailable)
        let cache = match AnalysisCache::new().await {
            Ok(cache) => {
                tracing::info!("Redis cache enabled");
                Some(cache)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Redis cache unavailable, running without cache");
                None
            }
        };

        let nlp_client = Arc::new(
            NlpServiceClient::new(&config.nlp_endpoint, config.nlp_timeout_secs)
                .map_err(|e| AppError::Configuration(e.to_string()))?,
        );

        let repository = ReviewRepository::new(db_pool.clone());
        let classifier = FakeReviewClassifier::new(nlp_client.clone(), &config.locale_indicators);
        let analysis_service = Arc::new(AnalysisService::new(
            repository,
            classifier,
            cache.clone(),
        ));

        Ok(Self {
            db_pool: Arc::new(db_pool),
            cache,
            nlp_client,
            analysis_service,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
