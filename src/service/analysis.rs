//! Review analysis orchestration
//!
//! Glues the classifier to the stored reviews: selects the reviews to
//! analyze, classifies each one independently, and persists the verdicts.
//! One review failing never aborts the rest of a batch.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::{ListReviewsQuery, PaginatedReviews};
use crate::db::repository::ReviewRepository;
use crate::db::DbError;
use crate::model::{AnalysisReport, NewReview, ReviewRecord};
use crate::service::cache::{analysis_cache_key, AnalysisCache};
use crate::service::classifier::FakeReviewClassifier;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error("Database error: {0}")]
    DbError(#[from] DbError),

    #[error("Invalid batch selector: {0}")]
    InvalidSelector(&'static str),
}

/// Which pending reviews a batch run should pick up. Exactly one selector
/// must be set.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BatchSelector {
    /// Analyze these specific reviews
    #[serde(default)]
    pub review_ids: Option<Vec<String>>,
    /// Analyze all pending reviews for one restaurant
    #[serde(default)]
    pub restaurant_id: Option<String>,
    /// Analyze all pending reviews, capped by the repository scan limit
    #[serde(default)]
    pub analyze_all_pending: Option<bool>,
}

/// Outcome of a batch analysis run
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchOutcome {
    pub analyzed_count: usize,
    pub failed_count: usize,
    pub total_reviews: usize,
}

/// Service orchestrating review classification and persistence
pub struct AnalysisService {
    repository: ReviewRepository,
    classifier: FakeReviewClassifier,
    cache: Option<AnalysisCache>,
}

impl AnalysisService {
    pub fn new(
        repository: ReviewRepository,
        classifier: FakeReviewClassifier,
        cache: Option<AnalysisCache>,
    ) -> Self {
        Self {
            repository,
            classifier,
            cache,
        }
    }

    /// Ingest a new review in `pending` state
    pub async fn ingest(&self, review: &NewReview) -> Result<String, AnalysisServiceError> {
        let id = self.repository.insert(review).await?;
        tracing::info!(review_id = %id, restaurant_id = %review.restaurant_id, "Review ingested");
        Ok(id)
    }

    /// Get a review by ID
    pub async fn get_review(&self, id: &str) -> Result<ReviewRecord, AnalysisServiceError> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// List reviews with pagination and filters
    pub async fn list_reviews(
        &self,
        query: ListReviewsQuery,
    ) -> Result<PaginatedReviews, AnalysisServiceError> {
        Ok(self.repository.list(query).await?)
    }

    /// Analyze one stored review now and persist the result
    pub async fn analyze_review(&self, id: &str) -> Result<AnalysisReport, AnalysisServiceError> {
        let review = self.repository.get_by_id(id).await?;
        let report = self.classify(&review).await;
        self.repository.apply_analysis(&review.id, &report).await?;

        tracing::info!(
            review_id = %review.id,
            is_fake = report.is_fake,
            confidence = report.confidence,
            "Review analyzed"
        );

        Ok(report)
    }

    /// Run a batch of analyses over the selected pending reviews.
    ///
    /// Failures are isolated per review: an errored item is logged and
    /// counted, and the run continues with the remaining reviews.
    pub async fn run_batch(
        &self,
        selector: &BatchSelector,
    ) -> Result<BatchOutcome, AnalysisServiceError> {
        let reviews = self.select_reviews(selector).await?;
        let total_reviews = reviews.len();

        if reviews.is_empty() {
            tracing::info!("No reviews to analyze");
            return Ok(BatchOutcome {
                analyzed_count: 0,
                failed_count: 0,
                total_reviews: 0,
            });
        }

        tracing::info!(count = total_reviews, "Starting batch analysis");

        let mut analyzed_count = 0;
        let mut failed_count = 0;

        for review in &reviews {
            let report = self.classify(review).await;

            match self.repository.apply_analysis(&review.id, &report).await {
                Ok(()) => analyzed_count += 1,
                Err(e) => {
                    tracing::error!(review_id = %review.id, error = %e, "Failed to persist analysis, skipping review");
                    failed_count += 1;
                }
            }
        }

        tracing::info!(
            analyzed = analyzed_count,
            failed = failed_count,
            total = total_reviews,
            "Batch analysis finished"
        );

        Ok(BatchOutcome {
            analyzed_count,
            failed_count,
            total_reviews,
        })
    }

    async fn select_reviews(
        &self,
        selector: &BatchSelector,
    ) -> Result<Vec<ReviewRecord>, AnalysisServiceError> {
        if let Some(ref ids) = selector.review_ids {
            return Ok(self.repository.get_by_ids(ids).await?);
        }

        if let Some(ref restaurant_id) = selector.restaurant_id {
            return Ok(self.repository.pending_by_restaurant(restaurant_id).await?);
        }

        if selector.analyze_all_pending == Some(true) {
            return Ok(self.repository.all_pending().await?);
        }

        Err(AnalysisServiceError::InvalidSelector(
            "must specify review_ids, restaurant_id, or analyze_all_pending",
        ))
    }

    /// Classify one review, consulting the report cache when available.
    /// Cache errors are downgraded to log-and-continue.
    async fn classify(&self, review: &ReviewRecord) -> AnalysisReport {
        let key = analysis_cache_key(&review.text, review.declared_language.as_deref());

        if let Some(ref cache) = self.cache {
            match cache.get_analysis::<AnalysisReport>(&key).await {
                Ok(report) => {
                    tracing::debug!(review_id = %review.id, "Analysis cache hit");
                    return report;
                }
                Err(crate::service::cache::CacheError::Miss(_)) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Analysis cache read failed, classifying fresh");
                }
            }
        }

        let report = self
            .classifier
            .analyze(&review.text, review.declared_language.as_deref())
            .await;

        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.set_analysis(&key, &report).await {
                tracing::warn!(error = %e, "Failed to cache analysis report");
            }
        }

        report
    }
}
