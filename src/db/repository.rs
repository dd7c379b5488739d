//! Repository for review database operations
//!
//! Also the review record updater: applying an analysis report is the only
//! way a review leaves the `pending` state.

use sqlx::PgPool;

use super::models::{ListReviewsQuery, PaginatedReviews, ReviewRow};
use super::DbError;
use crate::model::{AnalysisReport, NewReview, ReviewRecord, ReviewStatus};

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Limit applied when scanning for all pending reviews in one batch run
const PENDING_SCAN_LIMIT: i64 = 100;

/// Repository for review operations
#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new review in `pending` state, returning its generated id
    pub async fn insert(&self, review: &NewReview) -> Result<String, DbError> {
        let review_id = format!("rev_{}", uuid::Uuid::new_v4().simple());

        sqlx::query(
            r#"
            INSERT INTO reviews (
                review_id, restaurant_id, author_name, rating,
                review_text, declared_language, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&review_id)
        .bind(&review.restaurant_id)
        .bind(&review.author_name)
        .bind(review.rating)
        .bind(&review.text)
        .bind(&review.declared_language)
        .bind(ReviewStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!(review_id = %review_id, "Inserted review");
        Ok(review_id)
    }

    /// Get a review by ID
    pub async fn get_by_id(&self, id: &str) -> Result<ReviewRecord, DbError> {
        let row: ReviewRow = sqlx::query_as(
            r#"
            SELECT * FROM reviews WHERE review_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }

    /// Get specific reviews by their IDs. IDs with no matching row are
    /// skipped, not errors; batch callers handle missing reviews themselves.
    pub async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<ReviewRecord>, DbError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT * FROM reviews WHERE review_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect())
    }

    /// Get all pending reviews for a restaurant
    pub async fn pending_by_restaurant(
        &self,
        restaurant_id: &str,
    ) -> Result<Vec<ReviewRecord>, DbError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT * FROM reviews
            WHERE restaurant_id = $1 AND status = $2
            ORDER BY created_at
            "#,
        )
        .bind(restaurant_id)
        .bind(ReviewStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect())
    }

    /// Get all pending reviews, capped to keep batch runs bounded
    pub async fn all_pending(&self) -> Result<Vec<ReviewRecord>, DbError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT * FROM reviews
            WHERE status = $1
            ORDER BY created_at
            LIMIT $2
            "#,
        )
        .bind(ReviewStatus::Pending.as_str())
        .bind(PENDING_SCAN_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect())
    }

    /// Apply a finished analysis to a review, moving it to a terminal status
    /// and stamping the analysis timestamp
    pub async fn apply_analysis(
        &self,
        review_id: &str,
        report: &AnalysisReport,
    ) -> Result<(), DbError> {
        let status = if report.is_fake {
            ReviewStatus::Fake
        } else {
            ReviewStatus::Genuine
        };

        let analysis_json = serde_json::to_value(report)
            .map_err(|e| DbError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET status = $2, analysis = $3, analyzed_at = $4
            WHERE review_id = $1
            "#,
        )
        .bind(review_id)
        .bind(status.as_str())
        .bind(&analysis_json)
        .bind(report.analyzed_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(review_id.to_string()));
        }

        tracing::debug!(review_id = %review_id, status = %status.as_str(), "Applied review analysis");
        Ok(())
    }

    /// List reviews with pagination and filters
    pub async fn list(&self, query: ListReviewsQuery) -> Result<PaginatedReviews, DbError> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).min(100);
        let offset = (page - 1) * page_size;

        // Build dynamic query
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref rid) = query.restaurant_id {
            params.push(rid.clone());
            conditions.push(format!("restaurant_id = ${}", params.len()));
        }

        if let Some(ref status) = query.status {
            params.push(status.clone());
            conditions.push(format!("status = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Get total count
        let count_query = format!("SELECT COUNT(*) as count FROM reviews {}", where_clause);

        let total_count: i64 = {
            let mut q = sqlx::query_scalar(&count_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_one(&self.pool).await?
        };

        // Get reviews
        let select_query = format!(
            r#"
            SELECT * FROM reviews
            {}
            ORDER BY created_at DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, page_size, offset
        );

        let rows: Vec<ReviewRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool).await?
        };

        let reviews: Vec<ReviewRecord> = rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect();

        let total_pages = ((total_count as f64) / (page_size as f64)).ceil() as u32;

        Ok(PaginatedReviews {
            reviews,
            page,
            page_size,
            total_count,
            total_pages,
        })
    }
}
