//! Database models for stored reviews

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::model::{AnalysisReport, ReviewRecord, ReviewStatus};

/// Database representation of a review
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub review_id: String,
    pub restaurant_id: String,
    pub author_name: Option<String>,
    pub rating: Option<i16>,
    pub review_text: String,
    pub declared_language: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub analysis: Option<serde_json::Value>,
}

impl ReviewRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<ReviewRecord, String> {
        let status = ReviewStatus::parse(&self.status)
            .ok_or_else(|| format!("Invalid review status: {}", self.status))?;

        let analysis: Option<AnalysisReport> = self
            .analysis
            .and_then(|value| serde_json::from_value(value).ok());

        Ok(ReviewRecord {
            id: self.review_id,
            restaurant_id: self.restaurant_id,
            author_name: self.author_name,
            rating: self.rating,
            text: self.review_text,
            declared_language: self.declared_language,
            status,
            created_at: self.created_at,
            analyzed_at: self.analyzed_at,
            analysis,
        })
    }
}

/// Query parameters for listing reviews
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListReviewsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub restaurant_id: Option<String>,
    pub status: Option<String>,
}

/// Paginated response for reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedReviews {
    pub reviews: Vec<ReviewRecord>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, analysis: Option<serde_json::Value>) -> ReviewRow {
        ReviewRow {
            review_id: "rev_123".to_string(),
            restaurant_id: "rest_42".to_string(),
            author_name: Some("Aina".to_string()),
            rating: Some(5),
            review_text: "Best ever, five stars".to_string(),
            declared_language: Some("en".to_string()),
            status: status.to_string(),
            created_at: Utc::now(),
            analyzed_at: None,
            analysis,
        }
    }

    #[test]
    fn pending_row_converts_without_analysis() {
        let record = row("pending", None).into_domain().unwrap();
        assert_eq!(record.status, ReviewStatus::Pending);
        assert!(record.analysis.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(row("archived", None).into_domain().is_err());
    }

    #[test]
    fn analysis_json_round_trips() {
        let analysis = serde_json::json!({
            "language": "en",
            "sentiment": "POSITIVE",
            "sentiment_scores": {"Positive": 0.97, "Negative": 0.0, "Neutral": 0.02, "Mixed": 0.0},
            "key_phrases": [{"text": "five stars"}],
            "entities": [],
            "is_fake": true,
            "confidence": 0.8,
            "reasons": ["Extremely positive sentiment (>95% confidence)"],
            "analyzed_at": "2026-08-01T10:00:00Z"
        });

        let record = row("fake", Some(analysis)).into_domain().unwrap();
        let report = record.analysis.unwrap();
        assert!(report.is_fake);
        assert_eq!(report.confidence, 0.8);
        assert_eq!(report.key_phrases.len(), 1);
    }
}
