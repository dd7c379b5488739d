//! Review records and their classification lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analysis::AnalysisReport;

/// Classification state of a stored review.
///
/// Every review starts `Pending`; a finished analysis moves it to one of the
/// terminal states and it is never re-opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Genuine,
    Fake,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Genuine => "genuine",
            ReviewStatus::Fake => "fake",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReviewStatus::Pending),
            "genuine" => Some(ReviewStatus::Genuine),
            "fake" => Some(ReviewStatus::Fake),
            _ => None,
        }
    }
}

/// A stored consumer review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewRecord {
    pub id: String,
    pub restaurant_id: String,
    pub author_name: Option<String>,
    /// Star rating 1-5 when the source platform provides one
    pub rating: Option<i16>,
    pub text: String,
    /// Language declared by the source platform, if any. The sentinel
    /// "unknown" means no usable hint.
    pub declared_language: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub analyzed_at: Option<DateTime<Utc>>,
    /// Full analysis report, present once the review leaves `pending`
    pub analysis: Option<AnalysisReport>,
}

/// Payload for ingesting a new review
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewReview {
    pub restaurant_id: String,
    pub text: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<i16>,
    #[serde(default)]
    pub declared_language: Option<String>,
}
