//! Classifier output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::signals::{Entity, KeyPhrase, LanguageCode, SentimentLabel, SentimentScores};

/// Final fake/genuine decision for one review.
///
/// `is_fake` is true iff at least one fake-indicating rule fired.
/// `confidence` is the maximum of the contributions of the rules that fired,
/// never a sum or average. Reasons accumulate across rules; the fallback
/// reason appears only when nothing fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub is_fake: bool,
    pub confidence: f64,
    pub reasons: Vec<String>,
}

/// Complete analysis output for one review, merged into the stored record
/// and returned by the analyze endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    pub language: LanguageCode,
    pub sentiment: SentimentLabel,
    pub sentiment_scores: SentimentScores,
    /// Top 10 key phrases by extractor relevance
    pub key_phrases: Vec<KeyPhrase>,
    /// Top 5 entities by extractor relevance
    pub entities: Vec<Entity>,
    pub is_fake: bool,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}
