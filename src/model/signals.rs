//! NLP signal types consumed by the classifier
//!
//! These mirror the output contract of the external signal extractor:
//! sentiment with per-class scores, ranked key phrases, and typed entities.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Languages the extractor accepts. Detection results outside this set are
/// coerced to the default; declared languages are trusted as-is.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "ar", "hi", "ja", "ko", "zh", "zh-TW", "ms",
];

/// Default language when detection is unavailable or out of set
pub const DEFAULT_LANGUAGE: &str = "en";

/// Sentinel value meaning "no usable language hint"
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// A short language identifier (e.g. "en", "ms")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Wrap a caller-declared language without coercion
    pub fn declared(code: &str) -> Self {
        Self(code.to_string())
    }

    /// Wrap a detected language, coercing out-of-set codes to the default
    pub fn detected(code: &str) -> Self {
        if SUPPORTED_LANGUAGES.contains(&code) {
            Self(code.to_string())
        } else {
            Self(DEFAULT_LANGUAGE.to_string())
        }
    }

    pub fn default_language() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dominant sentiment label as reported by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
    Unknown,
}

/// Per-class sentiment probabilities in [0.0, 1.0].
///
/// The four scores are independent signals and are not required to sum to
/// 1.0. A key missing from the upstream payload deserializes as 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentimentScores {
    #[serde(rename = "Positive", default)]
    pub positive: f64,
    #[serde(rename = "Negative", default)]
    pub negative: f64,
    #[serde(rename = "Neutral", default)]
    pub neutral: f64,
    #[serde(rename = "Mixed", default)]
    pub mixed: f64,
}

/// Sentiment classification for one review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    pub scores: SentimentScores,
}

/// An extracted key phrase, ranked by extractor-assigned relevance
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeyPhrase {
    pub text: String,
}

/// Entity categories. The upstream set is open; unrecognized categories
/// collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    CommercialItem,
    Organization,
    Person,
    Location,
    Event,
    Date,
    Quantity,
    #[serde(other)]
    Other,
}

impl EntityType {
    /// Entity categories that count toward the promotional-density rule
    pub fn is_commercial(&self) -> bool {
        matches!(self, EntityType::CommercialItem | EntityType::Organization)
    }
}

/// A named entity with its category tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detected_language_in_set_is_kept() {
        assert_eq!(LanguageCode::detected("ms").as_str(), "ms");
        assert_eq!(LanguageCode::detected("zh-TW").as_str(), "zh-TW");
    }

    #[test]
    fn detected_language_out_of_set_coerces_to_default() {
        assert_eq!(LanguageCode::detected("tl").as_str(), "en");
        assert_eq!(LanguageCode::detected("").as_str(), "en");
    }

    #[test]
    fn declared_language_is_not_coerced() {
        assert_eq!(LanguageCode::declared("tl").as_str(), "tl");
    }

    #[test]
    fn missing_score_keys_default_to_zero() {
        let scores: SentimentScores = serde_json::from_str(r#"{"Positive": 0.97}"#).unwrap();
        assert_eq!(scores.positive, 0.97);
        assert_eq!(scores.negative, 0.0);
        assert_eq!(scores.mixed, 0.0);
    }

    #[test]
    fn unrecognized_entity_type_maps_to_other() {
        let entity: Entity =
            serde_json::from_str(r#"{"text": "tomorrow", "type": "TITLE"}"#).unwrap();
        assert_eq!(entity.entity_type, EntityType::Other);
        assert!(!entity.entity_type.is_commercial());
    }
}
