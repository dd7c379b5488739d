//! Language resolution for review analysis
//!
//! A caller-declared language is trusted verbatim; only detector output is
//! coerced into the supported set. Empty text and detector failures degrade
//! to the default language, never to an error.

use crate::model::signals::UNKNOWN_LANGUAGE;
use crate::model::LanguageCode;

use super::SignalExtractor;

/// Resolve the language to analyze a review in.
///
/// Precedence:
/// 1. `declared` when present and not the "unknown" sentinel, used as-is;
/// 2. the extractor's highest-confidence candidate, coerced to "en" when
///    outside the supported set;
/// 3. "en" when detection fails or returns nothing.
pub async fn resolve_language(
    extractor: &dyn SignalExtractor,
    text: &str,
    declared: Option<&str>,
) -> LanguageCode {
    if let Some(lang) = declared {
        if !lang.is_empty() && lang != UNKNOWN_LANGUAGE {
            return LanguageCode::declared(lang);
        }
    }

    match extractor.detect_language(text).await {
        Ok(candidates) => match candidates.first() {
            Some(best) => {
                tracing::debug!(language = %best.language_code, score = best.score, "Detected language");
                LanguageCode::detected(&best.language_code)
            }
            None => LanguageCode::default_language(),
        },
        Err(e) => {
            tracing::debug!(error = %e, "Language detection failed, using default");
            LanguageCode::default_language()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, KeyPhrase, SentimentResult};
    use crate::nlp::{LanguageCandidate, NlpError};
    use async_trait::async_trait;

    /// Extractor stub returning canned language candidates
    struct FixedDetector {
        candidates: Result<Vec<LanguageCandidate>, ()>,
    }

    #[async_trait]
    impl SignalExtractor for FixedDetector {
        async fn detect_language(&self, _text: &str) -> Result<Vec<LanguageCandidate>, NlpError> {
            match &self.candidates {
                Ok(c) => Ok(c.clone()),
                Err(()) => Err(NlpError::ServiceError("detector down".to_string())),
            }
        }

        async fn sentiment(
            &self,
            _text: &str,
            _language: &LanguageCode,
        ) -> Result<SentimentResult, NlpError> {
            unimplemented!("not used in language tests")
        }

        async fn key_phrases(
            &self,
            _text: &str,
            _language: &LanguageCode,
        ) -> Result<Vec<KeyPhrase>, NlpError> {
            unimplemented!("not used in language tests")
        }

        async fn entities(
            &self,
            _text: &str,
            _language: &LanguageCode,
        ) -> Result<Vec<Entity>, NlpError> {
            unimplemented!("not used in language tests")
        }
    }

    fn candidate(code: &str, score: f64) -> LanguageCandidate {
        LanguageCandidate {
            language_code: code.to_string(),
            score,
        }
    }

    #[tokio::test]
    async fn declared_language_is_trusted_without_detection() {
        let detector = FixedDetector {
            candidates: Err(()),
        };
        let lang = resolve_language(&detector, "some text", Some("ms")).await;
        assert_eq!(lang.as_str(), "ms");
    }

    #[tokio::test]
    async fn unknown_sentinel_falls_through_to_detection() {
        let detector = FixedDetector {
            candidates: Ok(vec![candidate("fr", 0.92), candidate("en", 0.05)]),
        };
        let lang = resolve_language(&detector, "quelle horreur", Some("unknown")).await;
        assert_eq!(lang.as_str(), "fr");
    }

    #[tokio::test]
    async fn unsupported_detection_coerces_to_default() {
        let detector = FixedDetector {
            candidates: Ok(vec![candidate("tl", 0.88)]),
        };
        let lang = resolve_language(&detector, "masarap ito", None).await;
        assert_eq!(lang.as_str(), "en");
    }

    #[tokio::test]
    async fn detector_failure_degrades_to_default() {
        let detector = FixedDetector {
            candidates: Err(()),
        };
        let lang = resolve_language(&detector, "", None).await;
        assert_eq!(lang.as_str(), "en");
    }

    #[tokio::test]
    async fn empty_candidate_list_degrades_to_default() {
        let detector = FixedDetector {
            candidates: Ok(vec![]),
        };
        let lang = resolve_language(&detector, "short", None).await;
        assert_eq!(lang.as_str(), "en");
    }
}
