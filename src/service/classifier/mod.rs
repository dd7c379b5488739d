//! Fake-review classification engine
//!
//! Orchestrates one review's analysis: resolve the language, gather the
//! three NLP signals, run the rule cascade, and assemble the report. The
//! engine never fails a request: extractor errors degrade to basic keyword
//! analysis instead of propagating.

pub mod phrases;
pub mod rules;

use std::sync::Arc;

use chrono::Utc;

use crate::model::{AnalysisReport, LanguageCode, SentimentLabel, Verdict};
use crate::nlp::{resolve_language, SignalExtractor};

use self::phrases::{locale_table, LocaleTable, BASIC_FAKE_INDICATORS};
use self::rules::{run_cascade, RuleContext};

/// Key phrases retained for the report and the cascade
const TOP_KEY_PHRASES: usize = 10;
/// Entities retained for the report and the cascade
const TOP_ENTITIES: usize = 5;

const BASIC_MODE_REASON: &str = "Basic keyword analysis";
const BASIC_FAKE_MIN: usize = 3;
const BASIC_FAKE_CONFIDENCE: f64 = 0.6;
const BASIC_GENUINE_CONFIDENCE: f64 = 0.4;

/// Stateless per-review classifier. Holds only its collaborator handle and
/// the locale indicator table; classification of one review never depends on
/// another.
pub struct FakeReviewClassifier {
    extractor: Arc<dyn SignalExtractor>,
    locales: LocaleTable,
}

impl FakeReviewClassifier {
    pub fn new(extractor: Arc<dyn SignalExtractor>, configured_locales: &LocaleTable) -> Self {
        Self {
            extractor,
            locales: locale_table(configured_locales),
        }
    }

    /// Analyze one review.
    ///
    /// Partial extractor failure is tolerated: a failed key-phrase or entity
    /// call becomes an empty set and the full cascade still runs. Only when
    /// sentiment is unavailable does the engine fall back to basic mode.
    pub async fn analyze(&self, text: &str, declared_language: Option<&str>) -> AnalysisReport {
        let language = resolve_language(self.extractor.as_ref(), text, declared_language).await;

        let (sentiment, key_phrases, entities) = futures::join!(
            self.extractor.sentiment(text, &language),
            self.extractor.key_phrases(text, &language),
            self.extractor.entities(text, &language),
        );

        let sentiment = match sentiment {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "Sentiment unavailable, degrading to basic analysis");
                return self.basic_report(text, language);
            }
        };

        let mut key_phrases = key_phrases.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Key phrase extraction failed, continuing without");
            Vec::new()
        });
        key_phrases.truncate(TOP_KEY_PHRASES);

        let mut entities = entities.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Entity extraction failed, continuing without");
            Vec::new()
        });
        entities.truncate(TOP_ENTITIES);

        let ctx = RuleContext::new(
            text,
            &language,
            &sentiment,
            &key_phrases,
            &entities,
            &self.locales,
        );
        let verdict = run_cascade(&ctx);

        AnalysisReport {
            language,
            sentiment: sentiment.sentiment,
            sentiment_scores: sentiment.scores,
            key_phrases,
            entities,
            is_fake: verdict.is_fake,
            confidence: verdict.confidence,
            reasons: verdict.reasons,
            analyzed_at: Utc::now(),
        }
    }

    /// Degraded analysis from the raw text alone
    fn basic_report(&self, text: &str, language: LanguageCode) -> AnalysisReport {
        let verdict = basic_verdict(text);

        AnalysisReport {
            language,
            sentiment: SentimentLabel::Unknown,
            sentiment_scores: Default::default(),
            key_phrases: Vec::new(),
            entities: Vec::new(),
            is_fake: verdict.is_fake,
            confidence: verdict.confidence,
            reasons: verdict.reasons,
            analyzed_at: Utc::now(),
        }
    }
}

/// Basic keyword scan, pure over the text and keyword list
pub fn basic_verdict(text: &str) -> Verdict {
    let text_lower = text.to_lowercase();
    let count = BASIC_FAKE_INDICATORS
        .iter()
        .filter(|indicator| text_lower.contains(*indicator))
        .count();

    let is_fake = count >= BASIC_FAKE_MIN;

    Verdict {
        is_fake,
        confidence: if is_fake {
            BASIC_FAKE_CONFIDENCE
        } else {
            BASIC_GENUINE_CONFIDENCE
        },
        reasons: vec![BASIC_MODE_REASON.to_string()],
    }
}
