//! External NLP collaborators: the signal extractor contract and the
//! language resolution built on top of it
//!
//! The classifier never talks to a concrete NLP provider; it consumes the
//! [`SignalExtractor`] trait and tolerates per-call failure.

mod client;
pub mod language;

use async_trait::async_trait;

use crate::model::{Entity, KeyPhrase, LanguageCode, SentimentResult};

pub use client::NlpServiceClient;
pub use language::resolve_language;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NlpError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("NLP service error: {0}")]
    ServiceError(String),
}

/// Contract for the external NLP signal provider.
///
/// Each call fails only on transport or service errors, never on
/// malformed-but-nonempty text. Callers must treat every call as a network
/// call that can fail or time out.
#[async_trait]
pub trait SignalExtractor: Send + Sync {
    /// Best-guess language candidates for the text, highest confidence first
    async fn detect_language(&self, text: &str) -> Result<Vec<LanguageCandidate>, NlpError>;

    /// Sentiment label plus per-class scores
    async fn sentiment(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<SentimentResult, NlpError>;

    /// Key phrases ranked by extractor-assigned relevance
    async fn key_phrases(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<Vec<KeyPhrase>, NlpError>;

    /// Named entities ranked by extractor-assigned relevance
    async fn entities(&self, text: &str, language: &LanguageCode)
        -> Result<Vec<Entity>, NlpError>;
}

/// One language detection candidate
#[derive(Debug, Clone)]
pub struct LanguageCandidate {
    pub language_code: String,
    pub score: f64,
}
