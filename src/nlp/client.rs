//! HTTP client for a Comprehend-compatible NLP service
//!
//! Each signal is a separate JSON POST. Request/response payloads follow the
//! provider's wire casing (`Text`, `LanguageCode`, `SentimentScore`, ...).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{Entity, KeyPhrase, LanguageCode, SentimentLabel, SentimentResult};

use super::{LanguageCandidate, NlpError, SignalExtractor};

const USER_AGENT: &str = concat!("trustbites-intel/", env!("CARGO_PKG_VERSION"));

/// Client for the external NLP signal service
#[derive(Clone)]
pub struct NlpServiceClient {
    client: Client,
    endpoint: Url,
}

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
    #[serde(rename = "LanguageCode", skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct DetectLanguageResponse {
    #[serde(rename = "Languages", default)]
    languages: Vec<DetectedLanguage>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguage {
    #[serde(rename = "LanguageCode")]
    language_code: String,
    #[serde(rename = "Score", default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct DetectSentimentResponse {
    #[serde(rename = "Sentiment")]
    sentiment: SentimentLabel,
    #[serde(rename = "SentimentScore", default)]
    sentiment_score: crate::model::SentimentScores,
}

#[derive(Debug, Deserialize)]
struct DetectKeyPhrasesResponse {
    #[serde(rename = "KeyPhrases", default)]
    key_phrases: Vec<WireKeyPhrase>,
}

#[derive(Debug, Deserialize)]
struct WireKeyPhrase {
    #[serde(rename = "Text")]
    text: String,
}

#[derive(Debug, Deserialize)]
struct DetectEntitiesResponse {
    #[serde(rename = "Entities", default)]
    entities: Vec<WireEntity>,
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "Type")]
    entity_type: crate::model::EntityType,
}

impl NlpServiceClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, NlpError> {
        let mut endpoint = Url::parse(endpoint)
            .map_err(|e| NlpError::ParseError(format!("invalid NLP endpoint: {}", e)))?;
        // Keep a trailing slash so operation paths join under the base path
        if !endpoint.path().ends_with('/') {
            endpoint.set_path(&format!("{}/", endpoint.path()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Ok(Self { client, endpoint })
    }

    /// Reachability probe for readiness reporting. Any HTTP response from
    /// the base endpoint counts as reachable; only transport failures
    /// (refused connection, DNS, timeout) are errors.
    pub async fn ping(&self) -> Result<(), NlpError> {
        self.client.get(self.endpoint.clone()).send().await?;
        Ok(())
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        operation: &str,
        request: &TextRequest<'_>,
    ) -> Result<T, NlpError> {
        let url = self
            .endpoint
            .join(operation)
            .map_err(|e| NlpError::ParseError(format!("{}: {}", operation, e)))?;

        let response = self
            .client
            .post(url)
            .header("User-Agent", USER_AGENT)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NlpError::ServiceError(format!(
                "{} returned HTTP {}: {}",
                operation, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NlpError::ParseError(format!("{}: {}", operation, e)))
    }
}

#[async_trait]
impl SignalExtractor for NlpServiceClient {
    async fn detect_language(&self, text: &str) -> Result<Vec<LanguageCandidate>, NlpError> {
        let response: DetectLanguageResponse = self
            .post(
                "detect-dominant-language",
                &TextRequest {
                    text,
                    language_code: None,
                },
            )
            .await?;

        Ok(response
            .languages
            .into_iter()
            .map(|l| LanguageCandidate {
                language_code: l.language_code,
                score: l.score,
            })
            .collect())
    }

    async fn sentiment(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<SentimentResult, NlpError> {
        let response: DetectSentimentResponse = self
            .post(
                "detect-sentiment",
                &TextRequest {
                    text,
                    language_code: Some(language.as_str()),
                },
            )
            .await?;

        Ok(SentimentResult {
            sentiment: response.sentiment,
            scores: response.sentiment_score,
        })
    }

    async fn key_phrases(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<Vec<KeyPhrase>, NlpError> {
        let response: DetectKeyPhrasesResponse = self
            .post(
                "detect-key-phrases",
                &TextRequest {
                    text,
                    language_code: Some(language.as_str()),
                },
            )
            .await?;

        Ok(response
            .key_phrases
            .into_iter()
            .map(|kp| KeyPhrase { text: kp.text })
            .collect())
    }

    async fn entities(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<Vec<Entity>, NlpError> {
        let response: DetectEntitiesResponse = self
            .post(
                "detect-entities",
                &TextRequest {
                    text,
                    language_code: Some(language.as_str()),
                },
            )
            .await?;

        Ok(response
            .entities
            .into_iter()
            .map(|e| Entity {
                text: e.text,
                entity_type: e.entity_type,
            })
            .collect())
    }
}
