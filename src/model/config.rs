use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

const ENV_CONFIG_PATH: &str = "TRUSTBITES_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_NLP_ENDPOINT: &str = "TRUSTBITES_NLP_ENDPOINT";
const DEFAULT_NLP_ENDPOINT: &str = "http://127.0.0.1:9200";

const ENV_NLP_TIMEOUT_SECS: &str = "TRUSTBITES_NLP_TIMEOUT_SECS";
const DEFAULT_NLP_TIMEOUT_SECS: u64 = 10;

/// Locale-specific fake-indicator list for one language.
///
/// Configured entries must spell out their own threshold and confidence;
/// there is no inherited default for languages added via configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleIndicators {
    /// Human-readable language name used in the emitted reason
    pub name: String,
    /// Idioms counted as substrings of the lowercased review text
    pub indicators: Vec<String>,
    /// Minimum distinct indicator hits before the rule fires
    pub min_matches: usize,
    /// Confidence contribution when the rule fires
    pub confidence: f64,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Extra per-language indicator lists, keyed by language code.
    /// Entries here extend or replace the built-in tables.
    #[serde(default)]
    pub locale_indicators: HashMap<String, LocaleIndicators>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub nlp_endpoint: String,
    pub nlp_timeout_secs: u64,
    pub locale_indicators: HashMap<String, LocaleIndicators>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            nlp_endpoint: DEFAULT_NLP_ENDPOINT.to_string(),
            nlp_timeout_secs: DEFAULT_NLP_TIMEOUT_SECS,
            locale_indicators: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let nlp_endpoint =
            std::env::var(ENV_NLP_ENDPOINT).unwrap_or_else(|_| DEFAULT_NLP_ENDPOINT.to_string());

        let nlp_timeout_secs = std::env::var(ENV_NLP_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_NLP_TIMEOUT_SECS);

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let locale_indicators = Self::load_config_file(&config_path)
            .map(|cf| cf.locale_indicators)
            .unwrap_or_default();

        Self {
            host,
            port,
            nlp_endpoint,
            nlp_timeout_secs,
            locale_indicators,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_indicator_config_parses() {
        let yaml = r#"
locale_indicators:
  id:
    name: Bahasa Indonesia
    indicators:
      - sangat bagus
      - pasti kembali
    min_matches: 2
    confidence: 0.7
"#;
        let cf: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        let id = cf.locale_indicators.get("id").unwrap();
        assert_eq!(id.name, "Bahasa Indonesia");
        assert_eq!(id.indicators.len(), 2);
        assert_eq!(id.min_matches, 2);
        assert!((id.confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_config_has_no_locale_entries() {
        let cf: ConfigFile = serde_yaml::from_str("{}").unwrap();
        assert!(cf.locale_indicators.is_empty());
    }
}
