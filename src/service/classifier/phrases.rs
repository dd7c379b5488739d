//! Canonical phrase lists used by the rule cascade

use std::collections::HashMap;

use crate::model::LocaleIndicators;

/// Phrases typical of fabricated positive reviews, matched as substrings of
/// extracted key phrases
pub const FAKE_POSITIVE_PHRASES: &[&str] = &[
    "best ever",
    "amazing experience",
    "perfect place",
    "highly recommend",
    "five stars",
    "5 stars",
    "outstanding service",
    "will definitely come back",
];

/// Phrases typical of fabricated negative reviews
pub const FAKE_NEGATIVE_PHRASES: &[&str] = &[
    "worst ever",
    "terrible experience",
    "never again",
    "waste of money",
    "disgusting food",
    "horrible service",
    "one star",
    "1 star",
];

/// Keywords scanned against the raw text in degraded mode, when no
/// extractor signals are available
pub const BASIC_FAKE_INDICATORS: &[&str] = &[
    "amazing",
    "perfect",
    "best ever",
    "highly recommend",
    "five stars",
];

/// Per-language fake-indicator lists, keyed by language code
pub type LocaleTable = HashMap<String, LocaleIndicators>;

const MS_INDICATORS: &[&str] = &[
    "sangat hebat",
    "terbaik sekali",
    "pasti datang lagi",
    "lima bintang",
];

/// Build the locale indicator table: built-in entries first, then config
/// entries, which may add languages or replace a built-in list.
pub fn locale_table(configured: &LocaleTable) -> LocaleTable {
    let mut table = LocaleTable::new();

    // Built-in Bahasa Melayu list; thresholds for other languages are not
    // defaulted and must come from configuration.
    table.insert(
        "ms".to_string(),
        LocaleIndicators {
            name: "Bahasa Melayu".to_string(),
            indicators: MS_INDICATORS.iter().map(|s| s.to_string()).collect(),
            min_matches: 2,
            confidence: 0.7,
        },
    );

    for (lang, entry) in configured {
        table.insert(lang.clone(), entry.clone());
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_malay_entry() {
        let table = locale_table(&LocaleTable::new());
        let ms = table.get("ms").unwrap();
        assert_eq!(ms.min_matches, 2);
        assert!(ms.indicators.contains(&"lima bintang".to_string()));
    }

    #[test]
    fn configured_entry_replaces_builtin() {
        let mut configured = LocaleTable::new();
        configured.insert(
            "ms".to_string(),
            LocaleIndicators {
                name: "Bahasa Melayu".to_string(),
                indicators: vec!["memang padu".to_string()],
                min_matches: 1,
                confidence: 0.65,
            },
        );

        let table = locale_table(&configured);
        let ms = table.get("ms").unwrap();
        assert_eq!(ms.min_matches, 1);
        assert_eq!(ms.indicators.len(), 1);
    }
}
