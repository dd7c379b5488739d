//! The fake-detection rule cascade
//!
//! Every rule runs on every review; nothing short-circuits. The verdict is a
//! fold over the rules in declaration order: the fake flag is OR-ed, the
//! confidence takes the maximum contribution, reasons append. Ordering only
//! decides which reason appears first when several rules fire.

use crate::model::{Entity, KeyPhrase, LanguageCode, SentimentLabel, SentimentResult, Verdict};

use super::phrases::{FAKE_NEGATIVE_PHRASES, FAKE_POSITIVE_PHRASES, LocaleTable};

/// Starting confidence before any rule has fired
const BASELINE_CONFIDENCE: f64 = 0.5;

/// Confidence when the cascade found no evidence of fakeness. Low but
/// non-zero: "no evidence found" is weaker than "evidence of genuineness".
const NO_EVIDENCE_CONFIDENCE: f64 = 0.3;

const NO_EVIDENCE_REASON: &str = "No suspicious patterns detected";

const EXTREME_POSITIVE_THRESHOLD: f64 = 0.95;
const EXTREME_NEGATIVE_THRESHOLD: f64 = 0.9;
const SUSPICIOUS_PHRASE_MIN: usize = 3;
const SHORT_REVIEW_WORDS: usize = 5;
const LONG_REVIEW_WORDS: usize = 200;
const COMMERCIAL_ENTITY_MAX: usize = 3;

/// Everything a rule may look at for one review
pub struct RuleContext<'a> {
    pub language: &'a LanguageCode,
    pub sentiment: &'a SentimentResult,
    pub entities: &'a [Entity],
    pub locales: &'a LocaleTable,
    text_lower: String,
    key_phrases_lower: Vec<String>,
    word_count: usize,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        text: &'a str,
        language: &'a LanguageCode,
        sentiment: &'a SentimentResult,
        key_phrases: &'a [KeyPhrase],
        entities: &'a [Entity],
        locales: &'a LocaleTable,
    ) -> Self {
        Self {
            language,
            sentiment,
            entities,
            locales,
            text_lower: text.to_lowercase(),
            key_phrases_lower: key_phrases.iter().map(|kp| kp.text.to_lowercase()).collect(),
            word_count: text.split_whitespace().count(),
        }
    }
}

/// Contribution of a single fired rule
struct RuleOutcome {
    /// Whether this rule alone marks the review fake
    flags_fake: bool,
    confidence: f64,
    reason: String,
}

impl RuleOutcome {
    fn fake(confidence: f64, reason: String) -> Option<Self> {
        Some(Self {
            flags_fake: true,
            confidence,
            reason,
        })
    }

    /// An outcome that raises confidence without flipping the fake flag
    fn advisory(confidence: f64, reason: String) -> Option<Self> {
        Some(Self {
            flags_fake: false,
            confidence,
            reason,
        })
    }
}

type Rule = fn(&RuleContext) -> Option<RuleOutcome>;

/// Cascade order is part of the contract: it fixes the order of reasons
const RULES: &[Rule] = &[
    sentiment_extremity,
    suspicious_positive_phrases,
    suspicious_negative_phrases,
    length_outlier,
    locale_indicators,
    commercial_entity_density,
];

/// Run the full cascade and fold the outcomes into a verdict
pub fn run_cascade(ctx: &RuleContext) -> Verdict {
    let mut verdict = Verdict {
        is_fake: false,
        confidence: BASELINE_CONFIDENCE,
        reasons: Vec::new(),
    };

    for rule in RULES {
        if let Some(outcome) = rule(ctx) {
            verdict.is_fake |= outcome.flags_fake;
            verdict.confidence = verdict.confidence.max(outcome.confidence);
            verdict.reasons.push(outcome.reason);
        }
    }

    if verdict.reasons.is_empty() {
        verdict.reasons.push(NO_EVIDENCE_REASON.to_string());
        verdict.confidence = NO_EVIDENCE_CONFIDENCE;
    }

    verdict
}

/// Extreme sentiment in either direction. The positive and negative checks
/// are deliberately an if/else pair, not two independent rules: a POSITIVE
/// label below the threshold must also suppress the negative branch. Merging
/// them into independent rules would change outcomes on mixed-sentiment
/// input.
fn sentiment_extremity(ctx: &RuleContext) -> Option<RuleOutcome> {
    let scores = &ctx.sentiment.scores;

    if ctx.sentiment.sentiment == SentimentLabel::Positive
        && scores.positive > EXTREME_POSITIVE_THRESHOLD
    {
        RuleOutcome::fake(
            0.8,
            "Extremely positive sentiment (>95% confidence)".to_string(),
        )
    } else if ctx.sentiment.sentiment == SentimentLabel::Negative
        && scores.negative > EXTREME_NEGATIVE_THRESHOLD
    {
        RuleOutcome::fake(
            0.75,
            "Extremely negative sentiment (>90% confidence)".to_string(),
        )
    } else {
        None
    }
}

/// Count canonical phrases appearing as substrings of any extracted key
/// phrase. The count is over list entries, not key phrases.
fn count_phrase_hits(canonical: &[&str], key_phrases_lower: &[String]) -> usize {
    canonical
        .iter()
        .filter(|phrase| key_phrases_lower.iter().any(|kp| kp.contains(*phrase)))
        .count()
}

fn suspicious_positive_phrases(ctx: &RuleContext) -> Option<RuleOutcome> {
    let count = count_phrase_hits(FAKE_POSITIVE_PHRASES, &ctx.key_phrases_lower);
    if count >= SUSPICIOUS_PHRASE_MIN {
        RuleOutcome::fake(
            0.75,
            format!("Multiple suspicious positive phrases ({} found)", count),
        )
    } else {
        None
    }
}

fn suspicious_negative_phrases(ctx: &RuleContext) -> Option<RuleOutcome> {
    let count = count_phrase_hits(FAKE_NEGATIVE_PHRASES, &ctx.key_phrases_lower);
    if count >= SUSPICIOUS_PHRASE_MIN {
        RuleOutcome::fake(
            0.7,
            format!("Multiple suspicious negative phrases ({} found)", count),
        )
    } else {
        None
    }
}

/// Very short and very long reviews are both outliers; the ranges are
/// mutually exclusive so at most one branch fires.
fn length_outlier(ctx: &RuleContext) -> Option<RuleOutcome> {
    if ctx.word_count < SHORT_REVIEW_WORDS {
        RuleOutcome::fake(0.6, "Unusually short review (<5 words)".to_string())
    } else if ctx.word_count > LONG_REVIEW_WORDS {
        RuleOutcome::fake(0.65, "Unusually long review (>200 words)".to_string())
    } else {
        None
    }
}

/// Per-language idiom lists, looked up by the resolved language code.
/// Each table entry carries its own threshold and confidence.
fn locale_indicators(ctx: &RuleContext) -> Option<RuleOutcome> {
    let entry = ctx.locales.get(ctx.language.as_str())?;

    let count = entry
        .indicators
        .iter()
        .filter(|indicator| ctx.text_lower.contains(indicator.as_str()))
        .count();

    if count >= entry.min_matches {
        RuleOutcome::fake(
            entry.confidence,
            format!("Multiple {} fake indicators", entry.name),
        )
    } else {
        None
    }
}

/// Dense commercial mentions read as promotional, which is suspicious but
/// not sufficient on its own: this rule never sets the fake flag.
fn commercial_entity_density(ctx: &RuleContext) -> Option<RuleOutcome> {
    let count = ctx
        .entities
        .iter()
        .filter(|e| e.entity_type.is_commercial())
        .count();

    if count > COMMERCIAL_ENTITY_MAX {
        RuleOutcome::advisory(0.6, "Multiple commercial entity mentions".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityType, SentimentScores};
    use crate::service::classifier::phrases::locale_table;

    fn sentiment(label: SentimentLabel, scores: SentimentScores) -> SentimentResult {
        SentimentResult {
            sentiment: label,
            scores,
        }
    }

    fn neutral_sentiment() -> SentimentResult {
        sentiment(
            SentimentLabel::Neutral,
            SentimentScores {
                neutral: 0.8,
                ..Default::default()
            },
        )
    }

    fn key_phrases(texts: &[&str]) -> Vec<KeyPhrase> {
        texts
            .iter()
            .map(|t| KeyPhrase {
                text: t.to_string(),
            })
            .collect()
    }

    fn classify(
        text: &str,
        language: &str,
        sent: &SentimentResult,
        phrases: &[KeyPhrase],
        entities: &[Entity],
    ) -> Verdict {
        let language = LanguageCode::declared(language);
        let locales = locale_table(&LocaleTable::new());
        let ctx = RuleContext::new(text, &language, sent, phrases, entities, &locales);
        run_cascade(&ctx)
    }

    #[test]
    fn clean_review_is_genuine_with_baseline_reason() {
        let verdict = classify(
            "The laksa was rich and the staff remembered our usual order",
            "en",
            &neutral_sentiment(),
            &key_phrases(&["the laksa", "our usual order"]),
            &[],
        );

        assert!(!verdict.is_fake);
        assert_eq!(verdict.confidence, 0.3);
        assert_eq!(verdict.reasons, vec!["No suspicious patterns detected"]);
    }

    #[test]
    fn extreme_positive_sentiment_flags_fake() {
        let sent = sentiment(
            SentimentLabel::Positive,
            SentimentScores {
                positive: 0.97,
                ..Default::default()
            },
        );
        let verdict = classify(
            "Great food and lovely atmosphere, we enjoyed it",
            "en",
            &sent,
            &[],
            &[],
        );

        assert!(verdict.is_fake);
        assert!(verdict.confidence >= 0.8);
        assert_eq!(
            verdict.reasons,
            vec!["Extremely positive sentiment (>95% confidence)"]
        );
    }

    #[test]
    fn positive_at_threshold_does_not_fire() {
        let sent = sentiment(
            SentimentLabel::Positive,
            SentimentScores {
                positive: 0.95,
                ..Default::default()
            },
        );
        let verdict = classify(
            "Good meal overall, service was prompt and friendly enough",
            "en",
            &sent,
            &[],
            &[],
        );

        assert!(!verdict.is_fake);
    }

    #[test]
    fn extreme_negative_sentiment_flags_fake() {
        let sent = sentiment(
            SentimentLabel::Negative,
            SentimentScores {
                negative: 0.93,
                ..Default::default()
            },
        );
        let verdict = classify(
            "We waited an hour and the food arrived cold every time",
            "en",
            &sent,
            &[],
            &[],
        );

        assert!(verdict.is_fake);
        assert!(verdict.confidence >= 0.75);
        assert_eq!(
            verdict.reasons,
            vec!["Extremely negative sentiment (>90% confidence)"]
        );
    }

    #[test]
    fn positive_label_suppresses_negative_branch() {
        // POSITIVE label below threshold with a high Negative score must not
        // trigger the negative branch: the two checks are an if/else pair.
        let sent = sentiment(
            SentimentLabel::Positive,
            SentimentScores {
                positive: 0.5,
                negative: 0.95,
                ..Default::default()
            },
        );
        let verdict = classify(
            "Mixed feelings about this place but mostly fine I guess",
            "en",
            &sent,
            &[],
            &[],
        );

        assert!(!verdict.is_fake);
        assert_eq!(verdict.reasons, vec!["No suspicious patterns detected"]);
    }

    #[test]
    fn three_suspicious_positive_phrases_flag_fake() {
        let verdict = classify(
            "Honestly the best spot in town, you simply have to try it",
            "en",
            &neutral_sentiment(),
            &key_phrases(&["best ever food", "five stars always", "highly recommend this"]),
            &[],
        );

        assert!(verdict.is_fake);
        assert!(verdict.confidence >= 0.75);
        assert_eq!(
            verdict.reasons,
            vec!["Multiple suspicious positive phrases (3 found)"]
        );
    }

    #[test]
    fn two_phrase_hits_are_not_enough() {
        let verdict = classify(
            "Solid dinner with the family, portions were generous as always",
            "en",
            &neutral_sentiment(),
            &key_phrases(&["best ever rendang", "five stars from us"]),
            &[],
        );

        assert!(!verdict.is_fake);
    }

    #[test]
    fn suspicious_negative_phrases_flag_fake() {
        let verdict = classify(
            "Do yourself a favour and stay far away from this kitchen",
            "en",
            &neutral_sentiment(),
            &key_phrases(&[
                "worst ever meal",
                "a terrible experience",
                "total waste of money",
            ]),
            &[],
        );

        assert!(verdict.is_fake);
        assert!(verdict.confidence >= 0.7);
        assert_eq!(
            verdict.reasons,
            vec!["Multiple suspicious negative phrases (3 found)"]
        );
    }

    #[test]
    fn short_review_flags_fake_regardless_of_sentiment() {
        let verdict = classify("Nice food place", "en", &neutral_sentiment(), &[], &[]);

        assert!(verdict.is_fake);
        assert!(verdict.confidence >= 0.6);
        assert_eq!(verdict.reasons, vec!["Unusually short review (<5 words)"]);
    }

    #[test]
    fn long_review_flags_fake() {
        let text = "word ".repeat(201);
        let verdict = classify(&text, "en", &neutral_sentiment(), &[], &[]);

        assert!(verdict.is_fake);
        assert!(verdict.confidence >= 0.65);
        assert_eq!(verdict.reasons, vec!["Unusually long review (>200 words)"]);
    }

    #[test]
    fn five_word_review_is_not_short() {
        let verdict = classify(
            "Five words is just enough",
            "en",
            &neutral_sentiment(),
            &[],
            &[],
        );

        assert!(!verdict.is_fake);
    }

    #[test]
    fn malay_indicators_flag_fake_independent_of_other_signals() {
        let verdict = classify(
            "Restoran ini sangat hebat, memang lima bintang dari kami sekeluarga",
            "ms",
            &neutral_sentiment(),
            &[],
            &[],
        );

        assert!(verdict.is_fake);
        assert!(verdict.confidence >= 0.7);
        assert_eq!(verdict.reasons, vec!["Multiple Bahasa Melayu fake indicators"]);
    }

    #[test]
    fn malay_single_indicator_does_not_fire() {
        let verdict = classify(
            "Makanan di sini sangat hebat tetapi harganya agak mahal juga",
            "ms",
            &neutral_sentiment(),
            &[],
            &[],
        );

        assert!(!verdict.is_fake);
    }

    #[test]
    fn malay_indicators_ignored_for_english_reviews() {
        let verdict = classify(
            "They kept saying sangat hebat and lima bintang at the next table",
            "en",
            &neutral_sentiment(),
            &[],
            &[],
        );

        assert!(!verdict.is_fake);
    }

    #[test]
    fn commercial_entities_raise_confidence_without_flagging() {
        let entities: Vec<Entity> = ["BrandA", "BrandB", "BrandC", "BrandD"]
            .iter()
            .map(|name| Entity {
                text: name.to_string(),
                entity_type: EntityType::Organization,
            })
            .collect();

        let verdict = classify(
            "Their new menu collaboration features several partner brands this month",
            "en",
            &neutral_sentiment(),
            &[],
            &entities,
        );

        assert!(!verdict.is_fake);
        assert_eq!(verdict.confidence, 0.6);
        assert_eq!(verdict.reasons, vec!["Multiple commercial entity mentions"]);
    }

    #[test]
    fn three_commercial_entities_are_below_threshold() {
        let entities: Vec<Entity> = (0..3)
            .map(|i| Entity {
                text: format!("Brand{}", i),
                entity_type: EntityType::CommercialItem,
            })
            .collect();

        let verdict = classify(
            "A decent place that stocks a few well known drink brands",
            "en",
            &neutral_sentiment(),
            &[],
            &entities,
        );

        assert!(!verdict.is_fake);
        assert_eq!(verdict.reasons, vec!["No suspicious patterns detected"]);
    }

    #[test]
    fn independent_rules_accumulate_reasons() {
        // Extreme positive sentiment and phrase hits both fire; both reasons
        // appear in cascade order and confidence is the max, not a sum.
        let sent = sentiment(
            SentimentLabel::Positive,
            SentimentScores {
                positive: 0.97,
                ..Default::default()
            },
        );
        let verdict = classify(
            "Amazing! Best restaurant ever! Highly recommend! Five stars!",
            "en",
            &sent,
            &key_phrases(&[
                "best ever",
                "amazing experience",
                "highly recommend",
                "five stars",
            ]),
            &[],
        );

        assert!(verdict.is_fake);
        assert_eq!(verdict.confidence, 0.8);
        assert_eq!(
            verdict.reasons,
            vec![
                "Extremely positive sentiment (>95% confidence)",
                "Multiple suspicious positive phrases (4 found)",
            ]
        );
    }

    #[test]
    fn confidence_never_decreases_as_rules_fire() {
        // Short review (0.6) plus extreme positive (0.8): the weaker rule
        // must not pull the confidence back down.
        let sent = sentiment(
            SentimentLabel::Positive,
            SentimentScores {
                positive: 0.99,
                ..Default::default()
            },
        );
        let verdict = classify("So good wow", "en", &sent, &[], &[]);

        assert!(verdict.is_fake);
        assert_eq!(verdict.confidence, 0.8);
        assert_eq!(verdict.reasons.len(), 2);
    }

    #[test]
    fn cascade_is_deterministic() {
        let sent = neutral_sentiment();
        let phrases = key_phrases(&["best ever", "five stars", "highly recommend"]);
        let first = classify("Quick bite", "en", &sent, &phrases, &[]);
        let second = classify("Quick bite", "en", &sent, &phrases, &[]);
        assert_eq!(first, second);
    }
}
