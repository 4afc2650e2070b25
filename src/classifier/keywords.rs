// Local keyword fallback used when the classification service is unavailable
// Pure function of the input text, the static table and the catalog; never fails

use crate::classifier::intent::{find_intent, ClassifiedIntent, Intent};

/// Score at which the fallback reports full confidence
const FULL_CONFIDENCE_SCORE: f64 = 3.0;

/// Intent names mapped to trigger phrases, in tie-breaking order
pub const KEYWORD_TABLE: &[(&str, &[&str])] = &[
    (
        "Immediate Payment",
        &["pay now", "pay today", "paying now", "will pay"],
    ),
    (
        "Promise to Pay",
        &["will pay", "promise", "next week", "by friday"],
    ),
    ("Partial Payment", &["partial", "some money", "part of", "half"]),
    (
        "Financial Hardship",
        &["lost job", "no money", "financial difficulty", "can't afford"],
    ),
    ("Loan Dispute", &["not mine", "wrong", "dispute", "never took"]),
    ("Refusal to Pay", &["won't pay", "refuse", "not paying", "never"]),
    (
        "Request for Extension",
        &["more time", "extend", "delay", "later"],
    ),
];

/// Keyword score of every table entry for `text`, in table order
///
/// Each phrase found in the lowercased text adds its word count.
pub fn score_text(text: &str) -> Vec<(&'static str, usize)> {
    let text = text.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .map(|(name, phrases)| {
            let score = phrases
                .iter()
                .filter(|phrase| text.contains(*phrase))
                .map(|phrase| phrase.split_whitespace().count())
                .sum();
            (*name, score)
        })
        .collect()
}

/// Classify `text` against the catalog using the keyword table
///
/// Only table entries present in the catalog compete; the first entry with the
/// strictly highest score wins. Without any hit the result is a neutral
/// "Unknown" intent with confidence 0.
pub fn fallback_classify(text: &str, catalog: &[Intent]) -> ClassifiedIntent {
    let mut best: Option<(&Intent, usize)> = None;

    for (name, score) in score_text(text) {
        if score == 0 {
            continue;
        }
        let Some(intent) = find_intent(catalog, name) else {
            continue;
        };
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((intent, score));
        }
    }

    match best {
        Some((intent, score)) => {
            let confidence = (score as f64 / FULL_CONFIDENCE_SCORE).min(1.0);
            ClassifiedIntent::new(intent.clone(), confidence)
        }
        None => ClassifiedIntent::unknown(None, "Could not classify intent", 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reinforcement::state::ImpactType;

    fn full_catalog() -> Vec<Intent> {
        KEYWORD_TABLE
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                let impact = match *name {
                    "Immediate Payment" | "Promise to Pay" | "Partial Payment" => {
                        ImpactType::Positive
                    }
                    "Request for Extension" => ImpactType::Neutral,
                    _ => ImpactType::Negative,
                };
                Intent::new((i + 1).to_string(), *name, impact, "", 0.0)
            })
            .collect()
    }

    #[test]
    fn test_no_hits_yields_unknown_with_zero_confidence() {
        let result = fallback_classify("hello there", &full_catalog());
        assert_eq!(result.name(), "Unknown");
        assert_eq!(result.impact(), ImpactType::Neutral);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_empty_text_and_empty_catalog_never_fail() {
        assert!(fallback_classify("", &full_catalog()).is_unknown());
        assert!(fallback_classify("I will pay now", &[]).is_unknown());
    }

    #[test]
    fn test_phrase_word_count_weights_score() {
        let scores = score_text("I WILL PAY next week");
        assert_eq!(scores[0], ("Immediate Payment", 2));
        assert_eq!(scores[1], ("Promise to Pay", 4));
    }

    #[test]
    fn test_higher_score_wins_over_declaration_order() {
        let result = fallback_classify("I will pay next week", &full_catalog());
        assert_eq!(result.name(), "Promise to Pay");
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_ties_resolve_to_first_table_entry() {
        // "will pay" scores 2 for both Immediate Payment and Promise to Pay
        let result = fallback_classify("ok I will pay", &full_catalog());
        assert_eq!(result.name(), "Immediate Payment");
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_entries_missing_from_catalog_are_skipped() {
        let catalog = vec![Intent::new(
            "1",
            "Immediate Payment",
            ImpactType::Positive,
            "",
            1.0,
        )];
        let result = fallback_classify("I will pay next week", &catalog);
        assert_eq!(result.name(), "Immediate Payment");
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_refusal_is_detected() {
        let result = fallback_classify("I refuse, I'm not paying", &full_catalog());
        assert_eq!(result.name(), "Refusal to Pay");
        assert_eq!(result.impact(), ImpactType::Negative);
        // "refuse" (1) + "not paying" (2)
        assert_eq!(result.confidence, 1.0);
    }
}
