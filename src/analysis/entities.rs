//! Entity extraction
//!
//! Combines the statistical recognizer with two fallback patterns. Recognizer
//! output is de-duplicated per category; pattern matches are appended as found,
//! so a date or amount the recognizer already saw can appear twice.

use once_cell::sync::Lazy;
use regex::Regex;

use super::models::{Entities, EntityCategory};
use super::ner::EntityRecognizer;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b\d{4}-\d{2}-\d{2}\b").unwrap()
});

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[\d,]+(?:\.\d{2})?|\b\d+(?:\.\d{2})?\s*(?:dollars?|USD|EUR|GBP)\b").unwrap()
});

/// Categorized entities found anywhere in `text`
pub fn extract_entities(recognizer: &EntityRecognizer, text: &str) -> Entities {
    let mut entities = Entities::new();

    let mut discarded = 0usize;
    for prediction in recognizer.recognize(text) {
        match EntityCategory::from_label(&prediction.label) {
            Some(category) => {
                entities.insert_unique(category, &prediction.text);
            }
            None => discarded += 1,
        }
    }

    entities.append(EntityCategory::Date, pattern_matches(&DATE_PATTERN, text));
    entities.append(EntityCategory::Money, pattern_matches(&MONEY_PATTERN, text));

    tracing::debug!(
        found = entities.len(),
        discarded,
        "extracted entities"
    );
    entities
}

fn pattern_matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Entities {
        let recognizer = EntityRecognizer::builtin().unwrap();
        extract_entities(&recognizer, text)
    }

    #[test]
    fn test_pattern_matches_are_appended_without_dedup() {
        let entities = extract(
            "This Agreement is made between Acme Corp and John Smith on 2023-01-15 for $5,000.",
        );
        assert_eq!(entities.get(EntityCategory::Date), ["2023-01-15", "2023-01-15"]);
        assert_eq!(entities.get(EntityCategory::Money), ["$5,000", "$5,000"]);
        assert_eq!(entities.get(EntityCategory::Org), ["Acme Corp"]);
        assert_eq!(entities.get(EntityCategory::Person), ["John Smith"]);
    }

    #[test]
    fn test_recognizer_entries_are_unique() {
        let entities = extract("Acme Corp pays. Acme Corp signs. Acme Corp leaves.");
        assert_eq!(entities.get(EntityCategory::Org), ["Acme Corp"]);
    }

    #[test]
    fn test_unsupported_labels_are_dropped() {
        let entities = extract("Compliance with the Fair Housing Act is required.");
        assert!(entities.is_empty());
        assert_eq!(entities.categories().count(), 6);
    }

    #[test]
    fn test_fallback_patterns() {
        let entities = extract("Due 12/31/2024 or 1-2-25; fee 100 EUR plus 20.50 dollars");
        let dates = entities.get(EntityCategory::Date);
        assert!(dates.contains(&"12/31/2024".to_string()));
        assert!(dates.contains(&"1-2-25".to_string()));
        let money = entities.get(EntityCategory::Money);
        assert!(money.contains(&"100 EUR".to_string()));
        assert!(money.contains(&"20.50 dollars".to_string()));
    }

    #[test]
    fn test_empty_text() {
        let entities = extract("");
        assert!(entities.is_empty());
        assert_eq!(entities.categories().collect::<Vec<_>>(), EntityCategory::ALL);
    }
}
