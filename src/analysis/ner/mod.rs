//! Statistical named-entity recognition
//!
//! The recognizer proposes candidate spans (numeric shapes and runs of
//! capitalized words), describes each with sparse features and scores every
//! model label as the sum of its feature weights. The best label wins when it
//! clears the model threshold.

mod features;
pub mod model;

use std::collections::HashMap;

pub use model::{ModelConfig, ModelError, ModelSource, NerModel};

use features::{Candidate, candidate_spans};
use model::{Lexicon, load_model};

/// One labelled span of the input text
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub score: f64,
}

/// Loaded, immutable recognizer; safe to share between threads
#[derive(Debug, Clone)]
pub struct EntityRecognizer {
    name: String,
    version: String,
    labels: Vec<String>,
    threshold: f64,
    weights: HashMap<String, HashMap<String, f64>>,
    lexicon: Lexicon,
}

impl EntityRecognizer {
    /// Initialize from a model source, failing fast when the model is unavailable
    pub fn load(config: &ModelConfig) -> Result<Self, ModelError> {
        let model = load_model(config)?;
        tracing::info!(
            model = %model.name,
            version = %model.version,
            labels = model.labels.len(),
            "loaded entity recognizer"
        );
        Ok(Self::from_model(model))
    }

    pub fn builtin() -> Result<Self, ModelError> {
        Self::load(&ModelConfig::builtin())
    }

    pub fn from_model(model: NerModel) -> Self {
        let lexicon = Lexicon::from(&model.gazetteers);
        Self {
            name: model.name,
            version: model.version,
            labels: model.labels,
            threshold: model.threshold,
            weights: model.weights,
            lexicon,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Label every candidate span in `text`, in document order
    pub fn recognize(&self, text: &str) -> Vec<Prediction> {
        candidate_spans(text, &self.lexicon)
            .into_iter()
            .filter_map(|candidate| self.predict(text, &candidate))
            .collect()
    }

    fn predict(&self, text: &str, candidate: &Candidate) -> Option<Prediction> {
        let (label, score) = self.best_label(&candidate.features)?;
        if score <= self.threshold {
            return None;
        }

        Some(Prediction {
            text: text[candidate.start..candidate.end].to_string(),
            label: label.to_string(),
            start: candidate.start,
            end: candidate.end,
            score,
        })
    }

    // Strictly greater keeps the first declared label on ties
    fn best_label(&self, features: &[&'static str]) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for label in &self.labels {
            let score = self.score(label, features);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((label.as_str(), score));
            }
        }
        best
    }

    fn score(&self, label: &str, features: &[&'static str]) -> f64 {
        let Some(weights) = self.weights.get(label) else {
            return 0.0;
        };
        features
            .iter()
            .filter_map(|feature| weights.get(*feature))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> EntityRecognizer {
        EntityRecognizer::builtin().unwrap()
    }

    fn labelled(text: &str) -> Vec<(String, String)> {
        recognizer()
            .recognize(text)
            .into_iter()
            .map(|p| (p.text, p.label))
            .collect()
    }

    fn pair(text: &str, label: &str) -> (String, String) {
        (text.to_string(), label.to_string())
    }

    #[test]
    fn test_parties_dates_and_money() {
        let found = labelled(
            "This Agreement is made between Acme Corp and John Smith on 2023-01-15 for $5,000.",
        );
        assert_eq!(
            found,
            vec![
                pair("Acme Corp", "ORG"),
                pair("John Smith", "PERSON"),
                pair("2023-01-15", "DATE"),
                pair("$5,000", "MONEY"),
            ]
        );
    }

    #[test]
    fn test_locations_and_titles() {
        let found = labelled("Ms. Jane Doe of Wilmington, Delaware signed it.");
        assert!(found.contains(&pair("Jane Doe", "PERSON")));
        assert!(found.contains(&pair("Wilmington", "GPE")));
        assert!(found.contains(&pair("Delaware", "GPE")));
    }

    #[test]
    fn test_connectors_inside_names() {
        let found = labelled("Payment goes to Bank of America and the State of Texas.");
        assert!(found.contains(&pair("Bank of America", "ORG")));
        assert!(found.contains(&pair("State of Texas", "GPE")));
    }

    #[test]
    fn test_numeric_shapes() {
        let found = labelled("Pay 2,500 dollars within 30 days, starting March 1, 2024 in 2024.");
        assert_eq!(
            found,
            vec![
                pair("2,500 dollars", "MONEY"),
                pair("30", "CARDINAL"),
                pair("March 1, 2024", "DATE"),
                pair("2024", "DATE"),
            ]
        );
    }

    #[test]
    fn test_defined_terms_and_lone_words_are_ignored() {
        let found = labelled("The Tenant shall pay the Landlord. Premises include the Company garage.");
        assert!(found.is_empty(), "unexpected entities: {found:?}");
    }

    #[test]
    fn test_unsupported_labels_are_still_predicted() {
        let found = labelled("Compliance with the Fair Housing Act is required.");
        assert_eq!(found, vec![pair("Fair Housing Act", "LAW")]);
    }

    #[test]
    fn test_ties_resolve_to_declared_order() {
        let model = NerModel::from_json(
            r#"{"name":"tie","version":"0","labels":["ORG","PERSON"],"threshold":0.0,
                "weights":{"ORG":{"shape:capitalized":1.0},"PERSON":{"shape:capitalized":1.0}}}"#,
            "inline",
        )
        .unwrap();
        let recognizer = EntityRecognizer::from_model(model);
        let found = recognizer.recognize("signed by Zed Quux today");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "ORG");
    }

    #[test]
    fn test_recognizer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EntityRecognizer>();
    }
}
