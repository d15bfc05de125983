//! Legal-document analysis pipeline
//!
//! The [`Analyzer`] owns the loaded entity recognizer and the trained
//! document classifier and runs segmentation, simplification, entity
//! extraction and classification over one text.

pub mod classifier;
pub mod entities;
pub mod models;
pub mod ner;
pub mod segmenter;
pub mod simplifier;

use once_cell::sync::OnceCell;

pub use classifier::{DocumentClassifier, classify};
pub use models::*;
pub use ner::{EntityRecognizer, ModelConfig, ModelError, ModelSource, NerModel, Prediction};
pub use segmenter::segment;
pub use simplifier::{SIMPLIFICATIONS, simplify};

/// Loaded pipeline, immutable and shareable across threads
#[derive(Debug, Clone)]
pub struct Analyzer {
    recognizer: EntityRecognizer,
    classifier: DocumentClassifier,
}

impl Analyzer {
    /// Load the recognizer named by `config` and train the classifier
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let recognizer = EntityRecognizer::load(config)?;
        Ok(Self::with_recognizer(recognizer))
    }

    pub fn with_recognizer(recognizer: EntityRecognizer) -> Self {
        Self {
            recognizer,
            classifier: DocumentClassifier::new(),
        }
    }

    pub fn recognizer(&self) -> &EntityRecognizer {
        &self.recognizer
    }

    /// Run the full pipeline over `text`
    ///
    /// Never fails: text without clauses or known vocabulary still yields a
    /// complete result.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let clauses = segment(text);
        let simplified_clauses: Vec<String> =
            clauses.iter().map(|clause| simplify(clause)).collect();
        let entities = self.extract_entities(text);
        let classification = self.classify(text);
        let summary = summarize(classification, clauses.len());

        tracing::info!(
            clauses = clauses.len(),
            entities = entities.len(),
            classification = %classification,
            "analyzed document"
        );

        AnalysisResult {
            clauses,
            simplified_clauses,
            entities,
            classification,
            summary,
        }
    }

    pub fn extract_entities(&self, text: &str) -> Entities {
        entities::extract_entities(&self.recognizer, text)
    }

    pub fn classify(&self, text: &str) -> DocumentType {
        self.classifier.classify(text)
    }
}

static GLOBAL: OnceCell<Analyzer> = OnceCell::new();

/// Initialize the process-wide analyzer; later calls return the first one
pub fn init(config: &ModelConfig) -> Result<&'static Analyzer, ModelError> {
    GLOBAL.get_or_try_init(|| Analyzer::new(config))
}

/// The process-wide analyzer, if [`init`] has succeeded
pub fn global() -> Result<&'static Analyzer, ModelError> {
    GLOBAL.get().ok_or(ModelError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::new(&ModelConfig::builtin()).unwrap()
    }

    #[test]
    fn test_analyze_lease_scenario() {
        let result = analyzer().analyze(
            "This Agreement is made between Acme Corp and John Smith on 2023-01-15 for $5,000. \
             The tenant shall pay rent monthly.",
        );
        assert_eq!(result.classification, DocumentType::LeaseAgreement);
        assert_eq!(result.clauses.len(), 1);
        assert!(result.clauses[0].contains("rent monthly."));
        assert!(result.entities.get(EntityCategory::Date).contains(&"2023-01-15".to_string()));
        assert!(result.entities.get(EntityCategory::Money).contains(&"$5,000".to_string()));
        assert_eq!(result.clauses.len(), result.simplified_clauses.len());
        assert_eq!(
            result.summary,
            format!(
                "Document classified as Lease Agreement with {} clauses extracted.",
                result.clauses.len()
            )
        );
    }

    #[test]
    fn test_short_text_still_produces_a_result() {
        let result = analyzer().analyze("Too short.");
        assert!(result.clauses.is_empty());
        assert!(result.simplified_clauses.is_empty());
        assert_eq!(result.classification, DocumentType::Other);
        assert_eq!(
            result.summary,
            "Document classified as Other with 0 clauses extracted."
        );
        assert_eq!(result.entities.categories().count(), 6);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = analyzer();
        let text = "Whereas the Employer shall pay the Employee a salary of 4,000 dollars.\n\n\
                    The Employee shall commence work on 03/01/2024 in Boston.";
        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }

    #[test]
    fn test_global_slot() {
        let analyzer = init(&ModelConfig::builtin()).unwrap();
        assert!(std::ptr::eq(analyzer, global().unwrap()));
    }
}
