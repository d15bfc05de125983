//! Clause segmentation
//!
//! Splits document text into an ordered, bounded list of candidate clauses.
//! Separator strategies are tried in order and the first one that yields any
//! qualifying clause wins; strategies are never combined. Text without the
//! separator splits into itself, so any text longer than the minimum becomes a
//! single clause at the first strategy.

use once_cell::sync::Lazy;
use regex::Regex;

use super::models::{MAX_CLAUSES, MIN_CLAUSE_CHARS};

/// A single way of cutting a document into clauses
#[derive(Debug)]
pub struct SegmentationStrategy {
    pub name: &'static str,
    separator: Regex,
}

impl SegmentationStrategy {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            // Patterns are fixed literals below
            separator: Regex::new(pattern).unwrap(),
        }
    }

    /// Split and filter; `None` when no part is long enough to be a clause
    pub fn apply(&self, text: &str) -> Option<Vec<String>> {
        let clauses: Vec<String> = self
            .separator
            .split(text)
            .map(str::trim)
            .filter(|part| is_clause_length(part))
            .map(str::to_string)
            .collect();

        if clauses.is_empty() {
            None
        } else {
            Some(clauses)
        }
    }
}

// Order matters: the first strategy producing a clause decides the segmentation
static STRATEGIES: Lazy<Vec<SegmentationStrategy>> = Lazy::new(|| {
    vec![
        // Paragraph breaks
        SegmentationStrategy::new("blank-line", r"\n\s*\n"),
        // Sentence-terminal period
        SegmentationStrategy::new("period", r"\.\s+"),
        // Enumerated provisions separated by semicolons
        SegmentationStrategy::new("semicolon", r";\s+"),
        SegmentationStrategy::new("period-newline", r"\.\s*\n"),
        // Generic sentence punctuation
        SegmentationStrategy::new("sentence", r"[.!?]+"),
    ]
});

fn is_clause_length(part: &str) -> bool {
    part.chars().count() > MIN_CLAUSE_CHARS
}

/// Split `text` into at most ten clauses in document order
pub fn segment(text: &str) -> Vec<String> {
    for strategy in STRATEGIES.iter() {
        if let Some(mut clauses) = strategy.apply(text) {
            tracing::debug!(
                strategy = strategy.name,
                found = clauses.len(),
                "segmented clauses"
            );
            clauses.truncate(MAX_CLAUSES);
            return clauses;
        }
    }

    tracing::debug!("no clause longer than {MIN_CLAUSE_CHARS} characters");
    Vec::new()
}
