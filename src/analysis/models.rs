//! Core data structures for analysis results
//!
//! This module defines the public types produced by the analysis pipeline:
//! document types, entity categories, the entity table and the combined result.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Maximum number of clauses kept per document
pub const MAX_CLAUSES: usize = 10;

/// Clauses must be longer than this many characters after trimming
pub const MIN_CLAUSE_CHARS: usize = 20;

/// Closed taxonomy of legal instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Non-Disclosure Agreement")]
    NonDisclosureAgreement,
    #[serde(rename = "Lease Agreement")]
    LeaseAgreement,
    #[serde(rename = "Employment Contract")]
    EmploymentContract,
    #[serde(rename = "Service Agreement")]
    ServiceAgreement,
    #[serde(rename = "Other")]
    Other,
}

impl DocumentType {
    /// All document types in taxonomy order
    pub const ALL: [DocumentType; 5] = [
        DocumentType::NonDisclosureAgreement,
        DocumentType::LeaseAgreement,
        DocumentType::EmploymentContract,
        DocumentType::ServiceAgreement,
        DocumentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::NonDisclosureAgreement => "Non-Disclosure Agreement",
            DocumentType::LeaseAgreement => "Lease Agreement",
            DocumentType::EmploymentContract => "Employment Contract",
            DocumentType::ServiceAgreement => "Service Agreement",
            DocumentType::Other => "Other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity labels kept from the recognizer
///
/// Declaration order is the display and serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Person,
    Org,
    Date,
    Money,
    Cardinal,
    Gpe,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 6] = [
        EntityCategory::Person,
        EntityCategory::Org,
        EntityCategory::Date,
        EntityCategory::Money,
        EntityCategory::Cardinal,
        EntityCategory::Gpe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Person => "PERSON",
            EntityCategory::Org => "ORG",
            EntityCategory::Date => "DATE",
            EntityCategory::Money => "MONEY",
            EntityCategory::Cardinal => "CARDINAL",
            EntityCategory::Gpe => "GPE",
        }
    }

    /// Map a recognizer label onto a supported category
    ///
    /// Labels outside the closed set (e.g. `LAW`, `NORP`) return `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == label)
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity strings grouped by category
///
/// Always holds exactly the six categories, possibly with empty lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entities {
    by_category: BTreeMap<EntityCategory, Vec<String>>,
}

impl Default for Entities {
    fn default() -> Self {
        Self::new()
    }
}

impl Entities {
    pub fn new() -> Self {
        Self {
            by_category: EntityCategory::ALL
                .into_iter()
                .map(|category| (category, Vec::new()))
                .collect(),
        }
    }

    /// Insert a recognizer entity, skipping exact duplicates within the category
    pub fn insert_unique(&mut self, category: EntityCategory, text: &str) -> bool {
        let entries = self.by_category.entry(category).or_default();
        if entries.iter().any(|existing| existing == text) {
            return false;
        }
        entries.push(text.to_string());
        true
    }

    /// Append pattern matches without any de-duplication
    pub fn append(&mut self, category: EntityCategory, texts: impl IntoIterator<Item = String>) {
        self.by_category.entry(category).or_default().extend(texts);
    }

    pub fn get(&self, category: EntityCategory) -> &[String] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate categories in display order
    pub fn iter(&self) -> impl Iterator<Item = (EntityCategory, &[String])> {
        self.by_category
            .iter()
            .map(|(category, entries)| (*category, entries.as_slice()))
    }

    pub fn categories(&self) -> impl Iterator<Item = EntityCategory> + '_ {
        self.by_category.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.values().all(Vec::is_empty)
    }

    /// Total number of entity strings across categories
    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }
}

// Missing categories are filled in so the six keys survive a round trip
impl<'de> Deserialize<'de> for Entities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let incoming = BTreeMap::<EntityCategory, Vec<String>>::deserialize(deserializer)?;
        let mut entities = Entities::new();
        for (category, texts) in incoming {
            entities.append(category, texts);
        }
        Ok(entities)
    }
}

/// Combined output of one analysis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub clauses: Vec<String>,
    pub simplified_clauses: Vec<String>,
    pub entities: Entities,
    pub classification: DocumentType,
    pub summary: String,
}

impl AnalysisResult {
    /// Clause pairs (original, simplified), 1-indexed for display
    pub fn clause_pairs(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.clauses
            .iter()
            .zip(&self.simplified_clauses)
            .enumerate()
            .map(|(i, (original, simplified))| (i + 1, original.as_str(), simplified.as_str()))
    }
}

pub fn summarize(classification: DocumentType, clause_count: usize) -> String {
    format!("Document classified as {classification} with {clause_count} clauses extracted.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entities_start_with_all_categories() {
        let entities = Entities::new();
        let categories: Vec<_> = entities.categories().collect();
        assert_eq!(categories, EntityCategory::ALL.to_vec());
        assert!(entities.is_empty());
    }

    #[test]
    fn test_insert_unique_skips_duplicates_but_append_keeps_them() {
        let mut entities = Entities::new();
        assert!(entities.insert_unique(EntityCategory::Money, "$5,000"));
        assert!(!entities.insert_unique(EntityCategory::Money, "$5,000"));
        entities.append(EntityCategory::Money, vec!["$5,000".to_string()]);
        assert_eq!(entities.get(EntityCategory::Money), ["$5,000", "$5,000"]);
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(EntityCategory::from_label("GPE"), Some(EntityCategory::Gpe));
        assert_eq!(EntityCategory::from_label("LAW"), None);
        assert_eq!(EntityCategory::from_label("person"), None);
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&DocumentType::NonDisclosureAgreement).unwrap();
        assert_eq!(json, "\"Non-Disclosure Agreement\"");

        let json = serde_json::to_string(&Entities::new()).unwrap();
        assert_eq!(
            json,
            r#"{"PERSON":[],"ORG":[],"DATE":[],"MONEY":[],"CARDINAL":[],"GPE":[]}"#
        );
    }

    #[test]
    fn test_deserialized_entities_keep_all_categories() {
        let entities: Entities = serde_json::from_str(r#"{"MONEY":["$5,000"]}"#).unwrap();
        let categories: Vec<_> = entities.categories().collect();
        assert_eq!(categories, EntityCategory::ALL.to_vec());
        assert_eq!(entities.get(EntityCategory::Money), ["$5,000"]);

        assert!(serde_json::from_str::<Entities>(r#"{"LAW":["Section 8"]}"#).is_err());
    }

    #[test]
    fn test_summary_format() {
        assert_eq!(
            summarize(DocumentType::LeaseAgreement, 2),
            "Document classified as Lease Agreement with 2 clauses extracted."
        );
    }
}
