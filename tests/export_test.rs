use clausewise::{
    analysis::{AnalysisResult, DocumentType, Entities, EntityCategory, summarize},
    export::{export_entities_to_csv, export_to_json, export_to_text},
};

fn create_test_result() -> AnalysisResult {
    let mut entities = Entities::new();
    entities.insert_unique(EntityCategory::Person, "John Smith");
    entities.insert_unique(EntityCategory::Org, "Acme, Inc");
    entities.append(EntityCategory::Money, vec!["$5,000".to_string(), "$5,000".to_string()]);

    let clauses = vec![
        "The tenant shall terminate the lease prior to moving".to_string(),
        "The tenant shall pay rent monthly.".to_string(),
    ];
    AnalysisResult {
        simplified_clauses: vec![
            "The tenant shall end the lease before moving".to_string(),
            clauses[1].clone(),
        ],
        summary: summarize(DocumentType::LeaseAgreement, clauses.len()),
        clauses,
        entities,
        classification: DocumentType::LeaseAgreement,
    }
}

#[test]
fn test_json_export() {
    let json = export_to_json(&create_test_result()).unwrap();

    assert!(json.contains("\n  \"clauses\": ["));
    assert!(json.contains("\"classification\": \"Lease Agreement\""));
    assert!(json.contains("\"PERSON\": [\n      \"John Smith\"\n    ]"));
    assert!(json.contains("\"GPE\": []"));

    let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, create_test_result());
}

#[test]
fn test_csv_export() {
    let csv = export_entities_to_csv(&create_test_result()).unwrap();
    assert_eq!(
        csv,
        "Type,Entity\nPERSON,John Smith\nORG,\"Acme, Inc\"\nMONEY,\"$5,000\"\nMONEY,\"$5,000\"\n"
    );
}

#[test]
fn test_csv_export_without_entities() {
    let mut result = create_test_result();
    result.entities = Entities::new();
    assert_eq!(export_entities_to_csv(&result), None);
}

#[test]
fn test_text_export() {
    let text = export_to_text(&create_test_result(), 80).unwrap();

    assert!(text.contains("Summary: Document classified as Lease Agreement with 2 clauses extracted."));
    assert!(text.contains("Document type: Lease Agreement"));
    assert!(text.contains("PERSON: John Smith"));
    assert!(text.contains("MONEY: $5,000, $5,000"));
    assert!(!text.contains("GPE:"));
    assert!(text.contains("Clause 2"));
    assert!(text.contains("    The tenant shall end the lease before moving"));
    assert!(!text.contains('\u{1b}'));
}
