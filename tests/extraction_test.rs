use clausewise::extract::{ExtractError, FileType, extract_file, extract_text};
use docx_rs::{Docx, Paragraph, Run};
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    let file = File::create(path).unwrap();
    docx.build().pack(file).unwrap();
}

#[cfg(test)]
mod extraction_tests {
    use super::*;

    #[tokio::test]
    async fn test_txt_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lease.txt");
        std::fs::write(&path, "The tenant shall pay rent monthly.\n\nThe landlord maintains the roof.").unwrap();

        let text = extract_file(&path).await.unwrap();
        assert_eq!(text, "The tenant shall pay rent monthly.\n\nThe landlord maintains the roof.");
    }

    #[tokio::test]
    async fn test_docx_paragraphs_joined_by_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nda.docx");
        write_docx(&path, &["Confidential information stays secret.", "Term: two years."]);

        let text = extract_file(&path).await.unwrap();
        assert_eq!(text, "Confidential information stays secret.\nTerm: two years.");
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "  \n\t ").unwrap();

        let err = extract_file(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::Empty));
    }

    #[tokio::test]
    async fn test_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contract.rtf");
        std::fs::write(&path, "{\\rtf1 text}").unwrap();

        let err = extract_file(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType(ext) if ext == "rtf"));
    }

    #[tokio::test]
    async fn test_explicit_type_overrides_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contract.rtf");
        std::fs::write(&path, "Plain text after all, long enough.").unwrap();

        let text = extract_text(&path, FileType::Txt).await.unwrap();
        assert_eq!(text, "Plain text after all, long enough.");
    }

    #[tokio::test]
    async fn test_text_file_posing_as_docx() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, "not a zip").unwrap();

        let err = extract_file(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidDocx(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = extract_file(Path::new("does/not/exist.txt")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.txt"));
    }
}
