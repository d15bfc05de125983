//! Plain-text extraction per file type

use std::path::Path;

use super::io::{read_bytes, validate_docx};
use super::models::{ExtractError, FileType};

/// Extract text from `path`, detecting the type from its extension
pub async fn extract_file(path: &Path) -> Result<String, ExtractError> {
    let file_type = FileType::from_path(path)?;
    extract_text(path, file_type).await
}

/// Extract the text of `path` read as `file_type`
///
/// Fails with [`ExtractError::Empty`] when the document holds no visible text.
pub async fn extract_text(path: &Path, file_type: FileType) -> Result<String, ExtractError> {
    let bytes = read_bytes(path).await?;
    let text = extract_bytes(&bytes, file_type)?;

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    tracing::debug!(
        path = %path.display(),
        file_type = %file_type,
        chars = text.chars().count(),
        "extracted text"
    );
    Ok(text)
}

pub fn extract_bytes(bytes: &[u8], file_type: FileType) -> Result<String, ExtractError> {
    match file_type {
        FileType::Txt => Ok(String::from_utf8(bytes.to_vec())?),
        FileType::Docx => docx_text(bytes),
        FileType::Pdf => pdf_text(bytes),
    }
}

/// Paragraph texts joined by newlines; tables and drawings are skipped
fn docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    validate_docx(bytes)?;
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::InvalidDocx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(&para.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[docx_rs::ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => text.push_str(&run_text(run)),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                text.push_str(&paragraph_text(&link.children));
            }
            _ => {}
        }
    }
    text
}

fn run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => text.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => text.push('\t'),
            docx_rs::RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
    text
}

#[cfg(feature = "pdf")]
fn pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

#[cfg(not(feature = "pdf"))]
fn pdf_text(_bytes: &[u8]) -> Result<String, ExtractError> {
    Err(ExtractError::Unsupported(
        "PDF processing requires the `pdf` feature".to_string(),
    ))
}
