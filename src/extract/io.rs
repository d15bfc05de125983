//! Container validation and raw reads

use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

use super::models::ExtractError;

pub(crate) async fn read_bytes(path: &Path) -> Result<Vec<u8>, ExtractError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Checks that the bytes are a Word document container
pub(crate) fn validate_docx(bytes: &[u8]) -> Result<(), ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::InvalidDocx(format!("not a ZIP container ({e})")))?;

    if archive.by_name("word/document.xml").is_err() {
        // Spreadsheets share the container format
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(ExtractError::InvalidDocx(
                "this appears to be an Excel file (.xlsx)".to_string(),
            ));
        }
        return Err(ExtractError::InvalidDocx(
            "missing word/document.xml".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(entry: &str) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer.start_file(entry, SimpleFileOptions::default()).unwrap();
            writer.write_all(b"<xml/>").unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_rejects_non_zip() {
        let err = validate_docx(b"plain text").unwrap_err();
        assert!(err.to_string().contains("not a ZIP container"));
    }

    #[test]
    fn test_rejects_spreadsheets() {
        let err = validate_docx(&zip_with("xl/workbook.xml")).unwrap_err();
        assert!(err.to_string().contains("Excel"));
    }

    #[test]
    fn test_requires_document_part() {
        let err = validate_docx(&zip_with("other.xml")).unwrap_err();
        assert!(err.to_string().contains("missing word/document.xml"));
        assert!(validate_docx(&zip_with("word/document.xml")).is_ok());
    }
}
