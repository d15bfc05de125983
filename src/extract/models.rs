//! File types and extraction errors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

impl FileType {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            "txt" => Some(FileType::Txt),
            _ => None,
        }
    }

    /// Detect the type from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        Self::from_extension(extension)
            .ok_or_else(|| ExtractError::UnsupportedType(extension.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Txt => "txt",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file type: .{0} (expected .pdf, .docx or .txt)")]
    UnsupportedType(String),
    #[error("{0}")]
    Unsupported(String),
    #[error("invalid .docx file: {0}")]
    InvalidDocx(String),
    #[error("failed to read PDF: {0}")]
    Pdf(String),
    #[error("text file is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("no text found in document")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_path(Path::new("lease.PDF")).unwrap(), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("a/b/nda.docx")).unwrap(), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("notes.txt")).unwrap(), FileType::Txt);
        assert!(matches!(
            FileType::from_path(Path::new("sheet.xlsx")),
            Err(ExtractError::UnsupportedType(ext)) if ext == "xlsx"
        ));
        assert!(matches!(
            FileType::from_path(Path::new("README")),
            Err(ExtractError::UnsupportedType(_))
        ));
    }
}
