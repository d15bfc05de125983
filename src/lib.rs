//! clausewise: legal document analysis
//!
//! This library segments legal documents into clauses, rewrites them in plain
//! language, extracts named entities and classifies the type of agreement.

pub mod analysis;
pub mod ansi;
pub mod config;
pub mod export;
pub mod extract;

use serde::{Deserialize, Serialize};

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
    Ansi,
}

/// Color depth options for ANSI export
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorDepth {
    /// Auto-detect terminal color capabilities
    #[serde(rename = "auto")]
    Auto,
    /// Monochrome (no colors)
    #[value(name = "1")]
    #[serde(rename = "1")]
    Monochrome,
    /// 16 colors
    #[value(name = "4")]
    #[serde(rename = "4")]
    Standard,
    /// 256 colors
    #[value(name = "8")]
    #[serde(rename = "8")]
    Extended,
    /// 24-bit true color
    #[value(name = "24")]
    #[serde(rename = "24")]
    TrueColor,
}

// Re-export commonly used types
pub use analysis::{
    AnalysisResult, Analyzer, DocumentType, Entities, EntityCategory, ModelConfig, ModelError,
    ModelSource,
};
pub use config::Config;
pub use extract::{ExtractError, FileType, extract_file, extract_text};
