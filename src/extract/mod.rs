//! Text extraction from uploaded documents
//!
//! Turns `.txt`, `.docx` and `.pdf` files into plain text for the analysis
//! pipeline. The pipeline itself never touches the filesystem.

pub(crate) mod io;
pub mod loader;
pub mod models;

pub use loader::{extract_bytes, extract_file, extract_text};
pub use models::{ExtractError, FileType};
