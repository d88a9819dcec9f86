pub mod splitter;

pub use splitter::TextSplitter;

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Read document text from disk. PDFs go through text extraction, anything
/// else is treated as plain text.
pub fn load_document(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "pdf" => pdf_extract::extract_text(path)
            .map_err(|e| anyhow!("Failed to extract text from PDF {}: {}", path.display(), e))?,
        _ => fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?,
    };

    if text.trim().is_empty() {
        return Err(anyhow!("Document {} contains no text", path.display()));
    }

    Ok(text)
}
