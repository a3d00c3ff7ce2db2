use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::ExtractionError;

static NON_ASCII: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Extracts the text layer of a PDF, lowercased and trimmed.
///
/// Parsing is CPU-bound; async callers should run it on a blocking thread.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    Ok(text.trim().to_lowercase())
}

/// Replaces runs of non-ASCII characters with a space, then collapses all
/// whitespace runs to a single space.
pub fn clean_text(raw: &str) -> String {
    let ascii = NON_ASCII.replace_all(raw, " ");
    WHITESPACE.replace_all(&ascii, " ").trim().to_string()
}
