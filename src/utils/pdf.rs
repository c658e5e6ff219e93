// Minimal PDF utilities for the bill document flow.

use tracing::debug;

/// Extracts the text of a PDF held fully in memory, trimmed. Returns `None`
/// when the document cannot be parsed or yields no text at all, so callers
/// can skip unreadable documents and keep the rest.
pub fn extract_text(bytes: &[u8]) -> Option<String> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(e) => {
            debug!("Failed to extract PDF text: {}", e);
            None
        }
    }
}

/// Returns true if the content type or leading bytes indicate a PDF file.
/// - Content-Type: application/pdf (case-insensitive, substring match)
/// - Magic bytes: %PDF-
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf") || head.starts_with(b"%PDF-")
}

#[cfg(test)]
mod tests {
    use super::{extract_text, is_pdf};

    #[test]
    fn sniffs_pdf_by_content_type_and_magic() {
        assert!(is_pdf(Some("application/pdf"), b""));
        assert!(is_pdf(Some("Application/PDF; charset=binary"), b""));
        assert!(is_pdf(None, b"%PDF-1.7 rest"));
        assert!(!is_pdf(Some("text/html"), b"<html>"));
        assert!(!is_pdf(None, b""));
    }

    #[test]
    fn garbage_bytes_yield_none() {
        assert!(extract_text(b"definitely not a pdf").is_none());
        assert!(extract_text(b"").is_none());
    }
}
