//! Text extraction from uploaded documents

use crate::core::error::ReportError;
use crate::debug;

/// Turns a document payload into plain text
pub trait TextExtractor {
    /// Extract the document's text
    ///
    /// # Errors
    /// Returns [`ReportError::Extraction`] if the payload cannot be read
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ReportError>;
}

/// PDF text extraction
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ReportError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(ReportError::Extraction(
                "payload is not a PDF document".to_string(),
            ));
        }
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ReportError::Extraction(e.to_string()))?;
        debug!("Extracted {} characters from PDF", text.len());
        Ok(text)
    }
}

/// Passthrough for text that was already extracted
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ReportError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ReportError::Extraction(format!("input is not valid UTF-8: {e}")))
    }
}

/// Pick an extractor from the file name: `.txt` files are read as text, anything else as PDF
#[must_use]
pub fn extractor_for(file_name: &str) -> Box<dyn TextExtractor> {
    let is_text = std::path::Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if is_text {
        Box::new(PlainTextExtractor)
    } else {
        Box::new(PdfTextExtractor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        let text = PlainTextExtractor
            .extract_text(b"TCR22CS061 CST202(A)")
            .expect("utf8");
        assert_eq!(text, "TCR22CS061 CST202(A)");
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let err = PlainTextExtractor
            .extract_text(&[0xff, 0xfe, 0x00])
            .expect_err("invalid utf8");
        assert!(matches!(err, ReportError::Extraction(_)));
    }

    #[test]
    fn test_pdf_rejects_non_pdf_payload() {
        let err = PdfTextExtractor
            .extract_text(b"definitely not a pdf")
            .expect_err("not a pdf");
        assert!(matches!(err, ReportError::Extraction(_)));
    }

    #[test]
    fn test_extractor_for_extension() {
        let text = extractor_for("results.TXT")
            .extract_text(b"hello")
            .expect("text");
        assert_eq!(text, "hello");
        assert!(extractor_for("results.pdf").extract_text(b"hello").is_err());
    }
}
