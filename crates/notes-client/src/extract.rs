use std::path::Path;

use tracing::debug;

use crate::error::ClientError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Turns a selected file into plain text.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ClientError>;
}

/// Extracts text from PDF files with `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ClientError> {
        let bytes = std::fs::read(path).map_err(|e| {
            ClientError::ExtractionFailed(format!("Failed to read {}: {e}", path.display()))
        })?;
        let text = extract_pdf(&bytes).map_err(|e| {
            ClientError::ExtractionFailed(format!("{}: {e}", path.display()))
        })?;
        debug!(
            file = %path.display(),
            chars = text.chars().count(),
            preview = %text.chars().take(200).collect::<String>(),
            "extracted text"
        );
        Ok(text)
    }
}

#[derive(Debug, thiserror::Error)]
enum PdfError {
    #[error("not a PDF file")]
    NotPdf,

    #[error("PDF extraction failed: {0}")]
    Extract(#[from] pdf_extract::OutputError),
}

fn extract_pdf(bytes: &[u8]) -> Result<String, PdfError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PdfError::NotPdf);
    }
    Ok(pdf_extract::extract_text_from_mem(bytes)?)
}
