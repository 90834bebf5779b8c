use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::text::decode_lossy;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{program} is not installed. Please install poppler-utils.")]
    ToolMissing { program: String },
    #[error("{program} exited with {status}")]
    ExtractionFailed { program: String, status: ExitDetail },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How an extraction process ended when it did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDetail {
    Code(i32),
    /// Killed by a signal (Unix only).
    Signal(i32),
    Unknown,
}

impl fmt::Display for ExitDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitDetail::Code(code) => write!(f, "status {}", code),
            ExitDetail::Signal(sig) => write!(f, "signal {}", sig),
            ExitDetail::Unknown => write!(f, "unknown status"),
        }
    }
}

/// Trait for PDF text extraction backends.
///
/// Implementors only produce the raw bytes; decoding and preview
/// truncation live in this crate so every backend shares them.
pub trait PdfBackend {
    /// Run the extraction and return everything it wrote, undecoded.
    fn extract_bytes(&self, path: &Path) -> Result<Vec<u8>, BackendError>;

    /// Extract the full text content of a PDF file.
    ///
    /// Invalid UTF-8 in the backend output is dropped, never reported.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let bytes = self.extract_bytes(path)?;
        let decoded = decode_lossy(&bytes);
        if decoded.invalid_bytes > 0 {
            tracing::debug!(
                invalid_bytes = decoded.invalid_bytes,
                "dropped invalid UTF-8 from extracted text"
            );
        }
        Ok(decoded.text)
    }
}
