use std::path::Path;

pub mod backend;
pub mod config_file;
pub mod text;

// Re-export for convenience
pub use backend::{BackendError, ExitDetail, PdfBackend};
pub use text::{DecodedText, Preview, decode_lossy, preview};

/// Extraction program used when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "pdftotext";

/// Preview length in characters used when nothing else is configured.
pub const DEFAULT_MAX_CHARS: usize = 1000;

/// Extract the text of `path` with `backend` and cut it down to a preview.
pub fn extract_preview(
    path: &Path,
    backend: &dyn PdfBackend,
    max_chars: usize,
) -> Result<Preview, BackendError> {
    let extracted = backend.extract_text(path)?;
    let preview = text::preview(&extracted, max_chars);
    tracing::debug!(
        chars = extracted.chars().count(),
        preview_chars = preview.text.chars().count(),
        truncated = preview.truncated,
        "built preview"
    );
    Ok(preview)
}
