use std::io::Write;

use owo_colors::OwoColorize;
use pdfpeek_core::{BackendError, Preview};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the preview text followed by a newline.
pub fn print_preview(w: &mut dyn Write, preview: &Preview) -> std::io::Result<()> {
    writeln!(w, "{}", preview.text)
}

/// Print a one-line diagnostic for a failed run.
pub fn print_error(
    w: &mut dyn Write,
    err: &anyhow::Error,
    color: ColorMode,
) -> std::io::Result<()> {
    // Backend errors already embed their source in the message.
    let (label, message) = match err.downcast_ref::<BackendError>() {
        Some(e @ BackendError::ToolMissing { .. }) => ("Error:", e.to_string()),
        Some(e) => ("Error extracting text:", e.to_string()),
        None => ("Error:", format!("{:#}", err)),
    };
    if color.enabled() {
        writeln!(w, "{} {}", label.red().bold(), message)
    } else {
        writeln!(w, "{} {}", label, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfpeek_core::ExitDetail;

    fn render(err: anyhow::Error, color: ColorMode) -> String {
        let mut buf = Vec::new();
        print_error(&mut buf, &err, color).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn preview_ends_with_newline() {
        let preview = Preview {
            text: "Jane Doe — Software Engineer".into(),
            truncated: false,
        };
        let mut buf = Vec::new();
        print_preview(&mut buf, &preview).unwrap();
        assert_eq!(buf, "Jane Doe — Software Engineer\n".as_bytes());
    }

    #[test]
    fn missing_tool_message() {
        let err = BackendError::ToolMissing {
            program: "pdftotext".into(),
        };
        assert_eq!(
            render(err.into(), ColorMode(false)),
            "Error: pdftotext is not installed. Please install poppler-utils.\n"
        );
    }

    #[test]
    fn extraction_failure_message() {
        let err = BackendError::ExtractionFailed {
            program: "pdftotext".into(),
            status: ExitDetail::Code(1),
        };
        assert_eq!(
            render(err.into(), ColorMode(false)),
            "Error extracting text: pdftotext exited with status 1\n"
        );
    }

    #[test]
    fn other_errors_keep_context_chain() {
        let err = anyhow::anyhow!("broken pipe").context("writing preview");
        assert_eq!(
            render(err, ColorMode(false)),
            "Error: writing preview: broken pipe\n"
        );
    }

    #[test]
    fn colored_label_contains_escape_codes() {
        let err = BackendError::ToolMissing {
            program: "pdftotext".into(),
        };
        let out = render(err.into(), ColorMode(true));
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("pdftotext is not installed"));
    }
}
