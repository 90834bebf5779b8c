use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use pdfpeek_core::{BackendError, DEFAULT_PROGRAM, ExitDetail, PdfBackend};

/// `pdftotext`-based implementation of [`PdfBackend`].
///
/// This crate is the only place that spawns a process. The tool is run as
/// `<program> <pdf> -` so the text arrives on its stdout; its stderr goes to
/// the null device and is never shown.
#[derive(Debug, Clone)]
pub struct PdftotextBackend {
    program: OsString,
}

impl Default for PdftotextBackend {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.into(),
        }
    }
}

impl PdftotextBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `program` instead of `pdftotext` from `PATH`.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &Path {
        Path::new(&self.program)
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl PdfBackend for PdftotextBackend {
    fn extract_bytes(&self, path: &Path) -> Result<Vec<u8>, BackendError> {
        tracing::debug!(
            program = %self.program().display(),
            pdf = %path.display(),
            "running extractor"
        );

        // `output()` drains stdout and waits for the child before returning.
        let output = Command::new(&self.program)
            .arg(path)
            .arg("-")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => BackendError::ToolMissing {
                    program: self.program_name(),
                },
                _ => BackendError::Io(e),
            })?;

        if !output.status.success() {
            let status = exit_detail(output.status);
            tracing::debug!(%status, "extractor failed");
            return Err(BackendError::ExtractionFailed {
                program: self.program_name(),
                status,
            });
        }

        tracing::debug!(bytes = output.stdout.len(), "extractor finished");
        Ok(output.stdout)
    }
}

fn exit_detail(status: ExitStatus) -> ExitDetail {
    if let Some(code) = status.code() {
        return ExitDetail::Code(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return ExitDetail::Signal(sig);
        }
    }
    ExitDetail::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_program_is_pdftotext() {
        assert_eq!(PdftotextBackend::new().program(), Path::new("pdftotext"));
    }

    #[test]
    fn with_program_overrides() {
        let backend = PdftotextBackend::new().with_program("/opt/poppler/bin/pdftotext");
        assert_eq!(
            backend.program(),
            Path::new("/opt/poppler/bin/pdftotext")
        );
        assert_eq!(backend.program_name(), "/opt/poppler/bin/pdftotext");
    }

    #[cfg(unix)]
    #[test]
    fn exit_detail_from_code_and_signal() {
        use std::os::unix::process::ExitStatusExt;
        // Raw wait statuses: exit code lives in the high byte.
        assert_eq!(exit_detail(ExitStatus::from_raw(1 << 8)), ExitDetail::Code(1));
        assert_eq!(exit_detail(ExitStatus::from_raw(9)), ExitDetail::Signal(9));
    }
}
