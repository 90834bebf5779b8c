use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_CHARS, DEFAULT_PROGRAM};

/// Environment variable naming the extraction program.
pub const ENV_PROGRAM: &str = "PDFTOTEXT_PATH";
/// Environment variable holding the preview length.
pub const ENV_MAX_CHARS: &str = "PDFPEEK_MAX_CHARS";

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub extractor: Option<ExtractorConfig>,
    pub preview: Option<PreviewConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub program: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub max_chars: Option<usize>,
}

/// Platform config directory path: `<config_dir>/pdfpeek/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdfpeek").join("config.toml"))
}

/// Load config by cascading CWD `.pdfpeek.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    load_cascade(config_path().as_deref(), Path::new(".pdfpeek.toml"))
}

/// Cascade `local` over `platform`; either file may be absent.
pub fn load_cascade(platform: Option<&Path>, local: &Path) -> ConfigFile {
    let platform = platform.and_then(load_from_path);
    let local = load_from_path(local);

    match (platform, local) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(l)) => l,
        (Some(p), Some(l)) => merge(p, l),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        extractor: Some(ExtractorConfig {
            program: overlay
                .extractor
                .as_ref()
                .and_then(|e| e.program.clone())
                .or_else(|| base.extractor.as_ref().and_then(|e| e.program.clone())),
        }),
        preview: Some(PreviewConfig {
            max_chars: overlay
                .preview
                .as_ref()
                .and_then(|p| p.max_chars)
                .or_else(|| base.preview.as_ref().and_then(|p| p.max_chars)),
        }),
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub program: String,
    pub max_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl Settings {
    /// Resolve settings: CLI flags > env vars > config file > defaults.
    ///
    /// `env` looks up a variable by name; unparsable or zero lengths from
    /// the environment or the file are ignored with a warning.
    pub fn resolve(
        cli_program: Option<String>,
        cli_max_chars: Option<usize>,
        env: impl Fn(&str) -> Option<String>,
        file: &ConfigFile,
    ) -> Self {
        let program = cli_program
            .or_else(|| env(ENV_PROGRAM).filter(|p| !p.is_empty()))
            .or_else(|| file.extractor.as_ref().and_then(|e| e.program.clone()))
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

        let env_max_chars = env(ENV_MAX_CHARS).and_then(|v| match v.trim().parse::<usize>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                tracing::warn!(value = %v, "ignoring invalid {}", ENV_MAX_CHARS);
                None
            }
        });
        let file_max_chars = file
            .preview
            .as_ref()
            .and_then(|p| p.max_chars)
            .and_then(|n| {
                if n == 0 {
                    tracing::warn!("ignoring preview.max_chars = 0 in config file");
                    None
                } else {
                    Some(n)
                }
            });
        let max_chars = cli_max_chars
            .or(env_max_chars)
            .or(file_max_chars)
            .unwrap_or(DEFAULT_MAX_CHARS);

        Self { program, max_chars }
    }
}
