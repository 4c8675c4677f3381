//! Configuration
//!
//! Loaded from YAML. Every field has a default, so a missing file or a
//! partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebmindConfig {
    /// Note database location; defaults to the platform data directory
    pub db_path: Option<PathBuf>,
    pub summarizer: SummarizerConfig,
    pub mindmap: MindmapConfig,
    pub viewport: ViewportConfig,
}

/// How to reach the on-device summarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Program name or path; unset means no summarizer
    pub command: Option<String>,
    pub args: Vec<String>,
    /// Arguments that make the program print its availability
    pub probe_args: Option<Vec<String>>,
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            probe_args: None,
            timeout_secs: 60,
        }
    }
}

/// Mind-map builder limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindmapConfig {
    /// Prefix length (chars) of note text sent to the summarizer
    pub max_input_chars: usize,
    /// Keywords extracted per note on the heuristic path
    pub top_keywords: usize,
    /// Concurrent summarization calls per batch
    pub concurrency: usize,
}

impl Default for MindmapConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 1000,
            top_keywords: 5,
            concurrency: 4,
        }
    }
}

/// Rendered canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl WebmindConfig {
    /// Parse configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Load `path` if given, else the default location. A missing default
    /// file yields the defaults; a missing explicit file is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::load(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Database path, falling back to `<data_dir>/webmind/notes.db`.
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(default_db_path)
    }
}

/// `<config_dir>/webmind/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("webmind").join("config.yaml"))
}

fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("webmind").join("notes.db")
}
