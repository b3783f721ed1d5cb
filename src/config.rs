// Configuration for attendance extraction
use crate::types::{AttendanceError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "attendance.toml";
pub const OCR_SPACE_URL: &str = "https://api.ocr.space/parse/image";

// Below this many non-whitespace characters the text layer counts as empty
pub const MIN_TEXT_CHARS: usize = 50;

/// Everything the pipeline needs, passed in explicitly at construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr_api_key: String,
    pub ocr_endpoint: String,
    pub ocr_language: String,
    pub request_timeout_secs: u64,
    pub min_text_chars: usize,
    pub download_dir: PathBuf,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr_api_key: String::new(),
            ocr_endpoint: OCR_SPACE_URL.to_string(),
            ocr_language: "eng".to_string(),
            request_timeout_secs: 60,
            min_text_chars: MIN_TEXT_CHARS,
            download_dir: PathBuf::from("downloads"),
            output_path: PathBuf::from("database").join("data.json"),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file (if any), then environment overrides.
    ///
    /// An explicit `path` must exist; the default `attendance.toml` is only
    /// read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| AttendanceError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply environment overrides through `lookup` (normally `env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OCR_SPACE_API_KEY") {
            self.ocr_api_key = key;
        }
        if let Some(dir) = lookup("ATTENDANCE_DOWNLOAD_DIR") {
            self.download_dir = dir.into();
        }
        if let Some(out) = lookup("ATTENDANCE_OUTPUT") {
            self.output_path = out.into();
        }
    }
}
