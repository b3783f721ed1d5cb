// JSON artifact storage
// One report per file, pretty-printed, overwritten on every save

use crate::types::{AttendanceReport, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonStore {
    output_path: PathBuf,
}

impl JsonStore {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the report, creating parent directories as needed.
    ///
    /// Last write wins: an existing artifact is replaced without versioning.
    pub fn save(&self, report: &AttendanceReport) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // serde_json leaves non-ASCII text unescaped
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.output_path, json)?;

        info!("Saved parsed JSON to {}", self.output_path.display());
        Ok(())
    }

    /// Read a previously saved report back.
    pub fn load(&self) -> Result<AttendanceReport> {
        let content = fs::read_to_string(&self.output_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn exists(&self) -> bool {
        self.output_path.exists()
    }
}
