// Input discovery: newest downloaded PDF in a directory
use crate::types::{AttendanceError, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Most recently modified `*.pdf` directly inside `dir`.
///
/// A missing directory and a directory without PDFs both report
/// `NoInputAvailable`.
pub fn latest_pdf(dir: &Path) -> Result<PathBuf> {
    let newest = find_pdfs_in_dir(dir)
        .into_iter()
        .max_by_key(|(_, modified)| *modified)
        .map(|(path, _)| path)
        .ok_or_else(|| AttendanceError::NoInputAvailable {
            dir: dir.to_path_buf(),
        })?;

    info!("Latest PDF found: {}", newest.display());
    Ok(newest)
}

fn find_pdfs_in_dir(dir: &Path) -> Vec<(PathBuf, SystemTime)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_pdf(path))
        .filter_map(|path| {
            let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
            Some((path, modified))
        })
        .collect()
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
