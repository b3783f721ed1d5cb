// End-to-end run: pick input, acquire text, parse, persist
use crate::attendance_parser::parse_report;
use crate::config::Config;
use crate::file_picker::latest_pdf;
use crate::pdf_extraction::{DirectExtractor, ExtractionRouter, FallbackExtractor};
use crate::storage::JsonStore;
use crate::types::{AttendanceReport, Result};
use log::info;
use std::path::Path;

/// Extract, parse and save one document.
///
/// An extraction failure aborts before anything is written.
pub async fn process_document<D, F>(
    router: &ExtractionRouter<D, F>,
    pdf_path: &Path,
    store: &JsonStore,
) -> Result<AttendanceReport>
where
    D: DirectExtractor,
    F: FallbackExtractor,
{
    let extraction = router.acquire_text(pdf_path).await?;
    info!(
        "Acquired {} chars via {:?} in {}ms",
        extraction.text.len(),
        extraction.method,
        extraction.extraction_time_ms
    );

    let source_file = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let report = parse_report(&extraction.text, source_file);
    store.save(&report)?;
    Ok(report)
}

/// Process the newest PDF in the configured download directory.
pub async fn run_latest(config: &Config) -> Result<AttendanceReport> {
    let pdf_path = latest_pdf(&config.download_dir)?;
    run_file(config, &pdf_path).await
}

/// Process a given PDF with the lopdf / OCR.space router.
pub async fn run_file(config: &Config, pdf_path: &Path) -> Result<AttendanceReport> {
    let router = ExtractionRouter::from_config(config)?;
    let store = JsonStore::new(&config.output_path);
    process_document(&router, pdf_path, &store).await
}
