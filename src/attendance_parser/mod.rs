// Structured parsing of attendance report text
pub mod rows;
pub mod rules;

use crate::types::AttendanceReport;
use log::{debug, info};

pub use rows::{extract_rows, normalize_lines, RowTier};
pub use rules::{extract_header, extract_overall_percent, FieldRule, HeaderField};

/// Build the report from extracted text in one pass.
///
/// Never fails. Every field that does not match falls back to `None` (or an
/// empty row list), so partially readable text still gives a full-shaped
/// report.
pub fn parse_report(text: &str, source_file: impl Into<String>) -> AttendanceReport {
    let header = extract_header(text);

    let lines = normalize_lines(text);
    let (tier, rows) = extract_rows(&lines);
    match tier {
        Some(tier) => info!("Matched {} attendance rows ({:?} pattern)", rows.len(), tier),
        None => info!("No attendance rows matched in {} lines", lines.len()),
    }

    let overall = extract_overall_percent(text);
    debug!("Overall attendance: {:?}", overall);

    AttendanceReport::new(header, rows, overall, source_file)
}
