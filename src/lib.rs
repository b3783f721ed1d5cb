// Attendance report extraction: PDF text (lopdf, OCR.space fallback) to structured JSON
pub mod attendance_parser;
pub mod config;
pub mod file_picker;
pub mod pdf_extraction;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use attendance_parser::parse_report;
pub use config::Config;
pub use pdf_extraction::{ExtractionMethod, ExtractionResult, ExtractionRouter};
pub use pipeline::{process_document, run_file, run_latest};
pub use storage::JsonStore;
pub use types::{
    AttendanceError, AttendancePercent, AttendanceReport, AttendanceRow, Component, Result,
    StudentHeader,
};
