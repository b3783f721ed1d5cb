// Core types for attendance report extraction
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const REPORT_TITLE: &str = "Student Attendance Report";
pub const OVERALL_ATTENDANCE_FORMULA: &str =
    "(Total Lecture Attended / Total Lecture Conducted) * 100";

/// Identity fields printed above the attendance table.
///
/// Every field is optional: report templates drift and a missing label is
/// an expected outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentHeader {
    pub university: Option<String>,
    pub address: Option<String>,
    pub roll_no: Option<String>,
    pub term: Option<String>,
    pub name: Option<String>,
    pub academic_level: Option<String>,
    pub course: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    Theory,
    Practical,
}

impl Component {
    /// Case-insensitive match on the literal printed in the table.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("theory") {
            Some(Component::Theory)
        } else if label.eq_ignore_ascii_case("practical") {
            Some(Component::Practical)
        } else {
            None
        }
    }
}

/// Attendance percentage as it was printed.
///
/// Clean text yields whole numbers; degraded OCR text may carry a fraction.
/// Serialized untagged so whole values stay JSON integers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttendancePercent {
    Whole(u32),
    Fractional(f64),
}

impl AttendancePercent {
    pub fn as_f64(&self) -> f64 {
        match *self {
            AttendancePercent::Whole(p) => p as f64,
            AttendancePercent::Fractional(p) => p,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub sno: u32,
    pub class_title: String,
    pub subject_code: String,
    pub component: Component,
    pub total_lecture_conducted: u32,
    pub lecture_attended: u32,
    pub compensatory: u32,
    pub attendance_percent: AttendancePercent,
}

/// One parsed report. Built in a single pass and never mutated afterwards,
/// so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ReportArtifact", from = "ReportArtifact")]
pub struct AttendanceReport {
    header: StudentHeader,
    report_title: String,
    rows: Vec<AttendanceRow>,
    overall_attendance_percent: Option<f64>,
    overall_attendance_formula: String,
    source_file: String,
}

impl AttendanceReport {
    pub fn new(
        header: StudentHeader,
        rows: Vec<AttendanceRow>,
        overall_attendance_percent: Option<f64>,
        source_file: impl Into<String>,
    ) -> Self {
        Self {
            header,
            report_title: REPORT_TITLE.to_string(),
            rows,
            overall_attendance_percent,
            overall_attendance_formula: OVERALL_ATTENDANCE_FORMULA.to_string(),
            source_file: source_file.into(),
        }
    }

    pub fn header(&self) -> &StudentHeader {
        &self.header
    }

    pub fn report_title(&self) -> &str {
        &self.report_title
    }

    pub fn rows(&self) -> &[AttendanceRow] {
        &self.rows
    }

    pub fn overall_attendance_percent(&self) -> Option<f64> {
        self.overall_attendance_percent
    }

    pub fn overall_attendance_formula(&self) -> &str {
        &self.overall_attendance_formula
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }
}

// On-disk shape: institution fields flat, student fields nested.
#[derive(Serialize, Deserialize)]
struct ReportArtifact {
    university: Option<String>,
    address: Option<String>,
    report_title: String,
    student: StudentArtifact,
    attendance_rows: Vec<AttendanceRow>,
    overall_attendance_percent: Option<f64>,
    overall_attendance_formula: String,
    source_file: String,
}

#[derive(Serialize, Deserialize)]
struct StudentArtifact {
    roll_no: Option<String>,
    term: Option<String>,
    name: Option<String>,
    academic_level: Option<String>,
    course: Option<String>,
}

impl From<AttendanceReport> for ReportArtifact {
    fn from(report: AttendanceReport) -> Self {
        let StudentHeader {
            university,
            address,
            roll_no,
            term,
            name,
            academic_level,
            course,
        } = report.header;

        Self {
            university,
            address,
            report_title: report.report_title,
            student: StudentArtifact {
                roll_no,
                term,
                name,
                academic_level,
                course,
            },
            attendance_rows: report.rows,
            overall_attendance_percent: report.overall_attendance_percent,
            overall_attendance_formula: report.overall_attendance_formula,
            source_file: report.source_file,
        }
    }
}

impl From<ReportArtifact> for AttendanceReport {
    fn from(artifact: ReportArtifact) -> Self {
        let student = artifact.student;
        Self {
            header: StudentHeader {
                university: artifact.university,
                address: artifact.address,
                roll_no: student.roll_no,
                term: student.term,
                name: student.name,
                academic_level: student.academic_level,
                course: student.course,
            },
            report_title: artifact.report_title,
            rows: artifact.attendance_rows,
            overall_attendance_percent: artifact.overall_attendance_percent,
            overall_attendance_formula: artifact.overall_attendance_formula,
            source_file: artifact.source_file,
        }
    }
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("no PDF files found in {}", dir.display())]
    NoInputAvailable { dir: PathBuf },

    #[error("OCR service error:\n{0}")]
    ExternalService(String),

    #[error("OCR transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl AttendanceError {
    /// True for failures of the text-acquisition stage.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            AttendanceError::ExternalService(_) | AttendanceError::Transport(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AttendanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> AttendanceReport {
        let header = StudentHeader {
            university: Some("SHRI RAMSWAROOP MEMORIAL UNIVERSITY".to_string()),
            address: Some("Lucknow-Deva Road, Barabanki".to_string()),
            roll_no: Some("202210101110123".to_string()),
            term: Some("2502".to_string()),
            name: Some("Aarav Sharma".to_string()),
            academic_level: Some("3".to_string()),
            course: Some("B.Tech CSE".to_string()),
        };
        let rows = vec![AttendanceRow {
            sno: 1,
            class_title: "Data Structures".to_string(),
            subject_code: "CS201".to_string(),
            component: Component::Theory,
            total_lecture_conducted: 40,
            lecture_attended: 35,
            compensatory: 2,
            attendance_percent: AttendancePercent::Whole(88),
        }];
        AttendanceReport::new(header, rows, Some(91.5), "report.pdf")
    }

    #[test]
    fn test_component_labels() {
        assert_eq!(Component::from_label("THEORY"), Some(Component::Theory));
        assert_eq!(Component::from_label("practical"), Some(Component::Practical));
        assert_eq!(Component::from_label("Lab"), None);
    }

    #[test]
    fn test_artifact_key_order() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        let keys = [
            "\"university\"",
            "\"address\"",
            "\"report_title\"",
            "\"student\"",
            "\"attendance_rows\"",
            "\"overall_attendance_percent\"",
            "\"overall_attendance_formula\"",
            "\"source_file\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.contains("\"attendance_percent\":88,"));
    }

    #[test]
    fn test_report_round_trip() {
        let report = sample_report();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: AttendanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_fractional_percent_stays_fractional() {
        let value = serde_json::to_value(AttendancePercent::Fractional(88.0)).unwrap();
        assert_eq!(value.to_string(), "88.0");
        let back: AttendancePercent = serde_json::from_value(value).unwrap();
        assert_eq!(back, AttendancePercent::Fractional(88.0));
    }
}
