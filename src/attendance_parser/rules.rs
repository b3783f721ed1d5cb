// Declarative header-field rules
//
// Each rule is a pattern plus the capture group holding the value. Rules are
// evaluated independently against the full text and the first match wins.

use crate::types::StudentHeader;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    University,
    Address,
    RollNo,
    Term,
    Name,
    AcademicLevel,
    Course,
}

pub struct FieldRule {
    pub field: HeaderField,
    pattern: Regex,
}

impl FieldRule {
    fn new(field: HeaderField, pattern: &str) -> Self {
        Self {
            field,
            // patterns are compile-time literals below
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    /// Trimmed value of capture group 1, if the rule matches.
    pub fn apply(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

pub static HEADER_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        // institution name opens with SHRI on its own line
        FieldRule::new(HeaderField::University, r"(?im)^(SHRI[^\n]+)"),
        FieldRule::new(HeaderField::Address, r"(?im)^SHRI[^\n]+\n([^\n]+)"),
        FieldRule::new(HeaderField::RollNo, r"Roll No[:\s]*([\dA-Za-z\-]+)"),
        FieldRule::new(HeaderField::Term, r"Term[:\s]*([^\n]+)"),
        FieldRule::new(HeaderField::Name, r"Name[:\s]*([A-Za-z .]+[A-Za-z])"),
        FieldRule::new(HeaderField::AcademicLevel, r"Academic Level[:\s]*([0-9A-Za-z]+)"),
        FieldRule::new(HeaderField::Course, r"Course[:\s]*([^\n]+)"),
    ]
});

pub fn extract_header(text: &str) -> StudentHeader {
    let mut header = StudentHeader::default();

    for rule in HEADER_RULES.iter() {
        let value = rule.apply(text);
        let slot = match rule.field {
            HeaderField::University => &mut header.university,
            HeaderField::Address => &mut header.address,
            HeaderField::RollNo => &mut header.roll_no,
            HeaderField::Term => &mut header.term,
            HeaderField::Name => &mut header.name,
            HeaderField::AcademicLevel => &mut header.academic_level,
            HeaderField::Course => &mut header.course,
        };
        *slot = value;
    }

    header
}

static OVERALL_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Overall Attendance %[:=]*[:\s]*(\d+(?:\.\d+)?)").unwrap());

// Used on the `%`-stripped text, where the label loses its percent sign
static OVERALL_PERCENT_STRIPPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Overall Attendance\s*[:=]*[:\s]*(\d+(?:\.\d+)?)").unwrap());

/// Overall percentage, retried once with every `%` removed.
pub fn extract_overall_percent(text: &str) -> Option<f64> {
    let capture = OVERALL_PERCENT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .or_else(|| {
            let stripped = text.replace('%', "");
            OVERALL_PERCENT_STRIPPED
                .captures(&stripped)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })?;

    capture.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
SHRI RAMSWAROOP MEMORIAL UNIVERSITY
Lucknow-Deva Road, Barabanki, Uttar Pradesh
Student Attendance Report
Roll No: 202210101110123 Term: 2502
Name: Aarav K. Sharma
Academic Level: 3
Course: B.Tech Computer Science
";

    #[test]
    fn test_full_header() {
        let header = extract_header(HEADER);
        assert_eq!(header.university.as_deref(), Some("SHRI RAMSWAROOP MEMORIAL UNIVERSITY"));
        assert_eq!(
            header.address.as_deref(),
            Some("Lucknow-Deva Road, Barabanki, Uttar Pradesh")
        );
        assert_eq!(header.roll_no.as_deref(), Some("202210101110123"));
        assert_eq!(header.term.as_deref(), Some("2502"));
        assert_eq!(header.name.as_deref(), Some("Aarav K. Sharma"));
        assert_eq!(header.academic_level.as_deref(), Some("3"));
        assert_eq!(header.course.as_deref(), Some("B.Tech Computer Science"));
    }

    #[test]
    fn test_university_must_start_a_line() {
        let header = extract_header("Affiliated to SHRI Something\nnext line\n");
        assert_eq!(header.university, None);
        assert_eq!(header.address, None);
    }

    #[test]
    fn test_university_prefix_is_case_insensitive() {
        let header = extract_header("Shri Ram College\r\nMain Road\r\n");
        assert_eq!(header.university.as_deref(), Some("Shri Ram College"));
        assert_eq!(header.address.as_deref(), Some("Main Road"));
    }

    #[test]
    fn test_name_stops_at_non_letters() {
        let header = extract_header("Name: Priya Verma 2024\n");
        assert_eq!(header.name.as_deref(), Some("Priya Verma"));
    }

    #[test]
    fn test_missing_labels_are_none() {
        assert_eq!(extract_header("nothing useful here"), StudentHeader::default());
    }

    #[test]
    fn test_overall_percent() {
        assert_eq!(extract_overall_percent("Overall Attendance %: 91.5"), Some(91.5));
        assert_eq!(extract_overall_percent("Overall Attendance %= 77"), Some(77.0));
        assert_eq!(extract_overall_percent("Overall Attendance %: 91.5."), Some(91.5));
    }

    #[test]
    fn test_overall_percent_retry_without_percent_sign() {
        assert_eq!(extract_overall_percent("Overall Attendance: 84.25"), Some(84.25));
        assert_eq!(extract_overall_percent("Overall Attendance % : %62"), Some(62.0));
    }

    #[test]
    fn test_overall_percent_unparseable_is_none() {
        assert_eq!(extract_overall_percent("Overall Attendance %: ..."), None);
        assert_eq!(extract_overall_percent("no summary"), None);
    }
}
