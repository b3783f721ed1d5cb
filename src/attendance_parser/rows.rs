// Two-tier attendance row extraction
//
// Lines are normalised first (trimmed, whitespace runs collapsed, blanks
// dropped). The strict rule set runs over every line; only when it finds
// nothing does the loose rule set run. Tiers are never mixed.

use crate::types::{AttendancePercent, AttendanceRow, Component};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTier {
    Strict,
    Loose,
}

struct RowRule {
    tier: RowTier,
    pattern: Regex,
    percent: fn(&str) -> Option<AttendancePercent>,
}

impl RowRule {
    fn apply(&self, line: &str) -> Option<AttendanceRow> {
        let caps = self.pattern.captures(line)?;
        row_from_captures(&caps, self.percent)
    }
}

static STRICT_ROW: Lazy<RowRule> = Lazy::new(|| RowRule {
    tier: RowTier::Strict,
    pattern: Regex::new(
        r"(?i)^(\d+)\s+(.+?)\s+([A-Z0-9]+)\s+(Theory|Practical)\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d{1,3})(?:\b|$)",
    )
    .unwrap(),
    percent: |s| s.parse().ok().map(AttendancePercent::Whole),
});

// OCR breaks digit counts and injects stray punctuation into codes
static LOOSE_ROW: Lazy<RowRule> = Lazy::new(|| RowRule {
    tier: RowTier::Loose,
    pattern: Regex::new(
        r"(?i)^(\d+)\s+(.+?)\s+([0-9A-Z][0-9A-Z./\-]*)\s+(Theory|Practical)\s+(\d+)\s+(\d+)\s+(\d+)\s+([\d.]+)",
    )
    .unwrap(),
    percent: |s| s.parse().ok().map(AttendancePercent::Fractional),
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Trim each line, collapse runs of 2+ whitespace to one space, drop blanks.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| WHITESPACE_RUN.replace_all(line, " ").into_owned())
        .collect()
}

/// Rows in source order, with the tier that produced them.
///
/// Returns `None` for the tier when neither rule set matched anything.
pub fn extract_rows(lines: &[String]) -> (Option<RowTier>, Vec<AttendanceRow>) {
    for rule in [&*STRICT_ROW, &*LOOSE_ROW] {
        let rows: Vec<AttendanceRow> = lines.iter().filter_map(|line| rule.apply(line)).collect();
        if !rows.is_empty() {
            return (Some(rule.tier), rows);
        }
    }
    (None, Vec::new())
}

fn row_from_captures(
    caps: &Captures,
    percent: fn(&str) -> Option<AttendancePercent>,
) -> Option<AttendanceRow> {
    let number = |i: usize| caps[i].parse::<u32>().ok();

    Some(AttendanceRow {
        sno: number(1)?,
        class_title: caps[2].trim().to_string(),
        subject_code: caps[3].trim().to_string(),
        component: Component::from_label(&caps[4])?,
        total_lecture_conducted: number(5)?,
        lecture_attended: number(6)?,
        compensatory: number(7)?,
        attendance_percent: percent(&caps[8])?,
    })
}
