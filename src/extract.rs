use regex::Regex;

use crate::models::{AnalysisError, Grade, ModuleInfo, RawRecord, RecordShape, Status};

const MODULE_PATTERN: &str = r"(IT\d{4})\s*-\s*([^\n\-]+)";
const WITH_CA_PATTERN: &str =
    r"\d+\s+(IT\s?\d{2}\s?\d{4}\s?\d{2})\s+(\d{1,3}(?:\.\d{1,2})?)\s+([A-Z+\-]+)\s+(Pass|Fail|IC)";
const GRADE_ONLY_PATTERN: &str =
    r"\d+\s+(IT\s?\d{2}\s?\d{4}\s?\d{2})\s+([A-Z+\-]+)\s+(Pass|Fail|IC)";

/// Strips internal whitespace and uppercases a registration number. Report
/// text often splits the number across spacing artifacts from PDF layout.
pub fn normalize_reg_no(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Finds the module header in the report text. No match is not an error;
/// callers get the "Unknown" sentinel and the weight resolver treats it as
/// an unrecognized module.
pub fn module_info(text: &str) -> ModuleInfo {
    let re = Regex::new(MODULE_PATTERN).expect("invalid module header pattern");
    match re.captures(text) {
        Some(caps) => ModuleInfo {
            code: caps[1].trim().to_string(),
            name: caps[2].trim().to_string(),
        },
        None => ModuleInfo::unknown(),
    }
}

/// Scans the report text for student rows. The with-CA shape is tried first;
/// the grade-only shape only when the first yields nothing, so a dataset
/// always has a single shape. Zero matches under both shapes is the one
/// fatal condition in the pipeline.
pub fn student_records(text: &str) -> Result<(RecordShape, Vec<RawRecord>), AnalysisError> {
    let with_ca = Regex::new(WITH_CA_PATTERN).expect("invalid with-CA row pattern");
    let mut records = Vec::new();

    for caps in with_ca.captures_iter(text) {
        let Some(status) = Status::parse(&caps[4]) else {
            continue;
        };
        records.push(RawRecord {
            reg_no: normalize_reg_no(&caps[1]),
            // the pattern only admits digit groups, so this cannot fail
            ca_percent: Some(caps[2].parse().unwrap_or(0.0)),
            grade: Grade::parse(&caps[3]),
            status,
        });
    }

    if !records.is_empty() {
        return Ok((RecordShape::WithCa, records));
    }

    let grade_only = Regex::new(GRADE_ONLY_PATTERN).expect("invalid grade-only row pattern");
    for caps in grade_only.captures_iter(text) {
        let Some(status) = Status::parse(&caps[3]) else {
            continue;
        };
        records.push(RawRecord {
            reg_no: normalize_reg_no(&caps[1]),
            ca_percent: None,
            grade: Grade::parse(&caps[2]),
            status,
        });
    }

    if records.is_empty() {
        return Err(AnalysisError::NoRecords);
    }
    Ok((RecordShape::GradeOnly, records))
}
