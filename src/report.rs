use std::fmt::Write;

use chrono::Utc;

use crate::models::{DerivedRecord, ModuleInfo, RecordShape};
use crate::summary;

/// Builds the markdown class report. With-CA datasets show the scaled CA
/// column; grade-only datasets show the band-midpoint estimate instead.
pub fn build_report(
    module: &ModuleInfo,
    shape: RecordShape,
    records: &[DerivedRecord],
) -> String {
    let summary = summary::summarize(records);
    let score_label = match shape {
        RecordShape::WithCa => "CA (scaled)",
        RecordShape::GradeOnly => "Est. score",
    };

    let mut output = String::new();

    let _ = writeln!(output, "# Marks Analysis Report");
    let _ = writeln!(
        output,
        "Module {} - {} (generated {})",
        module.code,
        module.name,
        Utc::now().date_naive()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Class Overview");
    let _ = writeln!(output, "- Students: {}", summary.total);
    let _ = writeln!(output, "- Passed: {}", summary.pass);
    let _ = writeln!(output, "- Not passed (incl. incomplete): {}", summary.not_pass);
    let _ = writeln!(
        output,
        "- Class average ({}): {:.2}",
        score_label, summary.class_average
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Performance Distribution");
    for entry in &summary.tier_distribution {
        let _ = writeln!(output, "- {}: {}", entry.label, entry.count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Distribution");
    for entry in &summary.grade_distribution {
        let _ = writeln!(output, "- {}: {}", entry.label, entry.count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Ranking");

    if records.is_empty() {
        let _ = writeln!(output, "No students in this dataset.");
    } else {
        for record in records {
            let _ = writeln!(
                output,
                "{}. {} grade {} ({}) {} {:.2}, top {:.2}%",
                record.rank,
                record.reg_no,
                record.grade.as_str(),
                record.status.as_str(),
                score_label,
                record.score,
                record.percentile
            );
        }
    }

    output
}
