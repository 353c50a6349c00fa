use crate::models::DerivedRecord;

/// Writes the derived table to a CSV file, one row per student in rank
/// order. Returns the number of rows written.
pub fn write_csv(records: &[DerivedRecord], path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Serialize)]
    struct CsvRow<'a> {
        rank: usize,
        reg_no: &'a str,
        ca_percent: Option<f64>,
        grade: &'a str,
        status: &'a str,
        score: f64,
        percentile: f64,
        tier: &'a str,
        exam_low: Option<f64>,
        exam_high: Option<f64>,
    }

    let mut writer = csv::Writer::from_path(path)?;
    let mut written = 0usize;

    for record in records {
        let (exam_low, exam_high) = match record.exam_range {
            Some((low, high)) => (Some(low), Some(high)),
            None => (None, None),
        };
        writer.serialize(CsvRow {
            rank: record.rank,
            reg_no: &record.reg_no,
            ca_percent: record.ca_percent,
            grade: record.grade.as_str(),
            status: record.status.as_str(),
            score: record.score,
            percentile: record.percentile,
            tier: record.tier.label(),
            exam_low,
            exam_high,
        })?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use crate::models::{Grade, RawRecord, Status, WeightPolicy};

    #[test]
    fn writes_one_row_per_record_in_rank_order() {
        let records = vec![
            RawRecord {
                reg_no: "IT23831322".to_string(),
                ca_percent: Some(78.5),
                grade: Grade::AMinus,
                status: Status::Pass,
            },
            RawRecord {
                reg_no: "IT23831323".to_string(),
                ca_percent: Some(91.0),
                grade: Grade::APlus,
                status: Status::Pass,
            },
        ];
        let derived = metrics::derive_with_ca(
            &records,
            WeightPolicy {
                ca_weight: 0.4,
                final_weight: 0.6,
            },
        );

        let dir = std::env::temp_dir().join("marks-analyzer-export-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("derived.csv");
        let written = write_csv(&derived, &path).unwrap();
        assert_eq!(written, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("rank,reg_no"));
        assert!(lines.next().unwrap().starts_with("1,IT23831323"));
        assert!(lines.next().unwrap().starts_with("2,IT23831322"));
        std::fs::remove_file(&path).ok();
    }
}
