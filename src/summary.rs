use serde::Serialize;

use crate::models::{DerivedRecord, Grade, Status, Tier};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Class-wide aggregates over the derived dataset. Recomputed fresh on
/// every call, never maintained incrementally.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub total: usize,
    pub pass: usize,
    /// Fail and IC together; the source counts incompletes against the
    /// pass rate.
    pub not_pass: usize,
    pub class_average: f64,
    /// Fixed four-tier order, zero-count tiers included.
    pub tier_distribution: Vec<CategoryCount>,
    /// Fixed grade order, zero-count grades included.
    pub grade_distribution: Vec<CategoryCount>,
}

pub fn summarize(records: &[DerivedRecord]) -> ClassSummary {
    let total = records.len();
    let pass = records.iter().filter(|r| r.status == Status::Pass).count();

    let class_average = if total == 0 {
        0.0
    } else {
        records.iter().map(|r| r.score).sum::<f64>() / total as f64
    };

    let tier_distribution = Tier::ALL
        .iter()
        .map(|tier| CategoryCount {
            label: tier.label().to_string(),
            count: records.iter().filter(|r| r.tier == *tier).count(),
        })
        .collect();

    let grade_distribution = Grade::ALL
        .iter()
        .map(|grade| CategoryCount {
            label: grade.as_str().to_string(),
            count: records.iter().filter(|r| r.grade == *grade).count(),
        })
        .collect();

    ClassSummary {
        total,
        pass,
        not_pass: total - pass,
        class_average,
        tier_distribution,
        grade_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use crate::models::{RawRecord, WeightPolicy};

    fn record(reg_no: &str, ca: f64, grade: Grade, status: Status) -> RawRecord {
        RawRecord {
            reg_no: reg_no.to_string(),
            ca_percent: Some(ca),
            grade,
            status,
        }
    }

    fn dataset() -> Vec<DerivedRecord> {
        let records = vec![
            record("IT23831321", 90.0, Grade::APlus, Status::Pass),
            record("IT23831322", 72.0, Grade::BPlus, Status::Pass),
            record("IT23831323", 40.0, Grade::CMinus, Status::Fail),
            record("IT23831324", 20.0, Grade::E, Status::Ic),
        ];
        metrics::derive_with_ca(
            &records,
            WeightPolicy {
                ca_weight: 0.5,
                final_weight: 0.5,
            },
        )
    }

    #[test]
    fn incomplete_counts_against_pass() {
        let summary = summarize(&dataset());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.pass, 2);
        assert_eq!(summary.not_pass, 2);
    }

    #[test]
    fn class_average_is_mean_scaled_score() {
        let summary = summarize(&dataset());
        let expected = (45.0 + 36.0 + 20.0 + 10.0) / 4.0;
        assert!((summary.class_average - expected).abs() < 1e-9);
    }

    #[test]
    fn tier_distribution_keeps_fixed_order_and_zeros() {
        let summary = summarize(&dataset());
        let labels: Vec<&str> = summary
            .tier_distribution
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Excellent (Top Tier)",
                "High Performer",
                "Average",
                "Below Average"
            ]
        );
        let counts: Vec<usize> = summary.tier_distribution.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 2]);
    }

    #[test]
    fn grade_distribution_reports_missing_grades_as_zero() {
        let summary = summarize(&dataset());
        assert_eq!(summary.grade_distribution.len(), Grade::ALL.len());
        let f_entry = summary
            .grade_distribution
            .iter()
            .find(|c| c.label == "F")
            .unwrap();
        assert_eq!(f_entry.count, 0);
        let a_plus = &summary.grade_distribution[0];
        assert_eq!(a_plus.label, "A+");
        assert_eq!(a_plus.count, 1);
    }

    #[test]
    fn empty_dataset_summarizes_to_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.not_pass, 0);
        assert_eq!(summary.class_average, 0.0);
    }
}
