use crate::models::{DerivedRecord, Grade, RawRecord, Tier, WeightPolicy};

/// Inclusive total-mark range for a grade. Tokens without a published band
/// (F, unrecognized) degrade to a zero-width band instead of failing, which
/// surfaces as zero-valued derived fields downstream.
pub fn grade_band(grade: Grade) -> (f64, f64) {
    match grade {
        Grade::APlus => (90.0, 100.0),
        Grade::A => (80.0, 89.0),
        Grade::AMinus => (75.0, 79.0),
        Grade::BPlus => (70.0, 74.0),
        Grade::B => (65.0, 69.0),
        Grade::BMinus => (60.0, 64.0),
        Grade::CPlus => (55.0, 59.0),
        Grade::C => (45.0, 54.0),
        Grade::CMinus => (40.0, 44.0),
        Grade::DPlus => (35.0, 39.0),
        Grade::D => (30.0, 34.0),
        Grade::E => (0.0, 29.0),
        Grade::F | Grade::Unknown => (0.0, 0.0),
    }
}

/// Performance tier from a raw CA percentage. Band lower bounds are
/// inclusive.
pub fn ca_tier(ca_percent: f64) -> Tier {
    if ca_percent >= 85.0 {
        Tier::Excellent
    } else if ca_percent >= 70.0 {
        Tier::HighPerformer
    } else if ca_percent >= 50.0 {
        Tier::Average
    } else {
        Tier::BelowAverage
    }
}

/// Performance tier from the letter grade alone, for datasets without a CA
/// column.
pub fn grade_tier(grade: Grade) -> Tier {
    match grade {
        Grade::APlus | Grade::A | Grade::AMinus => Tier::Excellent,
        Grade::BPlus | Grade::B => Tier::HighPerformer,
        Grade::BMinus | Grade::CPlus | Grade::C => Tier::Average,
        _ => Tier::BelowAverage,
    }
}

/// Back-solves the final-exam percentage range needed to land in the
/// grade's total-mark band, given the CA contribution already earned. The
/// high end is clamped to 100; the low end is reported as computed, so a
/// negative value means the grade floor is already secured.
pub fn required_exam_range(grade: Grade, ca_percent: f64, weights: WeightPolicy) -> (f64, f64) {
    let (min_total, max_total) = grade_band(grade);
    let ca_contribution = weights.ca_weight * (ca_percent / 100.0);
    let low = ((min_total / 100.0) - ca_contribution) * 100.0 / weights.final_weight;
    let high = ((max_total / 100.0) - ca_contribution) * 100.0 / weights.final_weight;
    (low, high.min(100.0))
}

fn percentile(rank: usize, total: usize) -> f64 {
    100.0 * (1.0 - rank as f64 / total as f64)
}

/// Derives the full metric set for a with-CA dataset. Records come back in
/// rank order; ties on the scaled score keep their original order.
pub fn derive_with_ca(records: &[RawRecord], weights: WeightPolicy) -> Vec<DerivedRecord> {
    let total = records.len();
    let mut scored: Vec<(f64, &RawRecord)> = records
        .iter()
        .map(|record| {
            let ca = record.ca_percent.unwrap_or(0.0);
            (ca * weights.ca_weight, record)
        })
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (score, record))| {
            let rank = index + 1;
            let ca = record.ca_percent.unwrap_or(0.0);
            DerivedRecord {
                reg_no: record.reg_no.clone(),
                ca_percent: record.ca_percent,
                grade: record.grade,
                status: record.status,
                score,
                rank,
                percentile: percentile(rank, total),
                tier: ca_tier(ca),
                exam_range: Some(required_exam_range(record.grade, ca, weights)),
            }
        })
        .collect()
}

/// Derives metrics for a dataset without CA marks. The score is the grade
/// band midpoint, a stand-in for ranking and plotting only, never an earned
/// mark. Order is by grade, ties by registration number.
pub fn derive_grade_only(records: &[RawRecord]) -> Vec<DerivedRecord> {
    let total = records.len();
    let mut ordered: Vec<&RawRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.grade.cmp(&b.grade).then_with(|| a.reg_no.cmp(&b.reg_no)));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let rank = index + 1;
            let (min_total, max_total) = grade_band(record.grade);
            DerivedRecord {
                reg_no: record.reg_no.clone(),
                ca_percent: None,
                grade: record.grade,
                status: record.status,
                score: (min_total + max_total) / 2.0,
                rank,
                percentile: percentile(rank, total),
                tier: grade_tier(record.grade),
                exam_range: None,
            }
        })
        .collect()
}
