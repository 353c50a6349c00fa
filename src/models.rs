use serde::Serialize;
use thiserror::Error;

/// Module header extracted from the report text. Both fields fall back to
/// "Unknown" when the header pattern finds no match.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    pub code: String,
    pub name: String,
}

impl ModuleInfo {
    pub fn unknown() -> Self {
        ModuleInfo {
            code: "Unknown".to_string(),
            name: "Unknown".to_string(),
        }
    }
}

/// Letter grades in ranking order, best first. `Unknown` absorbs any token
/// the report uses that we do not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    E,
    F,
    #[serde(rename = "?")]
    Unknown,
}

impl Grade {
    /// Recognized grades in ranking order, used for fixed-order
    /// distribution tables.
    pub const ALL: [Grade; 13] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::E,
        Grade::F,
    ];

    pub fn parse(token: &str) -> Grade {
        match token {
            "A+" => Grade::APlus,
            "A" => Grade::A,
            "A-" => Grade::AMinus,
            "B+" => Grade::BPlus,
            "B" => Grade::B,
            "B-" => Grade::BMinus,
            "C+" => Grade::CPlus,
            "C" => Grade::C,
            "C-" => Grade::CMinus,
            "D+" => Grade::DPlus,
            "D" => Grade::D,
            "E" => Grade::E,
            "F" => Grade::F,
            _ => Grade::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
            Grade::Unknown => "?",
        }
    }
}

/// Result status column. IC is "incomplete", distinct from a fail but
/// counted against the pass rate in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Pass,
    Fail,
    #[serde(rename = "IC")]
    Ic,
}

impl Status {
    pub fn parse(token: &str) -> Option<Status> {
        match token {
            "Pass" => Some(Status::Pass),
            "Fail" => Some(Status::Fail),
            "IC" => Some(Status::Ic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "Pass",
            Status::Fail => "Fail",
            Status::Ic => "IC",
        }
    }
}

/// Qualitative performance band, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Tier {
    Excellent,
    HighPerformer,
    Average,
    BelowAverage,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::Excellent,
        Tier::HighPerformer,
        Tier::Average,
        Tier::BelowAverage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent (Top Tier)",
            Tier::HighPerformer => "High Performer",
            Tier::Average => "Average",
            Tier::BelowAverage => "Below Average",
        }
    }
}

/// Which line shape matched during extraction. One discriminant per dataset;
/// mixing shapes within a dataset is never valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordShape {
    WithCa,
    GradeOnly,
}

/// A student row as extracted from the report text, before any metric is
/// derived. `ca_percent` is present exactly when the shape is `WithCa`.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub reg_no: String,
    pub ca_percent: Option<f64>,
    pub grade: Grade,
    pub status: Status,
}

/// A student row with every derived metric attached. Never mutated after
/// derivation; a weight change means recomputing from the raw records.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedRecord {
    pub reg_no: String,
    pub ca_percent: Option<f64>,
    pub grade: Grade,
    pub status: Status,
    /// Scaled CA score in the with-CA shape, grade-band midpoint otherwise.
    pub score: f64,
    pub rank: usize,
    pub percentile: f64,
    pub tier: Tier,
    /// Final-exam percentage range needed to land in the grade's total-mark
    /// band. High end clamped to 100; low end left as computed, so a
    /// negative value signals the grade is already secured.
    pub exam_range: Option<(f64, f64)>,
}

/// CA/final-exam weight split, resolved once per dataset.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeightPolicy {
    pub ca_weight: f64,
    pub final_weight: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", content = "value")]
pub enum QueryResult {
    Found(DerivedRecord),
    Ambiguous(Vec<String>),
    NotFound,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no student records found in the report text")]
    NoRecords,
    #[error("module {0} has no known weight split; supply a CA weight percentage")]
    UnrecognizedModule(String),
    #[error("CA weight must be between 0 and 100, got {0}")]
    InvalidWeight(i64),
}
