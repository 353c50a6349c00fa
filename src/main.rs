use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

mod export;
mod extract;
mod metrics;
mod models;
mod query;
mod report;
mod summary;
mod weights;

use models::{DerivedRecord, ModuleInfo, QueryResult, RecordShape, WeightPolicy};

#[derive(Parser)]
#[command(name = "marks-analyzer")]
#[command(about = "Student marks analyzer for extracted academic report text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a report and print the ranked dataset with a class summary
    Analyze {
        #[arg(long)]
        input: PathBuf,
        /// CA weight percentage, required when the module is unrecognized
        #[arg(long)]
        ca_weight: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Look up one student by full or partial registration number
    Lookup {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        reg: String,
        #[arg(long)]
        ca_weight: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown class report
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        ca_weight: Option<i64>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export the derived table as CSV
    Export {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        ca_weight: Option<i64>,
        #[arg(long, default_value = "marks.csv")]
        out: PathBuf,
    },
}

/// One fully derived dataset, produced fresh per invocation. The CA weight
/// override travels here explicitly rather than through any ambient state.
struct Analysis {
    module: ModuleInfo,
    shape: RecordShape,
    weights: Option<WeightPolicy>,
    records: Vec<DerivedRecord>,
}

fn run_analysis(input: &Path, ca_weight: Option<i64>) -> anyhow::Result<Analysis> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read report text from {}", input.display()))?;

    let module = extract::module_info(&text);
    let (shape, raw) = extract::student_records(&text)?;

    let (weights, records) = match shape {
        RecordShape::WithCa => {
            let policy = weights::resolve(&module.code, ca_weight)?;
            (Some(policy), metrics::derive_with_ca(&raw, policy))
        }
        RecordShape::GradeOnly => (None, metrics::derive_grade_only(&raw)),
    };

    Ok(Analysis {
        module,
        shape,
        weights,
        records,
    })
}

fn print_dataset(analysis: &Analysis) {
    println!(
        "Module: {} - {} ({} students)",
        analysis.module.code,
        analysis.module.name,
        analysis.records.len()
    );
    for record in &analysis.records {
        println!(
            "{:>3}. {} {} ({}) score {:.2}, top {:.2}%, {}",
            record.rank,
            record.reg_no,
            record.grade.as_str(),
            record.status.as_str(),
            record.score,
            record.percentile,
            record.tier.label()
        );
    }

    let summary = summary::summarize(&analysis.records);
    println!();
    println!(
        "Pass {} / {} (class average {:.2})",
        summary.pass, summary.total, summary.class_average
    );
    for entry in &summary.tier_distribution {
        println!("- {}: {}", entry.label, entry.count);
    }
}

fn print_student(analysis: &Analysis, record: &DerivedRecord) {
    let summary = summary::summarize(&analysis.records);
    let (min_total, max_total) = metrics::grade_band(record.grade);

    println!("Student Performance Report");
    println!("RegNo: {}", record.reg_no);
    println!("Grade: {}", record.grade.as_str());
    println!(
        "Status: {} ({})",
        record.status.as_str(),
        record.tier.label()
    );

    match (record.ca_percent, analysis.weights) {
        (Some(ca), Some(policy)) => {
            println!("CA Marks (%): {ca}");
            println!(
                "CA Marks (scaled): {:.1} out of {:.0}",
                record.score,
                policy.ca_weight * 100.0
            );
            println!("Final Marks Range: {min_total:.0} - {max_total:.0}");
            if let Some((low, high)) = record.exam_range {
                println!("Final Exam Marks Needed: {low:.1} - {high:.1}");
            }
            println!(
                "Class Average (CA): {:.2} (Raw Avg: {:.2}%)",
                summary.class_average,
                summary.class_average / policy.ca_weight
            );
        }
        _ => {
            println!("Estimated Score (band midpoint): {:.1}", record.score);
            println!("Class Average (est.): {:.2}", summary.class_average);
        }
    }

    println!("Rank: {} / {}", record.rank, summary.total);
    println!("Percentile: Top {:.2}%", record.percentile);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            ca_weight,
            json,
        } => {
            let analysis = run_analysis(&input, ca_weight)?;
            if json {
                let payload = serde_json::json!({
                    "module": analysis.module,
                    "shape": analysis.shape,
                    "weights": analysis.weights,
                    "records": analysis.records,
                    "summary": summary::summarize(&analysis.records),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_dataset(&analysis);
            }
        }
        Commands::Lookup {
            input,
            reg,
            ca_weight,
            json,
        } => {
            let analysis = run_analysis(&input, ca_weight)?;
            let result = query::lookup(&analysis.records, &reg);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }
            match result {
                QueryResult::Found(record) => print_student(&analysis, &record),
                QueryResult::Ambiguous(ids) => {
                    println!("Multiple matches found, enter a fuller RegNo:");
                    for id in ids {
                        println!("- {id}");
                    }
                }
                QueryResult::NotFound => println!("No matching student found."),
            }
        }
        Commands::Report {
            input,
            ca_weight,
            out,
        } => {
            let analysis = run_analysis(&input, ca_weight)?;
            let report = report::build_report(&analysis.module, analysis.shape, &analysis.records);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export {
            input,
            ca_weight,
            out,
        } => {
            let analysis = run_analysis(&input, ca_weight)?;
            let written = export::write_csv(&analysis.records, &out)?;
            println!("Exported {written} rows to {}.", out.display());
        }
    }

    Ok(())
}
