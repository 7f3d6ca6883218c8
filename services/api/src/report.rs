use crate::infra::InMemorySubmissionRepository;
use clap::Args;
use durability::error::AppError;
use durability::workflows::catalog::{CatalogEntry, ProductCsvImporter};
use durability::workflows::sustainability::{
    score, Assessment, ProductInput, Rating, ServiceError, SummaryStatistics,
    SustainabilityService,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Product name shown in the result
    #[arg(long)]
    pub(crate) name: String,
    /// Material token; repeat the flag for each material
    #[arg(long = "material")]
    pub(crate) materials: Vec<String>,
    /// Product weight in grams
    #[arg(long)]
    pub(crate) weight_grams: f64,
    /// Transport mode: air, rail, sea, or road
    #[arg(long)]
    pub(crate) transport: String,
    /// Packaging: recyclable, biodegradable, or non-recyclable
    #[arg(long)]
    pub(crate) packaging: String,
    /// Print the assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV catalog with product_name,materials,weight_grams,transport,packaging columns
    pub(crate) catalog: PathBuf,
    /// Print the batch report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        name,
        materials,
        weight_grams,
        transport,
        packaging,
        json,
    } = args;

    let assessment = score(&ProductInput {
        product_name: name,
        materials,
        weight_grams,
        transport,
        packaging,
    })?;

    if json {
        print_json(&assessment);
    } else {
        render_assessment(&assessment);
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct BatchRow {
    line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sustainability_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<Rating>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    rows: Vec<BatchRow>,
    rejected: usize,
    summary: SummaryStatistics,
}

pub(crate) async fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { catalog, json } = args;

    let entries = ProductCsvImporter::from_path(&catalog)?;
    let service = SustainabilityService::new(Arc::new(InMemorySubmissionRepository::default()));
    let report = build_batch_report(&service, entries).await?;

    if json {
        print_json(&report);
    } else {
        println!("Batch scoring: {}", catalog.display());
        render_batch_report(&report);
    }

    Ok(())
}

async fn build_batch_report(
    service: &SustainabilityService<InMemorySubmissionRepository>,
    entries: Vec<CatalogEntry>,
) -> Result<BatchReport, AppError> {
    let mut rows = Vec::with_capacity(entries.len());
    let mut rejected = 0;

    for entry in entries {
        let outcome = match entry.product {
            Ok(product) => service.submit(product).await,
            Err(err) => Err(ServiceError::from(err)),
        };

        let row = match outcome {
            Ok(record) => BatchRow {
                line: entry.line,
                product_name: Some(record.product_name),
                sustainability_score: Some(record.sustainability_score),
                rating: Some(record.rating),
                suggestions: record.suggestions,
                error: None,
            },
            Err(ServiceError::Validation(err)) => {
                rejected += 1;
                BatchRow {
                    line: entry.line,
                    product_name: None,
                    sustainability_score: None,
                    rating: None,
                    suggestions: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
            Err(other) => return Err(other.into()),
        };
        rows.push(row);
    }

    let summary = service.summary().await?;
    Ok(BatchReport {
        rows,
        rejected,
        summary,
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("failed to render JSON output: {err}"),
    }
}

fn render_assessment(assessment: &Assessment) {
    println!("Sustainability assessment");
    println!(
        "{}: {} / 100 (rating {})",
        assessment.product_name, assessment.sustainability_score, assessment.rating
    );

    println!("\nRule contributions");
    if assessment.components.is_empty() {
        println!("- none (baseline 100)");
    }
    for component in &assessment.components {
        println!("- {:+} {}", component.delta, component.notes);
    }

    render_suggestions(&assessment.suggestions);
}

fn render_suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("\nSuggestions: none");
    } else {
        println!("\nSuggestions");
        for suggestion in suggestions {
            println!("- {suggestion}");
        }
    }
}

fn render_batch_report(report: &BatchReport) {
    println!("\nProducts");
    for row in &report.rows {
        match (&row.error, &row.product_name, row.sustainability_score, row.rating) {
            (Some(error), _, _, _) => println!("- line {}: rejected ({error})", row.line),
            (None, Some(name), Some(value), Some(rating)) => {
                println!("- line {}: {name} scored {value} ({rating})", row.line)
            }
            _ => println!("- line {}: no result", row.line),
        }
    }

    render_summary(&report.summary, report.rejected);
}

fn render_summary(summary: &SummaryStatistics, rejected: usize) {
    println!("\nSummary");
    println!("- products scored: {}", summary.total_products);
    if rejected > 0 {
        println!("- rows rejected: {rejected}");
    }
    println!(
        "- average {:.1}, min {}, max {}",
        summary.average_score, summary.min_score, summary.max_score
    );

    let distribution: Vec<String> = Rating::ordered()
        .into_iter()
        .map(|rating| format!("{rating}={}", summary.rating_count(rating)))
        .collect();
    println!("- ratings: {}", distribution.join(", "));

    if summary.top_issues.is_empty() {
        println!("- top issues: none");
    } else {
        println!("- top issues: {}", summary.top_issues.join("; "));
    }
}
