//! Train the pipeline and report the outcome to the operator

use anyhow::{Context, Result};
use colored::Colorize;
use obesity_core::{training, Dataset, SearchGrid};
use tabled::{settings::Style, Table, Tabled};

use crate::output::{format_percent, print_info, print_success};

/// Row for the classification report table
#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Precision")]
    precision: String,
    #[tabled(rename = "Recall")]
    recall: String,
    #[tabled(rename = "F1")]
    f1: String,
    #[tabled(rename = "Support")]
    support: usize,
}

pub fn run(data: &str, target: &str, output: &str) -> Result<()> {
    print_info(&format!("Loading corpus from {data}"));
    let dataset = Dataset::from_csv_path(data, target)
        .with_context(|| format!("Failed to load corpus from {data}"))?;

    let grid = SearchGrid::exhaustive();
    print_info(&format!(
        "Searching {} configurations with {}-fold cross-validation",
        grid.len(),
        training::CV_FOLDS
    ));

    let outcome = obesity_core::train_pipeline(&dataset, &grid)?;

    println!();
    println!("{}", "Best hyperparameters:".bold());
    println!("  {}", outcome.best.params);
    println!(
        "  cross-validation accuracy: {}",
        format_percent(outcome.best.cv_accuracy)
    );
    println!();
    println!(
        "{} {}",
        "Held-out accuracy:".bold(),
        format_percent(outcome.evaluation.accuracy)
    );
    println!();

    let rows: Vec<ClassRow> = outcome
        .evaluation
        .per_class
        .iter()
        .map(|m| ClassRow {
            class: m.class.clone(),
            precision: format!("{:.2}", m.precision),
            recall: format!("{:.2}", m.recall),
            f1: format!("{:.2}", m.f1),
            support: m.support,
        })
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();

    outcome
        .pipeline
        .save(output)
        .with_context(|| format!("Failed to write pipeline to {output}"))?;
    print_success(&format!("Pipeline saved to {output}"));

    Ok(())
}
