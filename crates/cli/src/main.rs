//! Obesity Diagnosis Predictor CLI
//!
//! A command-line tool for training the diagnosis pipeline, running
//! one-shot predictions and filling in the interactive patient form.

mod client;
mod commands;
mod form;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{diagnose, predict, train};
use tracing_subscriber::EnvFilter;

/// Obesity Diagnosis Predictor CLI
#[derive(Parser)]
#[command(name = "obesity")]
#[command(author, version, about = "CLI for the Obesity Diagnosis Predictor", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the diagnosis pipeline from a labeled CSV corpus
    Train {
        /// Path to the training corpus
        #[arg(long, default_value = "data/obesity_base.csv")]
        data: String,

        /// Name of the target column
        #[arg(long, default_value = "Obesity")]
        target: String,

        /// Where to write the pipeline artifact
        #[arg(long, short, default_value = "model_data/obesity_pipeline.bin")]
        output: String,
    },

    /// Predict the diagnosis for one record stored as JSON
    Predict {
        /// Path to a JSON document with the sixteen attributes, or '-' for stdin
        #[arg(long, short)]
        input: String,

        /// Path to the pipeline artifact
        #[arg(
            long,
            env = "OBESITY_MODEL_PATH",
            default_value = "model_data/obesity_pipeline.bin"
        )]
        model: String,
    },

    /// Fill in the patient form interactively and show the diagnosis
    Diagnose {
        /// Path to the pipeline artifact
        #[arg(
            long,
            env = "OBESITY_MODEL_PATH",
            default_value = "model_data/obesity_pipeline.bin"
        )]
        model: String,

        /// Send the record to a running prediction service instead of
        /// loading the artifact locally
        #[arg(long, env = "OBESITY_SERVER_URL")]
        remote: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Train {
            data,
            target,
            output,
        } => train::run(&data, &target, &output),
        Commands::Predict { input, model } => predict::run(&input, &model),
        Commands::Diagnose { model, remote } => diagnose::run(&model, remote.as_deref()).await,
    }
}
