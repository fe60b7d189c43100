//! One-shot prediction from a JSON document

use std::io::Read;

use anyhow::{anyhow, Context, Result};
use obesity_core::{ObesityPipeline, PatientRecord};

pub fn run(input: &str, model: &str) -> Result<()> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let record =
        PatientRecord::from_json(&value).map_err(|e| anyhow!("invalid record: {e}"))?;

    let pipeline = ObesityPipeline::load(model)
        .with_context(|| format!("Failed to load pipeline from {model}"))?;
    let label = pipeline.predict(&record)?;
    println!("{label}");

    Ok(())
}
