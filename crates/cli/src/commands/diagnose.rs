//! Interactive patient form and localized diagnosis

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use colored::Colorize;
use obesity_core::ObesityPipeline;

use crate::client::PredictClient;
use crate::form;
use crate::output::print_error;

/// Portuguese rendering of each diagnosis class
const DIAGNOSES: [(&str, &str); 7] = [
    ("Insufficient_Weight", "Abaixo do Peso"),
    ("Normal_Weight", "Peso Normal"),
    ("Overweight_Level_I", "Sobrepeso Nível I"),
    ("Overweight_Level_II", "Sobrepeso Nível II"),
    ("Obesity_Type_I", "Obesidade Tipo I"),
    ("Obesity_Type_II", "Obesidade Tipo II"),
    ("Obesity_Type_III", "Obesidade Tipo III"),
];

fn translate(label: &str) -> &str {
    DIAGNOSES
        .iter()
        .find(|(raw, _)| *raw == label)
        .map(|(_, localized)| *localized)
        .unwrap_or(label)
}

pub async fn run(model: &str, remote: Option<&str>) -> Result<()> {
    println!("{}", "Sistema Preditivo de Obesidade".bold());
    println!("Preencha os dados clínicos do paciente para prever o nível de obesidade.");
    println!();

    let record = form::collect_record()?;

    let result = match remote {
        Some(url) => {
            println!();
            println!("Consultando o serviço em {url}");
            let client = PredictClient::new(url)?;
            client.predict(&record).await
        }
        None => {
            let pipeline = ObesityPipeline::load(model)
                .with_context(|| format!("Failed to load pipeline from {model}"))?;
            let trained_at = Utc
                .timestamp_opt(pipeline.metadata.trained_at, 0)
                .single()
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "?".to_string());
            println!();
            println!("Modelo treinado em {trained_at}");
            pipeline.predict(&record).map_err(anyhow::Error::from)
        }
    };

    match result {
        Ok(label) => {
            println!();
            println!(
                "{} {}",
                "Diagnóstico Preditivo:".green().bold(),
                translate(&label).bold()
            );
            Ok(())
        }
        Err(e) => {
            print_error(&format!("Erro ao realizar a predição. Detalhes: {e}"));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obesity_core::LABELS;

    #[test]
    fn test_every_label_has_a_translation() {
        for label in LABELS {
            assert_ne!(translate(label), label, "missing translation for {label}");
        }
    }

    #[test]
    fn test_unknown_label_passes_through() {
        assert_eq!(translate("Mystery"), "Mystery");
    }
}
