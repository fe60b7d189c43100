//! HTTP client for a running prediction service

use anyhow::{Context, Result};
use obesity_core::PatientRecord;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct PredictEnvelope {
    data: PredictData,
}

#[derive(Debug, Deserialize)]
struct PredictData {
    prediction: String,
}

/// Client for the prediction service's `/predict` route
pub struct PredictClient {
    client: Client,
    base_url: Url,
}

impl PredictClient {
    /// Create a new prediction client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid service URL")?;

        Ok(Self { client, base_url })
    }

    /// Request a diagnosis for one patient record
    pub async fn predict(&self, record: &PatientRecord) -> Result<String> {
        let url = self.base_url.join("predict").context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(record)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("service error ({}): {}", status, body);
        }

        let envelope: PredictEnvelope =
            response.json().await.context("Failed to parse response")?;
        Ok(envelope.data.prediction)
    }
}
