//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listening port for the prediction endpoint
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the trained pipeline artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

fn default_port() -> u16 {
    5000
}

fn default_model_path() -> String {
    "model_data/obesity_pipeline.bin".to_string()
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("OBESITY"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServerConfig {
            port: default_port(),
            model_path: default_model_path(),
        }))
    }
}
