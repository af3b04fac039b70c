//! Configuration module.
//!
//! Structured configuration loading from environment variables (a `.env` file
//! is honoured by the binary), split into listener and artifact settings.

mod artifact_config;
mod server_config;

pub use artifact_config::{ArtifactEnvConfig, DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH};
pub use server_config::ServerEnvConfig;

use anyhow::Result;
use std::env;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub artifacts: ArtifactEnvConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            server: ServerEnvConfig::from_lookup(&lookup)?,
            artifacts: ArtifactEnvConfig::from_lookup(&lookup),
        })
    }
}
