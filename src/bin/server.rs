//! Housing predictor server
//!
//! Serves the pre-fit housing price model over HTTP: a JSON API on
//! `/predict_api` and an HTML form on `/` and `/predict`.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=models/regmodel.json SCALER_PATH=models/scaler.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `BIND_ADDRESS` - Listen address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 5000)
//! - `MODEL_PATH` - Model artifact (default: models/regmodel.json)
//! - `SCALER_PATH` - Scaler artifact (default: models/scaler.json)
//! - `RUST_LOG` - Log filter (default: info)

use anyhow::Result;
use clap::Parser;
use housing_predictor::application::system::Application;
use housing_predictor::config::Config;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

/// Command-line overrides; each flag wins over its environment variable.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long)]
    bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Path to the model artifact
    #[arg(long)]
    model: Option<PathBuf>,

    /// Path to the scaler artifact
    #[arg(long)]
    scaler: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(model) = self.model {
            config.artifacts.model_path = model;
        }
        if let Some(scaler) = self.scaler {
            config.artifacts.scaler_path = scaler;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Housing predictor {} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env()?;
    args.apply(&mut config);
    info!(
        "Configuration loaded: listen={}, model={:?}, scaler={:?}",
        config.server.socket_addr(),
        config.artifacts.model_path,
        config.artifacts.scaler_path
    );

    let app = Application::build(config)?;

    app.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received. Exiting...");
    })
    .await
}
