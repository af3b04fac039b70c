use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use crate::application::ml::{InferencePipeline, SmartCoreRegressor, StandardScaler};
use crate::config::Config;
use crate::interfaces::{AppState, create_router};

pub struct Application {
    pub config: Config,
    router: Router,
}

impl Application {
    /// Load the scaler and model once and wire them into the HTTP router.
    pub fn build(config: Config) -> Result<Self> {
        info!("Building housing predictor application...");

        // 1. Load persisted artifacts (read-only for the process lifetime)
        let scaler = StandardScaler::load(&config.artifacts.scaler_path)
            .context("Failed to load scaler artifact")?;
        let model = SmartCoreRegressor::load(&config.artifacts.model_path)
            .context("Failed to load model artifact")?;

        // 2. Assemble the pipeline
        let pipeline = InferencePipeline::new(Box::new(scaler), Box::new(model));
        info!(
            "Inference pipeline ready: {} -> {}",
            pipeline.scaler_name(),
            pipeline.model_name()
        );

        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Wire an already assembled pipeline (e.g. mock artifacts) into the router.
    pub fn with_pipeline(config: Config, pipeline: InferencePipeline) -> Self {
        let router = create_router(AppState::new(pipeline));
        Self { config, router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.server.socket_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;

        info!("Server stopped.");
        Ok(())
    }
}
