// Main entry point for the extraction service

use std::sync::Arc;

use anyhow::{Context, Result};
use extraction::{
    AssistedStrategy, Describer, DisabledDescriber, DisabledRenderer, FallbackStrategy,
    OpenAiDescriber, Orchestrator, PipelineConfig, PooledRenderer, RemoteRenderer, Renderer,
    Strategy, StructuralStrategy, UrlValidator,
};
use server_core::server::{build_app, AppState};
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,extraction=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting extraction service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let pipeline_config = PipelineConfig::default()
        .with_request_deadline(std::time::Duration::from_secs(config.request_deadline_secs))
        .with_max_raw_html_bytes(config.max_raw_html_bytes);

    // Rendering backend: shared, concurrency-capped, closed on shutdown
    let renderer: Arc<dyn Renderer> =
        match (&config.render_api_url, &config.render_api_key) {
            (Some(url), Some(key)) => {
                tracing::info!(concurrency = config.render_concurrency, "render backend configured");
                Arc::new(PooledRenderer::new(
                    Arc::new(RemoteRenderer::new(url.clone(), key.as_str())?),
                    config.render_concurrency,
                ))
            }
            _ => {
                tracing::warn!("no render backend configured, assisted extraction disabled");
                Arc::new(DisabledRenderer)
            }
        };

    // Vision model
    let describer: Arc<dyn Describer> = match &config.openai_api_key {
        Some(key) => {
            let mut describer = OpenAiDescriber::new(key.as_str())?;
            if let Some(model) = &config.openai_model {
                describer = describer.with_model(model.clone());
            }
            Arc::new(describer)
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set, assisted extraction disabled");
            Arc::new(DisabledDescriber)
        }
    };

    // Strategy chain, cheapest first
    let strategies: Vec<Arc<dyn Strategy>> = vec![
        Arc::new(StructuralStrategy::new(&pipeline_config)?),
        Arc::new(AssistedStrategy::new(
            renderer.clone(),
            describer,
            &pipeline_config,
        )),
        Arc::new(FallbackStrategy::new()),
    ];

    let state = AppState {
        orchestrator: Arc::new(Orchestrator::new(strategies, &pipeline_config)),
        validator: Arc::new(UrlValidator::new()),
        renderer: renderer.clone(),
        max_raw_html_bytes: config.max_raw_html_bytes,
    };

    // Build application
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Extract endpoint: http://localhost:{}/api/extract", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Release the shared rendering resource before exit
    if let Err(e) = renderer.close().await {
        tracing::warn!(error = %e, "renderer close failed");
    }
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
