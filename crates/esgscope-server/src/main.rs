//! esgscope
//!
//! ESG risk scoring service for company reports.

use anyhow::Result;
use clap::Parser;
use esgscope_scoring::Analyzer;
use esgscope_server::{analyze_file, create_router, AppState, Cli, Commands, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = ServerConfig::load(&cli.config, &cli)?;

    match &cli.command {
        Commands::Serve { .. } => serve(config).await,
        Commands::Analyze { path, summary } => {
            let analyzer = Analyzer::with_max_text_chars(config.max_text_chars)?;
            let result = analyze_file(path, &analyzer)?;
            if *summary {
                print!("{}", result.summary);
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    info!("Starting esgscope");
    info!("Max upload: {} bytes", config.max_upload_bytes);
    match &config.export.dir {
        Some(dir) => info!("Exporting reports to {}", dir.display()),
        None => info!("Report export disabled"),
    }

    let metrics_handle = init_metrics()?;

    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let state = AppState::new(config, Some(metrics_handle))?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("esgscope=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("esgscope=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Install the Prometheus recorder and describe the analysis metrics
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "esgscope_analyses_total",
        "Total number of documents submitted for analysis"
    );
    metrics::describe_counter!(
        "esgscope_analysis_failures_total",
        "Total number of failed analyses by reason"
    );
    metrics::describe_histogram!(
        "esgscope_analysis_latency_us",
        metrics::Unit::Microseconds,
        "End-to-end analysis latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
