//! Hawar API server binary.
//!
//! Serves the echo chat endpoint and the health check.

use clap::Parser;
use tracing::info;

use hawar_api::config::{ApiConfig, DEFAULT_MAX_UPLOAD_BYTES};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "hawar_api_server", about = "Hawar API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3100")]
    bind_addr: String,

    /// Maximum accepted multipart body size in bytes.
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hawar_api=debug,hawar_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        max_upload_bytes: args.max_upload_bytes,
    };

    info!(
        bind_addr = %config.bind_addr,
        max_upload_bytes = config.max_upload_bytes,
        "starting hawar_api_server"
    );

    let state = hawar_api::AppState {
        config: config.clone(),
    };
    let app = hawar_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
