//! wsframe gateway
//!
//! - Raw TCP listener, HTTP upgrade answered with the computed accept key
//! - Frames sliced from the stream and decoded one at a time
//! - Tracing span per connection; filter via RUST_LOG

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use wsframe_core::error::{Result, WsFrameError};
use wsframe_gateway::{app_state::AppState, config, handler::LogHandler, transport};

const DEFAULT_CONFIG_PATH: &str = "wsframe.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "wsframe-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("WSFRAME_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.gateway.listen.parse().map_err(|e| {
        WsFrameError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
    })?;

    let listener = TcpListener::bind(listen)
        .await
        .map_err(|e| WsFrameError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "wsframe-gateway starting");

    let app = AppState::new(cfg, Arc::new(LogHandler));
    transport::serve(listener, app).await
}
