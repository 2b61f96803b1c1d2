//! Sheetbridge server
//!
//! Run with: sheetbridge-server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetbridge::config::Config;
use sheetbridge::server::{router, AppState};
use sheetbridge::sheets::GoogleSheetsClient;

#[derive(Parser, Debug)]
#[command(name = "sheetbridge-server")]
#[command(about = "MCP bridge exposing a Google Sheets export tool")]
struct Args {
    /// JSON-encoded service account key
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT", hide_env_values = true)]
    service_account: Option<String>,

    /// Target spreadsheet identifier
    #[arg(long, env = "SHEET_ID")]
    spreadsheet_id: Option<String>,

    /// Target sheet/tab name
    #[arg(long, env = "SHEET_NAME", default_value = "Sheet1")]
    sheet_name: String,

    /// Keep-alive ping interval in seconds
    #[arg(long, env = "SHEETBRIDGE_PING_INTERVAL", default_value = "10")]
    ping_interval_secs: u64,

    /// Listening port
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Missing credentials are reported per-invocation, not at startup, so
    // the stream and discovery endpoints stay usable. Warn early anyway.
    if args.service_account.is_none() {
        tracing::warn!("no service account credential configured; tool invocations will fail");
    }
    if args.spreadsheet_id.is_none() {
        tracing::warn!("no target spreadsheet configured; tool invocations will fail");
    }

    let config = Config {
        service_account: args.service_account,
        spreadsheet_id: args.spreadsheet_id,
        sheet_name: args.sheet_name,
        ping_interval: Duration::from_secs(args.ping_interval_secs),
        port: args.port,
    };

    let port = config.port;
    let state = AppState::new(config, Arc::new(GoogleSheetsClient::new()));
    let app = router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("sheetbridge server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
