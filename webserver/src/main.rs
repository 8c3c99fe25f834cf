//! Kainan webserver entry point

use clap::Parser;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use webserver::{web, AppState};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "HTTP and WebSocket surface for the Kainan voting engine")]
struct Args {
    /// Port for HTTP server (browser connections)
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("webserver={level},engine={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level);

    let state = AppState::with_system_clock().await;
    let app = web::router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🍽️ Kainan webserver listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("🛑 Shutdown signal received");
        })
        .await?;

    info!("✅ Webserver stopped gracefully");
    Ok(())
}
