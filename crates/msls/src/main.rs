use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use msls::{Config, Flavor, MockSlsServer};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// msls - Mock SLS identity provider for local development
#[derive(Parser, Debug)]
#[command(name = "msls")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8080", env = "PORT")]
    port: u16,

    /// Identity provider protocol to simulate
    #[arg(long, value_enum, default_value_t = Flavor::Sls, env = "MSLS_FLAVOR")]
    flavor: Flavor,

    /// Comma-separated sample subject ids shown on the login page
    #[arg(long, default_value = "", env = "MSLS_SAMPLE_SUBS")]
    sample_subs: String,

    /// Comma-separated sample HICNs, one per sample subject
    #[arg(long, default_value = "", env = "MSLS_SAMPLE_HICNS")]
    sample_hicns: String,

    /// Comma-separated sample MBIs, one per sample subject
    #[arg(long, default_value = "", env = "MSLS_SAMPLE_MBIS")]
    sample_mbis: String,

    /// CSV file of sample users (username, hicn, mbi, name, first_name, last_name, email)
    #[arg(long, env = "MSLS_SAMPLE_USERS_CSV")]
    sample_users_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msls=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::new(cli.flavor).with_sample_lists(
        &cli.sample_subs,
        &cli.sample_hicns,
        &cli.sample_mbis,
    );
    if let Some(path) = &cli.sample_users_csv {
        config = config.with_sample_users_csv(path);
    }

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    MockSlsServer::new(config)
        .serve(listener, shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
