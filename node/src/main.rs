// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Starledger Registry Node
//!
//! Entry point for the `starledger-node` binary. Parses CLI arguments,
//! initializes logging and metrics, and serves the star registry REST API.
//!
//! The binary supports four subcommands:
//!
//! - `run`     start the registry node
//! - `keygen`  generate a wallet keypair
//! - `sign`    sign a challenge message with a wallet key
//! - `version` print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use starledger_protocol::crypto::{sign_message, Ed25519Verifier, WalletKeypair};
use starledger_protocol::{RegistryConfig, StarRegistry, SystemClock};

use cli::{Commands, StarledgerCli};
use logging::LogFormat;
use metrics::RegistryMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = StarledgerCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Keygen => {
            keygen();
            Ok(())
        }
        Commands::Sign(args) => sign(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the registry: API server and metrics endpoint.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(
        "starledger_node=info,starledger_protocol=info,tower_http=debug",
        LogFormat::from_str_lossy(&args.log_format),
    );

    tracing::info!(
        api_port = args.api_port,
        metrics_port = args.metrics_port,
        window_secs = args.verification_window_secs,
        "starting starledger-node"
    );

    // --- Registry ---
    let config = RegistryConfig::default().with_window_secs(args.verification_window_secs);
    let registry = Arc::new(StarRegistry::new(
        config,
        Arc::new(SystemClock),
        Arc::new(Ed25519Verifier),
    ));

    // --- Metrics ---
    let registry_metrics =
        Arc::new(RegistryMetrics::new().context("failed to register prometheus metrics")?);

    // --- Application state ---
    let app_state = api::AppState {
        version: format!(
            "{} (protocol {})",
            env!("CARGO_PKG_VERSION"),
            starledger_protocol::config::PROTOCOL_VERSION,
        ),
        registry: Arc::clone(&registry),
        metrics: Arc::clone(&registry_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("{}:{}", args.bind, args.api_port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", api_addr))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = metrics::create_metrics_router(metrics::MetricsState {
        metrics: registry_metrics,
        registry,
    });
    let metrics_addr = format!("{}:{}", args.bind, args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("starledger-node stopped");
    Ok(())
}

/// Generates a wallet keypair and prints the address and secret key.
fn keygen() {
    let keypair = WalletKeypair::generate();
    println!("address    : {}", keypair.address());
    println!("secret key : {}", keypair.secret_key_hex());
}

/// Signs `args.message` and prints the hex signature.
fn sign(args: cli::SignArgs) -> Result<()> {
    let keypair =
        WalletKeypair::from_hex(&args.secret_key).context("failed to parse secret key")?;
    println!("{}", sign_message(&keypair, &args.message));
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("starledger-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol        {}", starledger_protocol::config::PROTOCOL_VERSION);
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported. If a handler cannot be
/// installed, that signal source is ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
