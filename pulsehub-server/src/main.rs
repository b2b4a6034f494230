// Pulsehub Server - HTTP API for the telemetry store
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Pulsehub Server
//!
//! HTTP API over the bounded telemetry store, with simulated multi-sensor
//! ingestion.
//!
//! ## Usage
//!
//! ```bash
//! # Start with ingestion running
//! pulsehub-server --autostart
//!
//! # Deterministic simulation on a custom port
//! pulsehub-server --port 8080 --seed 42 --autostart
//! ```

mod api;
mod error;

use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use pulsehub::TelemetryStore;
use pulsehub_simulator::{IngestionController, SensorProfile, SharedStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Pulsehub telemetry server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "4800")]
    port: u16,

    /// Seed for deterministic simulated ingestion
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start simulated ingestion immediately
    #[arg(short, long, default_value = "false")]
    autostart: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Application state shared across handlers.
pub struct AppState {
    /// Telemetry store shared with the producer tasks.
    pub store: SharedStore,
    /// Producer set lifecycle.
    pub controller: RwLock<IngestionController>,
    pub start_time: Instant,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Pulsehub Server v{}", env!("CARGO_PKG_VERSION"));

    // Store and controller are constructed here and passed down explicitly.
    let store: SharedStore = Arc::new(RwLock::new(TelemetryStore::new()));
    let mut controller = IngestionController::new(Arc::clone(&store), SensorProfile::defaults());
    if let Some(seed) = args.seed {
        info!(seed, "running deterministic simulation");
        controller = controller.with_seed(seed);
    }

    if args.autostart {
        controller.start();
    } else {
        info!("ingestion stopped; POST /api/generator {{\"action\": \"start\"}} to begin");
    }

    let state = Arc::new(AppState {
        store,
        controller: RwLock::new(controller),
        start_time: Instant::now(),
    });

    // Build router
    let app = Router::new()
        .route("/", get(api::index_handler))
        .route("/api/sensors/ingest", post(api::ingest_handler))
        .route("/api/sensors/readings", get(api::readings_handler))
        .route("/api/sensors/stats", get(api::stats_handler))
        .route(
            "/api/generator",
            post(api::control_handler).get(api::generator_status_handler),
        )
        .route("/health", get(api::health_handler))
        .route("/status", get(api::status_handler))
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting server on http://{}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
