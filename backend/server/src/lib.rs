//! Documentation of an event check-in backend.
//!
//! # General Infrastructure
//! - Scanner clients (browser, camera + QR decoder) talk JSON over HTTP to this server
//! - One server instance per event, single writer, no cross-process coordination
//! - Roster and activity name live in two JSON documents next to the binary
//! - Scan log and daily counter are process memory only and start empty on boot
//!
//!
//!
//! # Check-in Rules
//!
//! **Goal**: one accepted check-in per participant per day in production, unlimited in demo.
//!
//! - Unknown ids and invalid participants are answered normally, never as errors
//! - A day is a calendar day in the reference zone (`CHECKIN_TIME_ZONE`, Hong Kong by default)
//! - Every scan lands in the scan log, whatever the outcome
//! - The daily counter only moves on accepted check-ins and rolls over at midnight in the same zone
//!
//! See [`checkin`] for the full decision flow.
//!
//!
//!
//! # Consistency
//!
//! All roster reads and writes go through one lock around the [`checkin::Ledger`]. A roster write
//! happens before a request is acknowledged; a failed write leaves memory unchanged and answers 500.
//!
//!
//!
//! # Setup
//!
//! Run with defaults.
//! ```sh
//! cargo run -p checkin
//! ```
//!
//! Verbose logging.
//! ```sh
//! RUST_LOG=debug cargo run -p checkin --features server/verbose
//! ```
//!
//! Prepare a roster offline.
//! ```sh
//! cargo run -p process -- import roster.xlsx
//! ```
//!
//! ## Environment
//! - `CHECKIN_HOST`, `RUST_PORT`: bind address, `0.0.0.0:3001`
//! - `PARTICIPANTS_PATH`, `ACTIVITY_PATH`: document locations
//! - `CHECKIN_TIME_ZONE`: IANA zone name
//! - `DEFAULT_ACTIVITY`: activity name when none is stored
//! - `DEMO_MODE`: initial mode, `true` or `false`
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use chrono::Utc;
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod activity;
pub mod checkin;
pub mod client;
pub mod config;
pub mod counter;
pub mod error;
pub mod mode;
pub mod routes;
pub mod scan_log;
pub mod state;
pub mod utils;

use config::Config;
use counter::spawn_midnight_rollover;
use routes::*;
use state::State;

pub async fn start_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new(Config::load()?)?;

    let rollover = spawn_midnight_rollover(state.daily.clone(), state.config.time_zone, Utc::now);

    info!("Starting server...");
    let app = router(state.clone());

    let address = format!("{}:{}", state.config.host, state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    rollover.abort();
    info!("Server shutting down...");

    Ok(())
}

pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/check-in", post(check_in_handler))
        .route("/participants", get(participants_handler))
        .route("/total-people", get(total_people_handler))
        .route("/upload-participants", post(upload_participants_handler))
        .route("/import-participants", post(import_participants_handler))
        .route("/clear-participants", post(clear_participants_handler))
        .route("/clear-check-in-records", post(clear_check_ins_handler))
        .route("/export-checkins", get(export_handler))
        .route("/scan-entries", get(scan_entries_handler))
        .route("/daily-check-in-count", get(daily_count_handler))
        .route("/reset-daily-check-in-count", post(reset_daily_count_handler))
        .route("/current-activity", get(current_activity_handler))
        .route("/set-current-activity", post(set_activity_handler))
        .route("/demo-mode", get(demo_mode_handler))
        .route("/set-demo-mode", post(set_demo_mode_handler))
        .route("/test", get(health_handler));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
