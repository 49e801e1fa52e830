//! # Bus Telemetry
//!
//! Installs the global `tracing` subscriber for binaries that host a bus.
//! The bus crate itself only emits events; this crate decides where they go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bus_telemetry::{init_tracing, TelemetryConfig};
//!
//! init_tracing(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BUS_SERVICE_NAME` | `priority-bus` | Service name in logs |
//! | `BUS_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `BUS_JSON_LOGS` | `false` | JSON formatted output |
//! | `BUS_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Invalid log filter {filter:?}: {reason}")]
    Filter { filter: String, reason: String },
}
