//! Setup and initialization functions for CLI
//!
//! Logging and async runtime construction.

use anyhow::{Context, Result};
use env_logger::Env;

/// Default log filter for a `-v` count. `RUST_LOG` always wins.
pub fn log_filter_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize `env_logger` once at startup
pub fn init_logging(verbosity: u8) {
    let env = Env::default().default_filter_or(log_filter_for(verbosity));
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        // Already initialized - this is fine, just ignore
        eprintln!("Note: logger already configured: {}", e);
    }
}

/// Multi-threaded runtime for commands that call the model gateway
pub fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}
