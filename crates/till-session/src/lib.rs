//! # till-session: The Register Session
//!
//! Core library for driving the Till register. The view/controller glue
//! (a desktop shell, a web front end, a test harness) creates one
//! [`Session`] and calls its methods; nothing in this workspace renders
//! anything or listens for events.
//!
//! ## Module Organization
//! ```text
//! till_session/
//! ├── lib.rs          ◄─── You are here (startup helpers & exports)
//! ├── session.rs      ◄─── The Session object and its operations
//! ├── history.rs      ◄─── In-memory sale log with SQLite write-through
//! ├── receipt.rs      ◄─── Receipt snapshots and plain-text rendering
//! ├── config.rs       ◄─── Register configuration
//! └── error.rs        ◄─── RegisterError for the view layer
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Startup                                   │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Determine Database Path ──────────────────────────────────────────► │
//! │     • Linux: ~/.local/share/till/till.db                                │
//! │     • macOS: ~/Library/Application Support/com.till.register/till.db   │
//! │     • Override with TILL_DB_PATH                                        │
//! │                                                                         │
//! │  3. Connect to Database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, run pending migrations                      │
//! │                                                                         │
//! │  4. Open the Session ─────────────────────────────────────────────────► │
//! │     • Hydrate sales history, start an empty cart                        │
//! │                                                                         │
//! │  5. Hand the Session to the view glue ────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,ignore
//! use till_db::{Database, DbConfig};
//! use till_session::{RegisterConfig, Session};
//!
//! till_session::init_tracing();
//!
//! let db_path = till_session::default_database_path()?;
//! let db = Database::new(DbConfig::new(db_path)).await?;
//! let mut session = Session::open(RegisterConfig::from_env(), db).await?;
//!
//! session.add_item("Café", till_core::Money::from_cents(250), 1)?;
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod receipt;
pub mod session;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

pub use config::RegisterConfig;
pub use error::{ErrorCode, RegisterError};
pub use history::{DailyTotals, SalesHistory};
pub use receipt::{Receipt, ReceiptLine};
pub use session::{CartView, Session, SessionResult};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till=trace` - Show trace for till crates only
/// - Default: INFO level, sqlx chatter suppressed
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.till.register/till.db`
/// - **Windows**: `%APPDATA%\till\register\till.db`
/// - **Linux**: `~/.local/share/till/till.db`
///
/// ## Development Override
/// Set `TILL_DB_PATH` environment variable to use a custom path.
pub fn default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Check for override
    if let Ok(path) = std::env::var("TILL_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    // Use platform-specific app data directory
    let proj_dirs =
        ProjectDirs::from("com", "till", "register").ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("till.db"))
}
