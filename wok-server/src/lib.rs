//! Wok Server - QR-table restaurant ordering backend
//!
//! # Module structure
//!
//! ```text
//! wok-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # staff JWT auth
//! ├── services/      # chat push notification, sync broadcast
//! ├── api/           # HTTP routes and handlers
//! ├── utils/         # errors, logging, time helpers
//! ├── db/            # embedded document store + repositories
//! └── orders/        # order submission, lifecycle and staff mutations
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{LineRemoval, OrderService};
pub use services::{NotifyService, SyncBus};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    init_logger();
    Ok(())
}
