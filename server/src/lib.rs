//! Ravenhill Coffee House - order and inventory backend
//!
//! # Architecture
//!
//! - **cart** (`cart`): per-session in-memory carts with stock reservation
//! - **checkout** (`checkout`): money math and atomic order placement
//! - **database** (`db`): embedded SurrealDB storage and repositories
//! - **HTTP API** (`api`): RESTful endpoints
//!
//! # Module layout
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── cart/          # sessions, cart operations
//! ├── checkout/      # totals, order placement
//! ├── db/            # models, repositories, schema
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env, prepare the work directory and initialize logging
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = config.logs_dir();
    let level = if config.is_production() { "info" } else { "debug" };
    init_logger_with_file(Some(level), log_dir.to_str());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____                        __    _ ____
   / __ \____ __   ____  ____  / /_  (_) / /
  / /_/ / __ `/ | / / _ \/ __ \/ __ \/ / / /
 / _, _/ /_/ /| |/ /  __/ / / / / / / / / /
/_/ |_|\__,_/ |___/\___/_/ /_/_/ /_/_/_/_/
        Coffee House
    "#
    );
}
