//! Lingo server - HTTP transport and session store for the Lingo engine
//!
//! # Architecture
//!
//! - **Store**: in-memory sessions, one lock per session, idle reaping
//! - **Service**: runs engine operations under the session lock
//! - **API**: axum routes with JSON error bodies
//! - **Config**: TOML file plus environment overrides
//!
//! # Example
//!
//! ```no_run
//! use lingo_server::{ServerConfig, run};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load(None)?.with_port(8080u16);
//! run(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod config;
mod error;
mod server;
mod service;
mod store;

// Crate-level exports - Routing
pub use api::{
    CheckRequest, CheckResponse, GuessRequest, SessionRequest, WordQuery, WordResponse, router,
};

// Crate-level exports - Configuration
pub use config::ServerConfig;

// Crate-level exports - Errors
pub use error::{ApiError, ConfigError, ServerError, StoreError};

// Crate-level exports - Server lifecycle
pub use server::run;

// Crate-level exports - Game service and store
pub use service::{GameService, SharedWords};
pub use store::SessionStore;
