//! # AdPulse
//!
//! Advertising Operations Pulse - a server-rendered analytics dashboard for
//! CRM advertising data. All aggregation happens in an external backend;
//! AdPulse fetches precomputed rows and renders them into HTML tables and
//! summary cards.
//!
//! ## Features
//!
//! - **Versioned RPC client**: prefers `_v1` procedure names, falling back
//!   to legacy names exactly once on the documented trigger conditions
//! - **Independent fetches**: each page issues its backend calls jointly;
//!   one failing dataset never blocks the rest of the page
//! - **Explicit configuration**: base URL and API key validated once at
//!   startup, from TOML file or environment
//!
//! ## Modules
//!
//! - [`backend`]: RPC/view client, row shapes and health probes
//! - [`web`]: Axum server and the dashboard pages
//! - [`config`]: configuration loading and validation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use adpulse::backend::BackendClient;
//! use adpulse::config::Config;
//! use adpulse::web::{serve, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     config.validate()?;
//!
//!     let backend = Arc::new(BackendClient::new(config.backend.clone()));
//!     let state = AppState::new(backend, config);
//!
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod web;

// Re-export top-level types for convenience
pub use backend::{BackendClient, BackendError, ProbeResult};

pub use config::{BackendConfig, Config, ConfigError, LoggingConfig, ServerConfig};

pub use web::{build_router, serve, AppState, WebError, WebResult};
