//! Analytics Backend Integration
//!
//! Client for the external REST backend that owns all CRM advertising data.
//! Every number shown on a dashboard is precomputed server-side; this module
//! only fetches rows and hands them to the web layer.
//!
//! Components:
//! - [`BackendClient`]: RPC and view fetches with the versioned-name fallback
//! - [`rows`]: shape hints for the rows the backend returns
//! - [`probes`]: the standard connectivity checks behind /health and
//!   `adpulse-check`

pub mod client;
pub mod probes;
pub mod rows;

pub use client::{BackendClient, BackendError};
pub use probes::{run_standard_probes, ProbeResult};
