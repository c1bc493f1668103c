//! Backend Probes
//!
//! The standard set of checks run by the health page and `adpulse-check`:
//! one cheap call per core procedure plus the executive view. Probes run
//! jointly and fail independently.

use futures_util::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};

use super::client::{BackendClient, BackendError};

/// What a single probe calls
enum ProbeTarget {
    Rpc(&'static str, Option<Value>),
    View(&'static str),
}

/// Outcome of a single probe
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub name: String,
    pub pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run the standard probe set against the backend.
///
/// All probes are issued together; one failing never hides the others.
pub async fn run_standard_probes(backend: &BackendClient) -> Vec<ProbeResult> {
    let limit_one = json!({"p_limit": 1});

    let targets = vec![
        ProbeTarget::Rpc("get_development_status", None),
        ProbeTarget::Rpc("get_recent_commits", Some(limit_one.clone())),
        ProbeTarget::Rpc("get_analytics_summary", None),
        ProbeTarget::Rpc("get_city_performance", Some(limit_one.clone())),
        ProbeTarget::Rpc("get_strategy_monitoring", Some(limit_one)),
        ProbeTarget::Rpc("get_avito_sales_summary", None),
        ProbeTarget::View("v_ceo_dashboard"),
    ];

    join_all(targets.into_iter().map(|t| run_probe(backend, t))).await
}

async fn run_probe(backend: &BackendClient, target: ProbeTarget) -> ProbeResult {
    let (name, outcome): (String, Result<(), BackendError>) = match target {
        ProbeTarget::Rpc(procedure, params) => (
            procedure.to_string(),
            backend.probe_rpc(procedure, params.as_ref()).await,
        ),
        ProbeTarget::View(view) => (format!("view:{view}"), backend.probe_view(view).await),
    };

    match outcome {
        Ok(()) => ProbeResult {
            name,
            pass: true,
            error: None,
        },
        Err(e) => ProbeResult {
            name,
            pass: false,
            error: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[tokio::test]
    async fn probes_fail_independently_when_backend_is_down() {
        let backend = BackendClient::new(BackendConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: "k".to_string(),
            request_timeout_ms: 500,
        });

        let results = run_standard_probes(&backend).await;
        assert_eq!(results.len(), 7);
        assert!(results.iter().all(|r| !r.pass));
        assert!(results.iter().all(|r| r.error.is_some()));
        assert_eq!(results.last().unwrap().name, "view:v_ceo_dashboard");
    }
}
