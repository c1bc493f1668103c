//! Backend REST Client
//!
//! HTTP client for the analytics backend's RPC and view surfaces.
//!
//! Remote procedures exist under two names while the backend migration is in
//! progress: a `_v1`-suffixed revision and the legacy unsuffixed name.
//! [`BackendClient::rpc_prefer_v1`] calls the versioned name first and falls
//! back to the legacy name exactly once on the documented trigger conditions
//! (404, 405, or the ambiguous-candidate error). The triggers are
//! backend-contract-specific; do not widen them.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::BackendConfig;

/// Error code emitted when multiple overloaded procedures match a call.
const AMBIGUOUS_CODE: &str = "PGRST203";

/// Human-readable form of the same condition, seen in older backend versions.
const AMBIGUOUS_MESSAGE: &str = "Could not choose the best candidate function";

/// Analytics backend client
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a new backend client with the given configuration
    pub fn new(config: BackendConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn rpc_url(&self, procedure: &str) -> String {
        format!(
            "{}/rest/v1/rpc/{}",
            self.config.base_url.trim_end_matches('/'),
            procedure
        )
    }

    fn view_url(&self, view: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            view
        )
    }

    /// Call a remote procedure by exact name.
    ///
    /// POSTs the parameter object (or `{}`) as the JSON body and returns the
    /// response rows unmodified. Non-2xx responses become
    /// [`BackendError::Api`] carrying the status and response text.
    pub async fn rpc<T: DeserializeOwned>(
        &self,
        procedure: &str,
        params: Option<&Value>,
    ) -> Result<T, BackendError> {
        let url = self.rpc_url(procedure);
        let empty = Value::Object(serde_json::Map::new());
        let body = params.unwrap_or(&empty);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "count=none")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            response.json().await.map_err(BackendError::Request)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(BackendError::Api { status, message })
        }
    }

    /// Call a remote procedure, preferring the `_v1` revision.
    ///
    /// Falls back to the legacy unsuffixed name exactly once when the
    /// versioned call fails with 404, 405, or the ambiguous-candidate
    /// condition. The legacy call's result or error is returned unmodified.
    /// Any other failure propagates without touching the legacy name.
    pub async fn rpc_prefer_v1<T: DeserializeOwned>(
        &self,
        procedure: &str,
        params: Option<&Value>,
    ) -> Result<T, BackendError> {
        let versioned = format!("{procedure}_v1");

        match self.rpc(&versioned, params).await {
            Ok(rows) => Ok(rows),
            Err(e) if e.triggers_fallback() => {
                tracing::debug!(
                    procedure = procedure,
                    error = %e,
                    "versioned procedure unavailable, retrying legacy name"
                );
                self.rpc(procedure, params).await
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch all rows of a read-only view.
    ///
    /// Issues `GET {base}/rest/v1/{view}?select=*` plus any extra query pairs
    /// (e.g. `order`, `limit`). Views have a single name; no fallback applies.
    pub async fn fetch_view<T: DeserializeOwned>(
        &self,
        view: &str,
        query: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        let url = self.view_url(view);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .query(&[("select", "*")])
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            response.json().await.map_err(BackendError::Request)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(BackendError::Api { status, message })
        }
    }

    /// Probe a procedure, discarding the rows.
    ///
    /// Used by the health page and `adpulse-check`.
    pub async fn probe_rpc(
        &self,
        procedure: &str,
        params: Option<&Value>,
    ) -> Result<(), BackendError> {
        self.rpc::<Value>(procedure, params).await.map(|_| ())
    }

    /// Probe a view, discarding the rows.
    pub async fn probe_view(&self, view: &str) -> Result<(), BackendError> {
        self.fetch_view::<Value>(view, &[("limit", "1")])
            .await
            .map(|_| ())
    }
}

fn map_transport_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else if e.is_connect() {
        BackendError::Unavailable
    } else {
        BackendError::Request(e)
    }
}

/// Detect the ambiguous-candidate-function condition in a response body.
///
/// Matches on the error code or its message text. If the backend's error
/// format changes, this stops matching and the fallback silently stops
/// triggering; keep the explicit tests below in sync with the backend.
fn is_ambiguous_candidate(message: &str) -> bool {
    message.contains(AMBIGUOUS_CODE) || message.contains(AMBIGUOUS_MESSAGE)
}

/// Errors that can occur when talking to the analytics backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,
}

impl BackendError {
    /// Whether this failure of a `_v1` call warrants the single legacy retry.
    ///
    /// True for 404 (procedure not found), 405 (method not allowed), and the
    /// ambiguous-candidate error regardless of status. Network failures and
    /// all other statuses are terminal.
    pub fn triggers_fallback(&self) -> bool {
        match self {
            BackendError::Api {
                status: 404 | 405, ..
            } => true,
            BackendError::Api { message, .. } => is_ambiguous_candidate(message),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query, State};
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::Router;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Records every RPC call the stub backend receives: (procedure, body).
    #[derive(Clone, Default)]
    struct StubState {
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl StubState {
        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn json_response(status: StatusCode, body: &str) -> axum::response::Response {
        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }

    async fn rpc_stub(
        State(state): State<StubState>,
        Path(procedure): Path<String>,
        body: String,
    ) -> axum::response::Response {
        state
            .calls
            .lock()
            .unwrap()
            .push((procedure.clone(), body));

        match procedure.as_str() {
            // Versioned revision present and healthy
            "get_avito_bids_summary_v1" => {
                json_response(StatusCode::OK, r#"[{"total_bids":7}]"#)
            }
            // Migration not applied: only the legacy name exists
            "get_avito_sales_summary_v1" => {
                json_response(StatusCode::NOT_FOUND, r#"{"message":"function not found"}"#)
            }
            "get_avito_sales_summary" => json_response(StatusCode::OK, r#"[{"total_ads":56}]"#),
            // Method rejected on the versioned name
            "get_assets_data_v1" => {
                json_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
            }
            "get_assets_data" => json_response(StatusCode::OK, r#"[{"name":"sales_daily"}]"#),
            // Overload ambiguity reported with a non-404 status
            "get_city_performance_v1" => json_response(
                StatusCode::MULTIPLE_CHOICES,
                r#"{"code":"PGRST203","message":"Could not choose the best candidate function"}"#,
            ),
            "get_city_performance" => json_response(StatusCode::OK, r#"[{"city":"Kazan"}]"#),
            // Terminal failures on the versioned name
            "bad_request_v1" => json_response(StatusCode::BAD_REQUEST, "malformed parameters"),
            "server_error_v1" => json_response(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            // Both names broken: the legacy error must surface unmodified
            "both_broken_v1" => json_response(StatusCode::NOT_FOUND, "no such function"),
            "both_broken" => json_response(StatusCode::INTERNAL_SERVER_ERROR, "legacy exploded"),
            _ => json_response(StatusCode::NOT_FOUND, "unknown procedure"),
        }
    }

    async fn view_stub(
        Path(view): Path<String>,
        Query(query): Query<HashMap<String, String>>,
    ) -> axum::response::Response {
        assert_eq!(query.get("select").map(String::as_str), Some("*"));
        match view.as_str() {
            "v_ads_pulse" => {
                assert_eq!(query.get("order").map(String::as_str), Some("report_date.desc"));
                json_response(StatusCode::OK, r#"[{"report_date":"2025-06-01","clicks":3}]"#)
            }
            _ => json_response(StatusCode::NOT_FOUND, "unknown view"),
        }
    }

    async fn spawn_stub(state: StubState) -> String {
        let router = Router::new()
            .route("/rest/v1/rpc/:procedure", post(rpc_stub))
            .route("/rest/v1/:view", get(view_stub))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn test_client(base_url: String) -> BackendClient {
        BackendClient::new(BackendConfig {
            base_url,
            api_key: "test-key".to_string(),
            request_timeout_ms: 2_000,
        })
    }

    #[tokio::test]
    async fn versioned_success_never_touches_legacy() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let rows: Vec<Value> = client
            .rpc_prefer_v1("get_avito_bids_summary", None)
            .await
            .unwrap();

        assert_eq!(rows[0]["total_bids"], 7);
        let calls = state.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "get_avito_bids_summary_v1");
    }

    #[tokio::test]
    async fn not_found_falls_back_to_legacy_name() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let rows: Vec<Value> = client
            .rpc_prefer_v1("get_avito_sales_summary", None)
            .await
            .unwrap();

        assert_eq!(rows, vec![serde_json::json!({"total_ads": 56})]);
        let calls = state.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "get_avito_sales_summary_v1");
        assert_eq!(calls[1].0, "get_avito_sales_summary");
    }

    #[tokio::test]
    async fn fallback_repeats_identical_parameters() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let params = serde_json::json!({"p_company": "seltka", "p_limit": 10});
        let _rows: Vec<Value> = client
            .rpc_prefer_v1("get_avito_sales_summary", Some(&params))
            .await
            .unwrap();

        let calls = state.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, calls[1].1);
        let sent: Value = serde_json::from_str(&calls[0].1).unwrap();
        assert_eq!(sent, params);
    }

    #[tokio::test]
    async fn method_not_allowed_falls_back() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let rows: Vec<Value> = client.rpc_prefer_v1("get_assets_data", None).await.unwrap();

        assert_eq!(rows[0]["name"], "sales_daily");
        assert_eq!(state.calls().len(), 2);
    }

    #[tokio::test]
    async fn ambiguous_candidate_falls_back_regardless_of_status() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let rows: Vec<Value> = client
            .rpc_prefer_v1("get_city_performance", None)
            .await
            .unwrap();

        assert_eq!(rows[0]["city"], "Kazan");
        let calls = state.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, "get_city_performance");
    }

    #[tokio::test]
    async fn bad_request_propagates_without_fallback() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let err = client
            .rpc_prefer_v1::<Vec<Value>>("bad_request", None)
            .await
            .unwrap_err();

        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "malformed parameters");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(state.calls().len(), 1);
    }

    #[tokio::test]
    async fn server_error_propagates_without_fallback() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let err = client
            .rpc_prefer_v1::<Vec<Value>>("server_error", None)
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Api { status: 500, .. }));
        assert_eq!(state.calls().len(), 1);
    }

    #[tokio::test]
    async fn legacy_error_surfaces_unmodified() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let err = client
            .rpc_prefer_v1::<Vec<Value>>("both_broken", None)
            .await
            .unwrap_err();

        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "legacy exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Exactly one retry, never more
        assert_eq!(state.calls().len(), 2);
    }

    #[tokio::test]
    async fn connect_failure_maps_to_unavailable() {
        // Nothing listens on port 1
        let client = test_client("http://127.0.0.1:1".to_string());

        let err = client.rpc::<Vec<Value>>("anything", None).await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable));
        assert!(!err.triggers_fallback());
    }

    #[tokio::test]
    async fn view_fetch_sends_select_and_extra_pairs() {
        let state = StubState::default();
        let client = test_client(spawn_stub(state.clone()).await);

        let rows: Vec<Value> = client
            .fetch_view("v_ads_pulse", &[("order", "report_date.desc"), ("limit", "30")])
            .await
            .unwrap();

        assert_eq!(rows[0]["clicks"], 3);
    }

    #[test]
    fn ambiguity_detection_matches_code_and_message() {
        assert!(is_ambiguous_candidate(
            r#"{"code":"PGRST203","details":null}"#
        ));
        assert!(is_ambiguous_candidate(
            "Could not choose the best candidate function between foo(a) and foo(a,b)"
        ));
        assert!(!is_ambiguous_candidate("function not found"));
        // Heuristic is substring-based; a format change would stop matching
        assert!(!is_ambiguous_candidate("PGRST"));
    }

    #[test]
    fn fallback_triggers_are_exact() {
        let api = |status, message: &str| BackendError::Api {
            status,
            message: message.to_string(),
        };

        assert!(api(404, "").triggers_fallback());
        assert!(api(405, "").triggers_fallback());
        assert!(api(300, "PGRST203").triggers_fallback());
        assert!(api(400, "Could not choose the best candidate function").triggers_fallback());
        assert!(!api(400, "bad params").triggers_fallback());
        assert!(!api(500, "boom").triggers_fallback());
        assert!(!BackendError::Timeout.triggers_fallback());
        assert!(!BackendError::Unavailable.triggers_fallback());
    }
}
