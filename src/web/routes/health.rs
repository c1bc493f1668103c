//! Health Routes
//!
//! - GET /health - full health page: configuration plus backend probes
//! - GET /health/live - liveness probe (process is alive)
//! - GET /health/ready - readiness probe (configuration is usable)

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use std::sync::Arc;

use crate::backend::{run_standard_probes, ProbeResult};
use crate::web::html;
use crate::web::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 when the backend configuration is present. A missing base URL
/// or API key means no page can show data, so the instance should not
/// receive traffic.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.config.validate() {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health page: configuration checks and one probe per core procedure.
pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    let config_ok = state.config.validate().is_ok();

    // Probes are pointless without configuration; report them as skipped
    let probes: Vec<ProbeResult> = if config_ok {
        run_standard_probes(&state.backend).await
    } else {
        Vec::new()
    };

    let all_ok = config_ok && probes.iter().all(|p| p.pass);
    let overall = if all_ok {
        r#"<span class="badge good">OK</span>"#
    } else {
        r#"<span class="badge bad">ISSUES</span>"#
    };

    let config_rows = format!(
        r#"<tr><td>Backend configuration</td><td>{}</td></tr>"#,
        if config_ok {
            r#"<span class="badge good">pass</span>"#.to_string()
        } else {
            let reason = state
                .config
                .validate()
                .err()
                .map(|e| e.to_string())
                .unwrap_or_default();
            format!(r#"<span class="badge bad">fail</span> {}"#, html::escape(&reason))
        },
    );

    let probe_rows: String = probes
        .iter()
        .map(|p| {
            let status = if p.pass {
                r#"<span class="badge good">pass</span>"#.to_string()
            } else {
                format!(
                    r#"<span class="badge bad">fail</span> {}"#,
                    html::escape(p.error.as_deref().unwrap_or("unknown error"))
                )
            };
            format!(
                r#"<tr><td>{}</td><td>{}</td></tr>"#,
                html::escape(&p.name),
                status
            )
        })
        .collect();

    let probe_section = if config_ok {
        format!(
            "<section><h2>Backend probes</h2>{}</section>",
            html::table(&["Check", "Result"], &probe_rows)
        )
    } else {
        r#"<section><h2>Backend probes</h2><p class="muted">Skipped: configuration incomplete.</p></section>"#
            .to_string()
    };

    let body = format!(
        r#"<p>Overall: {overall}</p>
<section><h2>Configuration</h2>{config_table}</section>
{probe_section}
<p class="muted">Uptime: {uptime}s · v{version}</p>"#,
        overall = overall,
        config_table = html::table(&["Check", "Result"], &config_rows),
        probe_section = probe_section,
        uptime = state.uptime_seconds(),
        version = env!("CARGO_PKG_VERSION"),
    );

    Html(html::page_shell(
        "Health",
        "Configuration and backend connectivity",
        &body,
    ))
}
