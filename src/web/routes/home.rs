//! Overview Page
//!
//! Configuration at a glance plus the page directory. No backend calls;
//! this page must render even when nothing else can.

use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use crate::web::html;
use crate::web::state::AppState;

fn check_mark(present: bool) -> &'static str {
    if present {
        r#"<span class="badge good">configured</span>"#
    } else {
        r#"<span class="badge bad">missing</span>"#
    }
}

pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    let backend = &state.config.backend;
    let has_url = !backend.base_url.trim().is_empty();
    let has_key = !backend.api_key.trim().is_empty();

    let config_rows = format!(
        r#"<tr><td>Backend base URL</td><td>{}</td></tr>
<tr><td>Backend API key</td><td>{}</td></tr>"#,
        check_mark(has_url),
        check_mark(has_key),
    );

    let config_note = if has_url && has_key {
        String::new()
    } else {
        r#"<div class="banner-error"><strong>Backend is not configured.</strong>
<div>Pages will render but every dataset will fail until ADPULSE_BACKEND_URL and ADPULSE_BACKEND_API_KEY are set.</div></div>"#
            .to_string()
    };

    let directory_rows: String = html::NAV
        .iter()
        .filter(|(path, _)| *path != "/")
        .map(|(path, label)| {
            format!(
                r#"<tr><td><a href="{path}">{label}</a></td><td class="muted">{path}</td></tr>"#
            )
        })
        .collect();

    let body = format!(
        r#"{config_note}
<section><h2>Configuration</h2>{config_table}</section>
<section><h2>Pages</h2>{directory_table}</section>
<p class="muted">Uptime: {uptime}s · v{version}</p>"#,
        config_note = config_note,
        config_table = html::table(&["Setting", "Status"], &config_rows),
        directory_table = html::table(&["Page", "Path"], &directory_rows),
        uptime = state.uptime_seconds(),
        version = env!("CARGO_PKG_VERSION"),
    );

    Html(html::page_shell(
        "Overview",
        "CRM advertising analytics",
        &body,
    ))
}
