//! Assets Catalog
//!
//! Ready-to-use datasets the backend exposes for self-service analytics.

use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use crate::backend::rows::AssetRow;
use crate::web::html;
use crate::web::load::load;
use crate::web::state::AppState;

pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    let assets = load(
        "assets",
        state
            .backend
            .rpc_prefer_v1::<Vec<AssetRow>>("get_assets_data", None),
    )
    .await;

    let banner = html::error_banner(&[assets.error.as_deref()]);

    let asset_rows: String = assets
        .rows
        .iter()
        .map(|a| {
            let tags = a
                .tags
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|t| format!(r#"<span class="badge good">{}</span> "#, html::escape(t)))
                .collect::<String>();
            format!(
                r#"<tr><td>{}</td><td class="muted">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                html::fmt_text(a.name.as_deref()),
                html::fmt_text(a.fq_name.as_deref()),
                html::fmt_text(a.description.as_deref()),
                tags,
                html::fmt_date(a.last_refreshed.as_deref()),
            )
        })
        .collect();

    let body = format!(
        r#"{banner}
<section><h2>Ready datasets</h2>{assets_table}</section>"#,
        banner = banner,
        assets_table = html::table(
            &["Name", "Qualified name", "Description", "Tags", "Last refreshed"],
            &asset_rows
        ),
    );

    Html(html::page_shell(
        "Assets",
        "Datasets maintained by the backend",
        &body,
    ))
}
