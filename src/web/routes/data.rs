//! JSON Data Endpoint
//!
//! `GET /api/data?type=assets|pulse` proxies the matching procedure and
//! returns its rows verbatim, for scripts and spreadsheet pulls that want
//! the raw data behind the pages.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::web::dto::DataQuery;
use crate::web::error::{WebError, WebResult};
use crate::web::state::AppState;

pub async fn data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataQuery>,
) -> WebResult<Json<Value>> {
    let kind = query
        .kind
        .ok_or_else(|| WebError::Validation("Missing data type parameter".to_string()))?;

    let procedure = match kind.as_str() {
        "assets" => "get_ready_assets",
        "pulse" => "get_ads_pulse",
        other => {
            return Err(WebError::Validation(format!("Invalid data type: {other}")));
        }
    };

    let rows: Value = state.backend.rpc(procedure, None).await?;
    Ok(Json(rows))
}
