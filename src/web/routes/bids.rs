//! Bids Dashboard
//!
//! Bid totals and position-range breakdown from the bidding engine.

use axum::extract::{Query, State};
use axum::response::Html;
use serde_json::json;
use std::sync::Arc;

use crate::backend::rows::{BidsSummary, PositionAnalysis};
use crate::web::dto::PageFilter;
use crate::web::html;
use crate::web::load::load;
use crate::web::state::AppState;

pub async fn page(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PageFilter>,
) -> Html<String> {
    let backend = &state.backend;
    let company = filter.company();

    let params = company.map(|c| json!({ "p_company": c }));

    let (summary, positions) = tokio::join!(
        load(
            "bids_summary",
            backend.rpc_prefer_v1::<Vec<BidsSummary>>("get_avito_bids_summary", params.as_ref())
        ),
        load(
            "positions",
            backend.rpc_prefer_v1::<Vec<PositionAnalysis>>(
                "get_avito_positions_analysis",
                params.as_ref()
            )
        ),
    );

    let banner = html::error_banner(&[summary.error.as_deref(), positions.error.as_deref()]);

    let s = summary.first();
    let cards = format!(
        r#"<div class="cards">{}{}{}{}</div>"#,
        html::stat_card(&html::fmt_count(s.and_then(|s| s.total_bids)), "Bids", "Tracked"),
        html::stat_card(
            &html::fmt_money(s.and_then(|s| s.avg_current_bid)),
            "Avg current bid",
            "Across active ads"
        ),
        html::stat_card(
            &html::fmt_money(s.and_then(|s| s.avg_recommended_bid)),
            "Avg recommended bid",
            "Backend suggestion"
        ),
        html::stat_card(
            &html::fmt_pct(s.and_then(|s| s.success_rate)),
            "Success rate",
            "Bids winning their slot"
        ),
    );

    let position_rows: String = positions
        .rows
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_text(p.position_range.as_deref()),
                html::fmt_count(p.count_bids),
                html::fmt_money(p.avg_current_bid),
                html::fmt_money(p.avg_recommended_bid),
                html::rate_badge(p.success_rate, 60.0, 30.0),
            )
        })
        .collect();

    let body = format!(
        r#"{filter_form}
{banner}
<section><h2>Bid totals</h2>{cards}</section>
<section><h2>By search position</h2>{positions_table}</section>
{footer}"#,
        filter_form = html::company_filter_form("/bids", company, true, ""),
        banner = banner,
        cards = cards,
        positions_table = html::table(
            &["Position range", "Bids#", "Avg bid#", "Avg recommended#", "Success#"],
            &position_rows
        ),
        footer = html::refreshed_footer(s.and_then(|s| s.last_updated.as_deref())),
    );

    Html(html::page_shell(
        "Bids",
        "Bidding engine totals and position analysis",
        &body,
    ))
}
