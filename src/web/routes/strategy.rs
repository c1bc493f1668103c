//! Strategy Dashboard
//!
//! Legacy analytics procedures: overall summary, city performance and
//! strategy monitoring. These procedures predate the `_v1` migration and are
//! called by their exact names.

use axum::extract::State;
use axum::response::Html;
use serde_json::json;
use std::sync::Arc;

use crate::backend::rows::{AnalyticsSummary, CityPerformance, StrategyMonitoring};
use crate::web::html;
use crate::web::load::load;
use crate::web::state::AppState;

pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    let backend = &state.backend;

    let cities_params = json!({ "p_limit": 20 });
    let strategies_params = json!({ "p_limit": 50 });

    let (summary, cities, strategies) = tokio::join!(
        load(
            "analytics_summary",
            backend.rpc::<Vec<AnalyticsSummary>>("get_analytics_summary", None)
        ),
        load(
            "city_performance",
            backend.rpc::<Vec<CityPerformance>>("get_city_performance", Some(&cities_params))
        ),
        load(
            "strategy_monitoring",
            backend.rpc::<Vec<StrategyMonitoring>>(
                "get_strategy_monitoring",
                Some(&strategies_params)
            )
        ),
    );

    let banner = html::error_banner(&[
        summary.error.as_deref(),
        cities.error.as_deref(),
        strategies.error.as_deref(),
    ]);

    let s = summary.first();
    let cards = format!(
        r#"<div class="cards">{}{}{}{}</div>"#,
        html::stat_card(&html::fmt_count(s.and_then(|s| s.total_ads)), "Ads", "Total"),
        html::stat_card(&html::fmt_count(s.and_then(|s| s.total_cities)), "Cities", "Covered"),
        html::stat_card(
            &html::fmt_count(s.and_then(|s| s.total_contacts)),
            "Contacts",
            "All time"
        ),
        html::stat_card(
            &html::fmt_pct(s.and_then(|s| s.avg_conversion)),
            "Conversion",
            "Average"
        ),
    );

    let city_rows: String = cities
        .rows
        .iter()
        .map(|c| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_text(c.city.as_deref()),
                html::fmt_count(c.impressions),
                html::fmt_count(c.views),
                html::fmt_count(c.contacts),
                html::rate_badge(c.view_to_contact, 5.0, 2.0),
            )
        })
        .collect();

    let strategy_rows: String = strategies
        .rows
        .iter()
        .map(|s| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_text(s.strategy_type.as_deref()),
                html::fmt_count(s.ads_count),
                html::fmt_money(s.avg_cost_per_contact),
                html::fmt_pct(s.avg_conversion),
            )
        })
        .collect();

    let body = format!(
        r#"{banner}
<section><h2>Summary</h2>{cards}</section>
<section><h2>City performance</h2>{cities_table}</section>
<section><h2>Strategy monitoring</h2>{strategies_table}</section>
{footer}"#,
        banner = banner,
        cards = cards,
        cities_table = html::table(
            &["City", "Impressions#", "Views#", "Contacts#", "View to contact#"],
            &city_rows
        ),
        strategies_table = html::table(
            &["Strategy", "Ads#", "Avg cost per contact#", "Conversion#"],
            &strategy_rows
        ),
        footer = html::refreshed_footer(s.and_then(|s| s.refreshed_at.as_deref())),
    );

    Html(html::page_shell(
        "Strategy",
        "Legacy analytics: cities and bidding strategies",
        &body,
    ))
}
