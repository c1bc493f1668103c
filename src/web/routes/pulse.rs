//! Pulse Dashboard
//!
//! Daily advertising pulse from the `v_ads_pulse` view: spend, traffic and
//! lead counts for the last 30 report dates.

use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use crate::backend::rows::PulseRow;
use crate::web::html;
use crate::web::load::load;
use crate::web::state::AppState;

const PULSE_LIMIT: &str = "30";

pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    let pulse = load(
        "ads_pulse",
        state.backend.fetch_view::<Vec<PulseRow>>(
            "v_ads_pulse",
            &[("order", "report_date.desc"), ("limit", PULSE_LIMIT)],
        ),
    )
    .await;

    let banner = html::error_banner(&[pulse.error.as_deref()]);

    let pulse_rows: String = pulse
        .rows
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_date(p.report_date.as_deref()),
                html::fmt_count(p.impressions),
                html::fmt_count(p.clicks),
                html::fmt_money(p.spend_rub),
                html::fmt_count(p.messages),
                html::fmt_count(p.leads),
                html::fmt_count(p.orders),
            )
        })
        .collect();

    let body = format!(
        r#"{banner}
<section><h2>Last 30 report dates</h2>{pulse_table}</section>"#,
        banner = banner,
        pulse_table = html::table(
            &["Date", "Impressions#", "Clicks#", "Spend#", "Messages#", "Leads#", "Orders#"],
            &pulse_rows
        ),
    );

    Html(html::page_shell(
        "Pulse",
        "Daily spend and lead flow",
        &body,
    ))
}
