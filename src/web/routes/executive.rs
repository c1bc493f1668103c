//! Executive Dashboard
//!
//! Company-wide KPI cards from the single-row `v_ceo_dashboard` view.

use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use crate::backend::rows::ExecutiveRow;
use crate::web::html;
use crate::web::load::load;
use crate::web::state::AppState;

pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    let executive = load(
        "ceo_dashboard",
        state
            .backend
            .fetch_view::<Vec<ExecutiveRow>>("v_ceo_dashboard", &[]),
    )
    .await;

    let banner = html::error_banner(&[executive.error.as_deref()]);
    let row = executive.first();

    let cards = format!(
        r#"<div class="cards">{}{}{}{}</div>"#,
        html::stat_card(
            &html::fmt_count(row.and_then(|r| r.active_tasks_count)),
            "Active tasks",
            "Across departments"
        ),
        html::stat_card(
            &html::fmt_money(row.and_then(|r| r.weekly_financial_flow)),
            "Weekly flow",
            "Financial movement"
        ),
        html::stat_card(
            &html::fmt_count(row.and_then(|r| r.new_deals_count)),
            "New deals",
            "This week"
        ),
        html::stat_card(
            &html::fmt_count(row.and_then(|r| r.failed_queues_count)),
            "Failed queues",
            "Needs attention"
        ),
    );

    let agent = format!(
        r#"<div class="cards">{}{}</div>"#,
        html::stat_card(
            &html::fmt_text(row.and_then(|r| r.most_active_ai_agent.as_deref())),
            "Most active agent",
            "Automation"
        ),
        html::stat_card(
            &html::fmt_count(row.and_then(|r| r.ai_agent_events_count)),
            "Agent events",
            "Processed"
        ),
    );

    let body = format!(
        r#"{banner}
<section><h2>Business pulse</h2>{cards}</section>
<section><h2>Automation</h2>{agent}</section>"#,
    );

    Html(html::page_shell(
        "Executive",
        "Company KPIs at a glance",
        &body,
    ))
}
