//! Sales Dashboard
//!
//! Executive sales picture: summary cards, top cities, category performance
//! and the recent daily trend. Four independent backend calls, optionally
//! filtered to one company.

use axum::extract::{Query, State};
use axum::response::Html;
use serde_json::json;
use std::sync::Arc;

use crate::backend::rows::{CategoryPerformance, CitySales, SalesSummary, SalesTrend};
use crate::web::dto::{with_company, PageFilter};
use crate::web::html;
use crate::web::load::load;
use crate::web::state::AppState;

const TREND_DAYS: u32 = 7;

pub async fn page(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PageFilter>,
) -> Html<String> {
    let backend = &state.backend;
    let company = filter.company();

    let summary_params = company.map(|c| json!({ "p_company": c }));
    let cities_params = with_company(json!({ "p_limit": 10 }), company);
    let categories_params = with_company(json!({ "p_limit": 10 }), company);
    let trends_params = with_company(json!({ "p_days": TREND_DAYS }), company);

    let (summary, cities, categories, trends) = tokio::join!(
        load(
            "sales_summary",
            backend.rpc_prefer_v1::<Vec<SalesSummary>>(
                "get_avito_sales_summary",
                summary_params.as_ref()
            )
        ),
        load(
            "top_cities",
            backend.rpc_prefer_v1::<Vec<CitySales>>(
                "get_avito_top_cities_sales",
                Some(&cities_params)
            )
        ),
        load(
            "categories",
            backend.rpc_prefer_v1::<Vec<CategoryPerformance>>(
                "get_avito_categories_performance",
                Some(&categories_params)
            )
        ),
        load(
            "sales_trends",
            backend.rpc_prefer_v1::<Vec<SalesTrend>>(
                "get_avito_sales_trends",
                Some(&trends_params)
            )
        ),
    );

    let banner = html::error_banner(&[
        summary.error.as_deref(),
        cities.error.as_deref(),
        categories.error.as_deref(),
        trends.error.as_deref(),
    ]);

    let s = summary.first();
    let cards = format!(
        r#"<div class="cards">{}{}{}{}{}</div>"#,
        html::stat_card(&html::fmt_count(s.and_then(|s| s.total_ads)), "Ads", "Total in system"),
        html::stat_card(&html::fmt_count(s.and_then(|s| s.total_views)), "Views", "Overall traffic"),
        html::stat_card(
            &html::fmt_count(s.and_then(|s| s.total_contacts)),
            "Contacts",
            "Real leads"
        ),
        html::stat_card(
            &html::fmt_pct(s.and_then(|s| s.avg_conversion)),
            "Conversion",
            "Views to contacts"
        ),
        html::stat_card(
            &html::fmt_money(s.and_then(|s| s.total_revenue)),
            "Revenue",
            "Total listed value"
        ),
    );

    let city_rows: String = cities
        .rows
        .iter()
        .map(|c| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_text(c.city.as_deref()),
                html::fmt_count(c.ads_count),
                html::fmt_count(c.total_views),
                html::fmt_count(c.total_contacts),
                html::rate_badge(c.conversion_rate, 5.0, 2.0),
            )
        })
        .collect();

    let category_rows: String = categories
        .rows
        .iter()
        .map(|c| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_text(c.category.as_deref()),
                html::fmt_count(c.ads_count),
                html::fmt_count(c.total_contacts),
                html::rate_badge(c.conversion_rate, 3.0, 1.0),
                html::fmt_num(c.avg_days_online),
            )
        })
        .collect();

    let trend_rows: String = trends
        .rows
        .iter()
        .map(|t| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_date(t.report_date.as_deref()),
                html::fmt_count(t.total_ads),
                html::fmt_count(t.total_views),
                html::fmt_count(t.total_contacts),
                html::fmt_pct(t.avg_conversion),
            )
        })
        .collect();

    let body = format!(
        r#"{filter_form}
{banner}
<section><h2>Key figures</h2>{cards}</section>
<section><h2>Top cities</h2>{cities_table}</section>
<section><h2>Category performance</h2>{categories_table}</section>
<section><h2>Trend, last {days} days</h2>{trends_table}</section>
{footer}"#,
        filter_form = html::company_filter_form("/sales", company, true, ""),
        banner = banner,
        cards = cards,
        cities_table = html::table(
            &["City", "Ads#", "Views#", "Contacts#", "Conversion#"],
            &city_rows
        ),
        categories_table = html::table(
            &["Category", "Ads#", "Contacts#", "Conversion#", "Avg days online#"],
            &category_rows
        ),
        days = TREND_DAYS,
        trends_table = html::table(
            &["Date", "Ads#", "Views#", "Contacts#", "Conversion#"],
            &trend_rows
        ),
        footer = html::refreshed_footer(s.and_then(|s| s.refreshed_at.as_deref())),
    );

    Html(html::page_shell(
        "Sales",
        "Sales overview across cities and categories",
        &body,
    ))
}
