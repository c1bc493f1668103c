//! Ads Intelligence Dashboard
//!
//! Backend-ranked ad performance, category and geo scoring, and the
//! optimization recommendation feed for one company.

use axum::extract::{Query, State};
use axum::response::Html;
use serde_json::json;
use std::sync::Arc;

use crate::backend::rows::{AdPerformance, CategoryAnalysis, GeoAnalysis, Recommendation};
use crate::web::dto::PageFilter;
use crate::web::html;
use crate::web::load::load;
use crate::web::state::AppState;

const DEFAULT_COMPANY: &str = "seltka";

pub async fn page(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PageFilter>,
) -> Html<String> {
    let backend = &state.backend;
    let company = filter.company_or(DEFAULT_COMPANY);

    let ads_params = json!({ "p_company": company, "p_limit": 25 });
    let categories_params = json!({ "p_limit": 8 });
    let geo_params = json!({ "p_company": company, "p_limit": 10 });
    let recommendations_params = json!({ "p_company": company, "p_limit": 15 });

    let (ads, categories, geo, recommendations) = tokio::join!(
        load(
            "ads_performance",
            backend.rpc_prefer_v1::<Vec<AdPerformance>>(
                "get_unified_ads_performance",
                Some(&ads_params)
            )
        ),
        load(
            "category_analysis",
            backend.rpc_prefer_v1::<Vec<CategoryAnalysis>>(
                "get_avito_positions_analysis",
                Some(&categories_params)
            )
        ),
        load(
            "geo_analysis",
            backend.rpc_prefer_v1::<Vec<GeoAnalysis>>(
                "get_geo_profitability_analysis",
                Some(&geo_params)
            )
        ),
        load(
            "recommendations",
            backend.rpc_prefer_v1::<Vec<Recommendation>>(
                "get_optimization_recommendations",
                Some(&recommendations_params)
            )
        ),
    );

    let banner = html::error_banner(&[
        ads.error.as_deref(),
        categories.error.as_deref(),
        geo.error.as_deref(),
        recommendations.error.as_deref(),
    ]);

    let ad_rows: String = ads
        .rows
        .iter()
        .map(|a| {
            format!(
                r#"<tr><td class="num">{}</td><td>{}</td><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_count(a.profitability_rank),
                html::fmt_text(a.title.as_deref()),
                html::fmt_text(a.city.as_deref()),
                html::fmt_count(a.views),
                html::fmt_count(a.contacts),
                html::rate_badge(a.conversion_rate, 5.0, 2.0),
                html::fmt_money(a.cpl),
                html::fmt_num(a.roi_score),
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
                html::fmt_money(c.avg_cpl),
                html::fmt_num(c.category_score),
            )
        })
        .collect();

    let geo_rows: String = geo
        .rows
        .iter()
        .map(|g| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td>{}</td></tr>"#,
                html::fmt_text(g.city.as_deref()),
                html::fmt_count(g.ads_count),
                html::fmt_count(g.total_contacts),
                html::fmt_money(g.avg_cpl),
                html::fmt_num(g.market_potential_score),
                html::fmt_text(g.competition_level.as_deref()),
            )
        })
        .collect();

    let recommendation_rows: String = recommendations
        .rows
        .iter()
        .map(|r| {
            let priority = match r.priority_level.as_deref() {
                Some(p) if p.eq_ignore_ascii_case("high") => {
                    format!(r#"<span class="badge bad">{}</span>"#, html::escape(p))
                }
                Some(p) if p.eq_ignore_ascii_case("medium") => {
                    format!(r#"<span class="badge warn">{}</span>"#, html::escape(p))
                }
                Some(p) => format!(r#"<span class="badge good">{}</span>"#, html::escape(p)),
                None => "—".to_string(),
            };
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                html::fmt_text(r.title.as_deref()),
                html::fmt_text(r.city.as_deref()),
                html::fmt_text(r.issue_type.as_deref()),
                html::fmt_text(r.recommended_action.as_deref()),
                html::fmt_text(r.potential_improvement.as_deref()),
                priority,
            )
        })
        .collect();

    let body = format!(
        r#"{filter_form}
{banner}
<section><h2>Top ads by ROI</h2>{ads_table}</section>
<section><h2>Category scoring</h2>{categories_table}</section>
<section><h2>Geo profitability</h2>{geo_table}</section>
<section><h2>Recommendations</h2>{recommendations_table}</section>"#,
        filter_form = html::company_filter_form("/intelligence", Some(company), false, ""),
        banner = banner,
        ads_table = html::table(
            &["Rank#", "Ad", "City", "Views#", "Contacts#", "Conversion#", "CPL#", "ROI#"],
            &ad_rows
        ),
        categories_table = html::table(
            &["Category", "Ads#", "Contacts#", "Avg CPL#", "Score#"],
            &category_rows
        ),
        geo_table = html::table(
            &["City", "Ads#", "Contacts#", "Avg CPL#", "Potential#", "Competition"],
            &geo_rows
        ),
        recommendations_table = html::table(
            &["Ad", "City", "Issue", "Action", "Expected gain", "Priority"],
            &recommendation_rows
        ),
    );

    Html(html::page_shell(
        "Intelligence",
        "ROI ranking, geo scoring and optimization advice",
        &body,
    ))
}
