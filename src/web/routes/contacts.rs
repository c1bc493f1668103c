//! Contacts Dashboard
//!
//! Per-ad contact flow for one company over a chosen window, cost-per-lead
//! by strategy, and the city leaderboard. City names in the leaderboard link
//! back into this page as a city filter.

use axum::extract::{Query, State};
use axum::response::Html;
use serde_json::json;
use std::sync::Arc;

use crate::backend::rows::{CityContacts, ContactRow, StrategyCpl};
use crate::web::dto::PageFilter;
use crate::web::html;
use crate::web::load::load;
use crate::web::state::AppState;

const DEFAULT_COMPANY: &str = "seltka";
const DEFAULT_DAYS: u32 = 7;

pub async fn page(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PageFilter>,
) -> Html<String> {
    let backend = &state.backend;
    let company = filter.company_or(DEFAULT_COMPANY);
    let days = filter.days_or(DEFAULT_DAYS);
    let city = filter.city();

    let mut contacts_params = json!({ "p_company": company, "p_days": days });
    if let Some(city) = city {
        contacts_params["p_city"] = json!(city);
    }
    let strategy_params = json!({ "p_company": company, "p_days": days });
    // City leaderboard is intentionally unfiltered; it ranks all companies
    let cities_params = json!({ "p_limit": 10 });

    let (contacts, strategies, cities) = tokio::join!(
        load(
            "contacts",
            backend.rpc_prefer_v1::<Vec<ContactRow>>("get_avito_contacts", Some(&contacts_params))
        ),
        load(
            "cpl_by_strategy",
            backend.rpc_prefer_v1::<Vec<StrategyCpl>>(
                "get_avito_cpl_by_strategy",
                Some(&strategy_params)
            )
        ),
        load(
            "top_cities",
            backend.rpc_prefer_v1::<Vec<CityContacts>>(
                "get_avito_top_cities_sales",
                Some(&cities_params)
            )
        ),
    );

    let banner = html::error_banner(&[
        contacts.error.as_deref(),
        strategies.error.as_deref(),
        cities.error.as_deref(),
    ]);

    let total_contacts: i64 = contacts.rows.iter().filter_map(|c| c.contacts).sum();

    let contact_rows: String = contacts
        .rows
        .iter()
        .map(|c| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td class="num">{}</td><td>{}</td></tr>"#,
                html::fmt_text(c.ad_id.as_deref()),
                html::fmt_text(c.city.as_deref()),
                html::fmt_count(c.contacts),
                html::fmt_date(c.date.as_deref()),
            )
        })
        .collect();

    let strategy_rows: String = strategies
        .rows
        .iter()
        .map(|s| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                html::fmt_text(s.strategy.as_deref()),
                html::fmt_count(s.contacts),
                html::fmt_money(s.cost),
                html::fmt_money(s.cpl),
            )
        })
        .collect();

    let city_rows: String = cities
        .rows
        .iter()
        .map(|c| {
            let link = match c.city.as_deref() {
                Some(name) => format!(
                    r#"<a href="/contacts?company={}&days={}&city={}">{}</a>"#,
                    company,
                    days,
                    urlencoding::encode(name),
                    html::escape(name)
                ),
                None => "—".to_string(),
            };
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td></tr>"#,
                link,
                html::fmt_count(c.contacts),
            )
        })
        .collect();

    let extra_fields = format!(
        r#"<label for="days">Days</label>
<input id="days" name="days" type="number" min="1" max="90" value="{days}">
<label for="city">City</label>
<input id="city" name="city" type="text" value="{}">"#,
        html::escape(city.unwrap_or("")),
    );

    let city_note = match city {
        Some(c) => format!(" in {}", html::escape(c)),
        None => String::new(),
    };

    let body = format!(
        r#"{filter_form}
{banner}
<section><div class="cards">{total_card}</div></section>
<section><h2>Contacts by ad{city_note}</h2>{contacts_table}</section>
<section><h2>Cost per lead by strategy</h2>{strategy_table}</section>
<section><h2>Top cities</h2>{cities_table}</section>"#,
        filter_form = html::company_filter_form("/contacts", Some(company), false, &extra_fields),
        banner = banner,
        total_card = html::stat_card(
            &html::fmt_count(Some(total_contacts)),
            "Contacts",
            &format!("Last {days} days")
        ),
        city_note = city_note,
        contacts_table = html::table(&["Ad", "City", "Contacts#", "Date"], &contact_rows),
        strategy_table = html::table(&["Strategy", "Contacts#", "Cost#", "CPL#"], &strategy_rows),
        cities_table = html::table(&["City", "Contacts#"], &city_rows),
    );

    Html(html::page_shell(
        "Contacts",
        "Lead flow by ad, strategy and city",
        &body,
    ))
}
