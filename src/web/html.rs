//! HTML Rendering Helpers
//!
//! Pages are rendered server-side as plain HTML strings. The helpers here
//! cover the shared shell, tables, summary cards and value formatting so the
//! page modules stay focused on which datasets they show.

/// Navigation entries: (path, label)
pub const NAV: &[(&str, &str)] = &[
    ("/", "Overview"),
    ("/sales", "Sales"),
    ("/bids", "Bids"),
    ("/contacts", "Contacts"),
    ("/intelligence", "Intelligence"),
    ("/strategy", "Strategy"),
    ("/assets", "Assets"),
    ("/pulse", "Pulse"),
    ("/executive", "Executive"),
    ("/health", "Health"),
];

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #2c3e50; background: #f5f6f8; }
nav { background: #2c3e50; padding: 12px 24px; }
nav a { color: #cfd8e3; text-decoration: none; margin-right: 16px; font-size: 14px; }
nav a:hover { color: #fff; }
main { max-width: 1400px; margin: 0 auto; padding: 24px; }
h1 { margin-bottom: 4px; }
.subtitle { color: #6c757d; margin-bottom: 24px; }
.banner-error { padding: 12px 16px; margin-bottom: 16px; color: #721c24; background: #f8d7da; border: 1px solid #f5c6cb; border-radius: 8px; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; margin-bottom: 24px; }
.card { padding: 20px; background: #fff; border: 1px solid #e9ecef; border-radius: 12px; text-align: center; }
.card-value { font-size: 32px; font-weight: 700; }
.card-label { font-size: 13px; font-weight: 600; margin-top: 6px; }
.card-hint { font-size: 12px; color: #6c757d; }
section { margin-bottom: 32px; }
table { width: 100%; border-collapse: collapse; background: #fff; border: 1px solid #e9ecef; border-radius: 8px; }
th { padding: 10px 12px; text-align: left; background: #f8f9fa; border-bottom: 2px solid #e9ecef; font-size: 14px; }
td { padding: 10px 12px; border-top: 1px solid #f1f3f4; font-size: 14px; }
td.num, th.num { text-align: right; }
.empty { padding: 24px; text-align: center; color: #888; }
.badge { padding: 2px 8px; border-radius: 10px; font-size: 12px; font-weight: 600; }
.badge.good { background: #d4edda; color: #155724; }
.badge.warn { background: #fff3cd; color: #856404; }
.badge.bad { background: #f8d7da; color: #721c24; }
.muted { color: #6c757d; }
form.filters { margin-bottom: 16px; }
form.filters label { font-size: 14px; margin-right: 6px; }
form.filters select, form.filters input { padding: 4px 8px; margin-right: 12px; border: 1px solid #e1e1e1; border-radius: 6px; }
"#;

/// Escape a value for interpolation into HTML text or attributes
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page body in the shared document shell
pub fn page_shell(title: &str, subtitle: &str, body: &str) -> String {
    let nav_links: String = NAV
        .iter()
        .map(|(path, label)| format!(r#"<a href="{path}">{label}</a>"#))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — AdPulse</title>
<style>{STYLE}</style>
</head>
<body>
<nav>{nav_links}</nav>
<main>
<h1>{title}</h1>
<p class="subtitle">{subtitle}</p>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        subtitle = escape(subtitle),
    )
}

/// Render the visible error banner for a page, or nothing when all calls
/// succeeded. One failed dataset is enough to show it.
pub fn error_banner(errors: &[Option<&str>]) -> String {
    let failed: Vec<&str> = errors.iter().filter_map(|e| *e).collect();
    if failed.is_empty() {
        return String::new();
    }

    let items: String = failed
        .iter()
        .map(|e| format!("<div>{}</div>", escape(e)))
        .collect();
    format!(r#"<div class="banner-error"><strong>Some data failed to load.</strong>{items}</div>"#)
}

/// A summary card with a large value, a label and a hint line
pub fn stat_card(value: &str, label: &str, hint: &str) -> String {
    format!(
        r#"<div class="card"><div class="card-value">{}</div><div class="card-label">{}</div><div class="card-hint">{}</div></div>"#,
        value,
        escape(label),
        escape(hint)
    )
}

/// A table with the given headers and pre-rendered body rows.
///
/// Headers ending in `#` are right-aligned numeric columns (the marker is
/// stripped). An empty body renders a single "No data" row.
pub fn table(headers: &[&str], body_rows: &str) -> String {
    let head: String = headers
        .iter()
        .map(|h| match h.strip_suffix('#') {
            Some(label) => format!(r#"<th class="num">{}</th>"#, escape(label)),
            None => format!("<th>{}</th>", escape(h)),
        })
        .collect();

    let body = if body_rows.is_empty() {
        format!(
            r#"<tr><td colspan="{}" class="empty">No data</td></tr>"#,
            headers.len()
        )
    } else {
        body_rows.to_string()
    };

    format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
}

/// Traffic-light badge for a percentage: >= `good` green, >= `fair` yellow,
/// below red, absent muted.
pub fn rate_badge(rate: Option<f64>, good: f64, fair: f64) -> String {
    match rate {
        Some(r) => {
            let class = if r >= good {
                "good"
            } else if r >= fair {
                "warn"
            } else {
                "bad"
            };
            format!(r#"<span class="badge {class}">{r:.1}%</span>"#)
        }
        None => r#"<span class="muted">—</span>"#.to_string(),
    }
}

// ============================================
// Value formatting
// ============================================

fn group_thousands(v: i64) -> String {
    let digits = v.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if v < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Integer count with thousands separators, em dash when absent
pub fn fmt_count(v: Option<i64>) -> String {
    match v {
        Some(v) => group_thousands(v),
        None => "—".to_string(),
    }
}

/// Whole-ruble amount
pub fn fmt_money(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{} ₽", group_thousands(v.round() as i64)),
        None => "—".to_string(),
    }
}

/// Percentage with one decimal
pub fn fmt_pct(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}%"),
        None => "—".to_string(),
    }
}

/// Plain number with one decimal
pub fn fmt_num(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}"),
        None => "—".to_string(),
    }
}

/// Backend timestamps arrive as RFC 3339 or bare dates; render as DD.MM.YYYY
/// and fall back to the raw string for anything else.
pub fn fmt_date(v: Option<&str>) -> String {
    let Some(raw) = v else {
        return "—".to_string();
    };

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d.%m.%Y %H:%M").to_string();
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d.%m.%Y").to_string();
    }
    escape(raw)
}

/// Optional text cell
pub fn fmt_text(v: Option<&str>) -> String {
    match v {
        Some(s) => escape(s),
        None => "—".to_string(),
    }
}

/// Company filter form shared by the filtered pages.
///
/// `include_all` adds the "All companies" option for pages that can
/// aggregate across companies. `extra_fields` is pre-rendered HTML for
/// page-specific inputs (days, city).
pub fn company_filter_form(
    action: &str,
    selected: Option<&str>,
    include_all: bool,
    extra_fields: &str,
) -> String {
    let mut options = String::new();
    if include_all {
        let sel = if selected.is_none() { " selected" } else { "" };
        options.push_str(&format!(r#"<option value="all"{sel}>All companies</option>"#));
    }
    for (code, label) in crate::web::dto::COMPANIES {
        let sel = if selected == Some(*code) { " selected" } else { "" };
        options.push_str(&format!(r#"<option value="{code}"{sel}>{label}</option>"#));
    }

    format!(
        r#"<form class="filters" method="get" action="{action}">
<label for="company">Company</label>
<select id="company" name="company">{options}</select>
{extra_fields}
<button type="submit">Apply</button>
</form>"#
    )
}

/// Refreshed-at footer, shown on pages whose summary row carries a timestamp
pub fn refreshed_footer(ts: Option<&str>) -> String {
    match ts {
        Some(ts) => format!(r#"<p class="muted">Refreshed: {}</p>"#, fmt_date(Some(ts))),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>&"quote"'</b>"#),
            "&lt;b&gt;&amp;&quot;quote&quot;&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Казань"), "Казань");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(fmt_count(Some(0)), "0");
        assert_eq!(fmt_count(Some(999)), "999");
        assert_eq!(fmt_count(Some(56_100)), "56 100");
        assert_eq!(fmt_count(Some(1_234_567)), "1 234 567");
        assert_eq!(fmt_count(Some(-5_000)), "-5 000");
        assert_eq!(fmt_count(None), "—");
    }

    #[test]
    fn money_rounds_to_whole_rubles() {
        assert_eq!(fmt_money(Some(1234.56)), "1 235 ₽");
        assert_eq!(fmt_money(None), "—");
    }

    #[test]
    fn date_formats() {
        assert_eq!(fmt_date(Some("2025-06-01")), "01.06.2025");
        assert_eq!(
            fmt_date(Some("2025-06-01T10:30:00+03:00")),
            "01.06.2025 10:30"
        );
        assert_eq!(fmt_date(Some("yesterday")), "yesterday");
        assert_eq!(fmt_date(None), "—");
    }

    #[test]
    fn table_renders_empty_state() {
        let html = table(&["City", "Contacts#"], "");
        assert!(html.contains(r#"colspan="2""#));
        assert!(html.contains("No data"));
        assert!(html.contains(r#"<th class="num">Contacts</th>"#));
    }

    #[test]
    fn banner_only_renders_on_failure() {
        assert_eq!(error_banner(&[None, None]), "");
        let html = error_banner(&[None, Some("sales_summary: Backend error 500: boom")]);
        assert!(html.contains("banner-error"));
        assert!(html.contains("sales_summary"));
    }

    #[test]
    fn badge_thresholds() {
        assert!(rate_badge(Some(6.0), 5.0, 2.0).contains("good"));
        assert!(rate_badge(Some(3.0), 5.0, 2.0).contains("warn"));
        assert!(rate_badge(Some(1.0), 5.0, 2.0).contains("bad"));
        assert!(rate_badge(None, 5.0, 2.0).contains("muted"));
    }
}
