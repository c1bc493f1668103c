//! Request DTOs
//!
//! Query-parameter shapes shared by the page handlers.

use serde::Deserialize;

/// Company codes and display labels for the filter dropdowns.
///
/// The codes are passed through to the backend as `p_company`; the backend
/// owns the real list.
pub const COMPANIES: &[(&str, &str)] = &[
    ("seltka", "Seltka"),
    ("iltech", "Iltech"),
    ("mituroom", "Mituroom"),
];

/// Common page filter parameters (`?company=`, `?days=`, `?city=`)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageFilter {
    pub company: Option<String>,
    pub days: Option<u32>,
    pub city: Option<String>,
}

impl PageFilter {
    /// The company filter, or `None` for "all companies".
    pub fn company(&self) -> Option<&str> {
        match self.company.as_deref().map(str::trim) {
            Some("") | Some("all") | None => None,
            Some(c) => Some(c),
        }
    }

    /// The company filter, defaulting to the given code when absent.
    pub fn company_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.company().unwrap_or(default)
    }

    /// The report window in days, defaulting when absent.
    pub fn days_or(&self, default: u32) -> u32 {
        self.days.unwrap_or(default)
    }

    /// The city filter, trimmed; `None` when blank.
    pub fn city(&self) -> Option<&str> {
        match self.city.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(c) => Some(c),
        }
    }
}

/// Attach `p_company` to a parameter object when a company filter is active
pub fn with_company(mut params: serde_json::Value, company: Option<&str>) -> serde_json::Value {
    if let (Some(c), Some(obj)) = (company, params.as_object_mut()) {
        obj.insert(
            "p_company".to_string(),
            serde_json::Value::String(c.to_string()),
        );
    }
    params
}

/// Query for the JSON data endpoint (`/api/data?type=...`)
#[derive(Debug, Deserialize)]
pub struct DataQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_all_means_no_filter() {
        let all = PageFilter {
            company: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(all.company(), None);
        assert_eq!(all.company_or("seltka"), "seltka");

        let named = PageFilter {
            company: Some("iltech".to_string()),
            ..Default::default()
        };
        assert_eq!(named.company(), Some("iltech"));
    }

    #[test]
    fn blank_city_is_no_filter() {
        let filter = PageFilter {
            city: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.city(), None);

        let filter = PageFilter {
            city: Some(" Казань ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.city(), Some("Казань"));
    }
}
