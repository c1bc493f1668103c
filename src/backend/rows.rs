//! Backend Row Shapes
//!
//! Deserialization targets for the rows the analytics backend returns.
//! These are shape hints for rendering only: every field is optional, nothing
//! is validated or mutated here, and unknown fields are ignored. The backend
//! owns the real schema.

use serde::{Deserialize, Serialize};

// ============================================
// Sales dashboard
// ============================================

/// One-row executive summary of sales activity
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SalesSummary {
    pub total_ads: Option<i64>,
    pub total_views: Option<i64>,
    pub total_contacts: Option<i64>,
    pub avg_conversion: Option<f64>,
    pub total_revenue: Option<f64>,
    pub refreshed_at: Option<String>,
}

/// Per-city sales ranking
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CitySales {
    pub city: Option<String>,
    pub ads_count: Option<i64>,
    pub total_views: Option<i64>,
    pub total_contacts: Option<i64>,
    pub conversion_rate: Option<f64>,
    pub avg_price: Option<f64>,
}

/// Per-category performance
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryPerformance {
    pub category: Option<String>,
    pub ads_count: Option<i64>,
    pub total_views: Option<i64>,
    pub total_contacts: Option<i64>,
    pub conversion_rate: Option<f64>,
    pub avg_days_online: Option<f64>,
}

/// Daily sales trend point
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SalesTrend {
    pub report_date: Option<String>,
    pub total_ads: Option<i64>,
    pub total_views: Option<i64>,
    pub total_contacts: Option<i64>,
    pub avg_conversion: Option<f64>,
}

// ============================================
// Bids dashboard
// ============================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BidsSummary {
    pub total_bids: Option<i64>,
    pub avg_current_bid: Option<f64>,
    pub avg_recommended_bid: Option<f64>,
    pub total_with_bids: Option<i64>,
    pub success_rate: Option<f64>,
    pub last_updated: Option<String>,
}

/// Bid statistics bucketed by search position range
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PositionAnalysis {
    pub position_range: Option<String>,
    pub count_bids: Option<i64>,
    pub avg_current_bid: Option<f64>,
    pub avg_recommended_bid: Option<f64>,
    pub success_rate: Option<f64>,
}

// ============================================
// Contacts dashboard
// ============================================

/// A single ad's contact count on a given date
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactRow {
    pub ad_id: Option<String>,
    pub city: Option<String>,
    pub contacts: Option<i64>,
    pub date: Option<String>,
}

/// Cost-per-lead by bidding strategy
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyCpl {
    pub strategy: Option<String>,
    pub contacts: Option<i64>,
    pub cost: Option<f64>,
    pub cpl: Option<f64>,
}

/// Contact totals per city
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CityContacts {
    pub city: Option<String>,
    pub contacts: Option<i64>,
}

// ============================================
// Intelligence dashboard
// ============================================

/// Unified per-ad performance with backend-computed ROI ranking
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AdPerformance {
    pub ad_id: Option<String>,
    pub title: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub views: Option<i64>,
    pub contacts: Option<i64>,
    pub conversion_rate: Option<f64>,
    pub current_bid: Option<f64>,
    pub recommended_bid: Option<f64>,
    pub bid_efficiency: Option<f64>,
    pub cost: Option<f64>,
    pub cpl: Option<f64>,
    pub roi_score: Option<f64>,
    pub profitability_rank: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryAnalysis {
    pub category: Option<String>,
    pub ads_count: Option<i64>,
    pub total_views: Option<i64>,
    pub total_contacts: Option<i64>,
    pub avg_conversion_rate: Option<f64>,
    pub avg_cpl: Option<f64>,
    pub total_cost: Option<f64>,
    pub avg_bid_efficiency: Option<f64>,
    pub category_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoAnalysis {
    pub city: Option<String>,
    pub ads_count: Option<i64>,
    pub total_contacts: Option<i64>,
    pub avg_conversion_rate: Option<f64>,
    pub avg_cpl: Option<f64>,
    pub market_potential_score: Option<f64>,
    pub competition_level: Option<String>,
}

/// Backend-generated optimization advice for a single ad
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Recommendation {
    pub ad_id: Option<String>,
    pub title: Option<String>,
    pub city: Option<String>,
    pub issue_type: Option<String>,
    pub current_value: Option<f64>,
    pub recommended_action: Option<String>,
    pub potential_improvement: Option<String>,
    pub priority_level: Option<String>,
}

// ============================================
// Strategy dashboard (legacy procedures)
// ============================================

/// Overall analytics summary.
///
/// Aliases cover the previous schema revision still served by some
/// deployments of the backend.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsSummary {
    #[serde(alias = "ads_count")]
    pub total_ads: Option<i64>,
    #[serde(alias = "cities_count")]
    pub total_cities: Option<i64>,
    #[serde(alias = "contacts_total")]
    pub total_contacts: Option<i64>,
    #[serde(alias = "conversion_pct")]
    pub avg_conversion: Option<f64>,
    #[serde(alias = "last_updated_at")]
    pub refreshed_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CityPerformance {
    pub city: Option<String>,
    pub impressions: Option<i64>,
    pub views: Option<i64>,
    pub contacts: Option<i64>,
    pub view_to_contact: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyMonitoring {
    pub strategy_type: Option<String>,
    pub ads_count: Option<i64>,
    pub avg_cost_per_contact: Option<f64>,
    pub avg_conversion: Option<f64>,
}

// ============================================
// Catalog, pulse, executive
// ============================================

/// A ready-to-use dataset exposed by the backend
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetRow {
    pub name: Option<String>,
    pub fq_name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub last_refreshed: Option<String>,
}

/// Daily advertising pulse from the `v_ads_pulse` view
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PulseRow {
    pub report_date: Option<String>,
    pub impressions: Option<i64>,
    pub clicks: Option<i64>,
    pub spend_rub: Option<f64>,
    pub messages: Option<i64>,
    pub leads: Option<i64>,
    pub orders: Option<i64>,
}

/// Single-row company KPIs from the `v_ceo_dashboard` view
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecutiveRow {
    pub active_tasks_count: Option<i64>,
    pub weekly_financial_flow: Option<f64>,
    pub new_deals_count: Option<i64>,
    pub failed_queues_count: Option<i64>,
    pub most_active_ai_agent: Option<String>,
    pub ai_agent_events_count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_to_none() {
        let row: SalesSummary = serde_json::from_str(r#"{"total_ads": 56}"#).unwrap();
        assert_eq!(row.total_ads, Some(56));
        assert_eq!(row.total_views, None);
        assert_eq!(row.refreshed_at, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let row: PulseRow =
            serde_json::from_str(r#"{"report_date":"2025-06-01","brand_new_column":1}"#).unwrap();
        assert_eq!(row.report_date.as_deref(), Some("2025-06-01"));
    }

    #[test]
    fn summary_accepts_previous_schema_names() {
        let row: AnalyticsSummary = serde_json::from_str(
            r#"{"ads_count": 10, "cities_count": 3, "contacts_total": 42,
                "conversion_pct": 1.5, "last_updated_at": "2025-06-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(row.total_ads, Some(10));
        assert_eq!(row.total_cities, Some(3));
        assert_eq!(row.total_contacts, Some(42));
        assert_eq!(row.avg_conversion, Some(1.5));
        assert!(row.refreshed_at.is_some());
    }

    #[test]
    fn null_values_deserialize_to_none() {
        let row: ExecutiveRow = serde_json::from_str(
            r#"{"active_tasks_count": null, "most_active_ai_agent": "lead-router"}"#,
        )
        .unwrap();
        assert_eq!(row.active_tasks_count, None);
        assert_eq!(row.most_active_ai_agent.as_deref(), Some("lead-router"));
    }
}
