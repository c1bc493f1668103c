//! AdPulse Web Layer
//!
//! Server-rendered dashboard pages plus a small JSON surface, built with
//! Axum.
//!
//! # Routes
//!
//! ## Pages
//! - `GET /` - overview: configuration status and page directory
//! - `GET /sales` - sales summary, top cities, categories, trend
//! - `GET /bids` - bid totals and position analysis
//! - `GET /contacts` - lead flow by ad, strategy and city
//! - `GET /intelligence` - ROI ranking, geo scoring, recommendations
//! - `GET /strategy` - legacy analytics procedures
//! - `GET /assets` - dataset catalog
//! - `GET /pulse` - daily spend pulse view
//! - `GET /executive` - company KPI view
//!
//! ## Health
//! - `GET /health` - full health page with backend probes
//! - `GET /health/live` - liveness probe
//! - `GET /health/ready` - readiness probe
//!
//! ## JSON
//! - `GET /api/data?type=assets|pulse` - raw rows behind the catalog/pulse

pub mod dto;
pub mod error;
pub mod html;
pub mod load;
pub mod routes;
pub mod state;

pub use error::{WebError, WebResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all pages and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::home::page))
        .route("/sales", get(routes::sales::page))
        .route("/bids", get(routes::bids::page))
        .route("/contacts", get(routes::contacts::page))
        .route("/intelligence", get(routes::intelligence::page))
        .route("/strategy", get(routes::strategy::page))
        .route("/assets", get(routes::assets::page))
        .route("/pulse", get(routes::pulse::page))
        .route("/executive", get(routes::executive::page))
        .route("/health", get(routes::health::page))
        .route("/health/live", get(routes::health::liveness))
        .route("/health/ready", get(routes::health::readiness))
        .route("/api/data", get(routes::data::data))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState) -> Result<(), WebError> {
    let addr = state.config.server.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| WebError::Internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AdPulse dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {e}")))?;

    tracing::info!("AdPulse dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendClient;
    use crate::config::Config;
    use axum::body::Body;
    use axum::extract::Path;
    use axum::http::{header, Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    /// Stub backend for page tests: three of the sales procedures answer,
    /// the categories procedure is broken.
    async fn sales_stub(Path(procedure): Path<String>) -> axum::response::Response {
        let ok = |body: &str| {
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body.to_string(),
            )
                .into_response()
        };

        match procedure.as_str() {
            "get_avito_sales_summary_v1" => ok(
                r#"[{"total_ads":56,"total_views":1200,"total_contacts":40,
                    "avg_conversion":3.3,"total_revenue":250000.0,
                    "refreshed_at":"2025-06-01T10:00:00Z"}]"#,
            ),
            "get_avito_top_cities_sales_v1" => ok(
                r#"[{"city":"Kazan","ads_count":12,"total_views":300,
                    "total_contacts":9,"conversion_rate":3.0,"avg_price":1500.0}]"#,
            ),
            "get_avito_categories_performance_v1" => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "categories exploded".to_string(),
            )
                .into_response(),
            "get_avito_sales_trends_v1" => ok("[]"),
            _ => (StatusCode::NOT_FOUND, "unknown procedure".to_string()).into_response(),
        }
    }

    async fn spawn_backend_stub() -> String {
        let router = Router::new().route("/rest/v1/rpc/:procedure", post(sales_stub));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn test_app(base_url: String) -> Router {
        let mut config = Config::default();
        config.backend.base_url = base_url;
        config.backend.api_key = "test-key".to_string();
        config.backend.request_timeout_ms = 2_000;

        let backend = Arc::new(BackendClient::new(config.backend.clone()));
        build_router(AppState::new(backend, config))
    }

    fn unconfigured_app() -> Router {
        let config = Config::default();
        let backend = Arc::new(BackendClient::new(config.backend.clone()));
        build_router(AppState::new(backend, config))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn overview_renders_without_backend() {
        let app = unconfigured_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Backend is not configured"));
    }

    #[tokio::test]
    async fn sales_page_renders_survivors_when_one_dataset_fails() {
        let app = test_app(spawn_backend_stub().await);

        let response = app
            .oneshot(Request::builder().uri("/sales").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;

        // Successful datasets render
        assert!(body.contains("56"));
        assert!(body.contains("Kazan"));
        // The failed dataset shows the visible error indicator and no rows
        assert!(body.contains("banner-error"));
        assert!(body.contains("categories"));
        assert!(body.contains("No data"));
    }

    #[tokio::test]
    async fn liveness_is_ok() {
        let app = unconfigured_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_reflects_configuration() {
        let app = unconfigured_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let app = test_app("http://127.0.0.1:1".to_string());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn data_endpoint_requires_type() {
        let app = unconfigured_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/data")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn data_endpoint_rejects_unknown_type() {
        let app = unconfigured_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/data?type=secrets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn data_endpoint_maps_backend_failure_to_bad_gateway() {
        // Backend unreachable
        let app = test_app("http://127.0.0.1:1".to_string());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/data?type=pulse")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_string(response).await;
        assert!(body.contains("BACKEND_ERROR"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = unconfigured_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/no-such-page")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
