pub mod health;
pub mod jobs;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analyze::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/parse-resume", post(handlers::handle_parse_resume))
        // Jobs API
        .route("/api/v1/jobs/search", get(jobs::handle_job_search))
        .route(
            "/api/v1/jobs/compatibility",
            post(jobs::handle_job_compatibility),
        )
        .route("/api/v1/salary/estimate", get(jobs::handle_salary_estimate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Config;

    fn test_state() -> AppState {
        AppState::new(Config {
            anthropic_api_key: "test-key".to_string(),
            pdfco_api_key: "test-key".to_string(),
            serpapi_api_key: None,
            rapidapi_key: None,
            lightcast_client_id: None,
            lightcast_client_secret: None,
            adzuna_app_id: None,
            adzuna_app_key: None,
            port: 0,
            rust_log: "info".to_string(),
        })
    }

    #[tokio::test]
    async fn test_health_route_responds_ok() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_compatibility_route_rejects_blank_job_title() {
        let app = build_router(test_state());
        let body = r#"{
            "job": {
                "id": "j1", "title": "  ", "company": "Acme",
                "location": "", "description": "", "url": "",
                "salaryMin": null, "salaryMax": null,
                "createdAt": null, "category": null
            },
            "profileAnalysis": {}
        }"#;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/jobs/compatibility")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
