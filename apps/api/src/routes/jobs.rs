//! Job search, salary, and job-compatibility endpoints. Search and salary
//! are backed by the Adzuna client; compatibility is a structured LLM call.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::llm_client::prompts;
use crate::models::analysis::ProfileAnalysis;
use crate::models::market::{JobCompatibility, JobListing, SalaryEstimate};
use crate::state::AppState;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: usize = 15;

#[derive(Debug, Deserialize)]
pub struct JobSearchParams {
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub page: Option<u32>,
    pub per_page: Option<usize>,
}

/// GET /api/v1/jobs/search?title=...&location=...
pub async fn handle_job_search(
    State(state): State<AppState>,
    Query(params): Query<JobSearchParams>,
) -> Result<Json<Value>, AppError> {
    if params.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }

    let (jobs, total) = state
        .jobs
        .search_jobs(
            &params.title,
            &params.location,
            params.page.unwrap_or(DEFAULT_PAGE),
            params.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!({
        "jobs": jobs,
        "totalCount": total,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SalaryParams {
    pub title: String,
    pub location: Option<String>,
}

/// GET /api/v1/salary/estimate?title=...&location=...
pub async fn handle_salary_estimate(
    State(state): State<AppState>,
    Query(params): Query<SalaryParams>,
) -> Result<Json<Value>, AppError> {
    if params.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }

    let estimate = state
        .jobs
        .salary_estimate(&params.title, params.location.as_deref())
        .await;

    Ok(Json(json!({ "estimate": estimate })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityRequest {
    pub job: JobListing,
    pub profile_analysis: ProfileAnalysis,
    pub market_value: Option<SalaryEstimate>,
}

/// POST /api/v1/jobs/compatibility
///
/// Scores a previously analyzed candidate against one job listing.
pub async fn handle_job_compatibility(
    State(state): State<AppState>,
    Json(request): Json<CompatibilityRequest>,
) -> Result<Json<JobCompatibility>, AppError> {
    if request.job.title.trim().is_empty() {
        return Err(AppError::Validation(
            "job.title must not be empty".to_string(),
        ));
    }

    let prompt = prompts::compatibility_prompt(
        &request.job,
        &request.profile_analysis,
        request.market_value.as_ref(),
    );

    let compatibility: JobCompatibility = state
        .llm
        .call_json(&prompt, prompts::COMPATIBILITY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("compatibility scoring failed: {e}")))?;

    Ok(Json(compatibility))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_request_wire_shape() {
        let json = r#"{
            "job": {
                "id": "j1",
                "title": "Staff Engineer",
                "company": "Acme Corp",
                "location": "Austin, TX",
                "description": "Own the data platform.",
                "url": "https://example.com/j1",
                "salaryMin": 170000,
                "salaryMax": 210000,
                "createdAt": null,
                "category": null
            },
            "profileAnalysis": {
                "career": {"trajectory": "steady upward", "yearsOfExperience": 9}
            },
            "marketValue": {
                "min": 150000, "max": 190000, "median": 170000,
                "location": "USA", "sampleSize": 12
            }
        }"#;
        let request: CompatibilityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.job.title, "Staff Engineer");
        assert_eq!(request.profile_analysis.career.years_of_experience, 9.0);
        assert_eq!(request.market_value.unwrap().median, 170_000.0);
    }

    #[test]
    fn test_compatibility_request_market_value_is_optional() {
        let json = r#"{
            "job": {
                "id": "j1", "title": "Engineer", "company": "Acme",
                "location": "", "description": "", "url": "",
                "salaryMin": null, "salaryMax": null,
                "createdAt": null, "category": null
            },
            "profileAnalysis": {}
        }"#;
        let request: CompatibilityRequest = serde_json::from_str(json).unwrap();
        assert!(request.market_value.is_none());
    }
}
