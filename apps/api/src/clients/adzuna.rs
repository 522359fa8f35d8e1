//! Job search and salary estimation via the Adzuna jobs API (US market).
//!
//! Salary estimates come from the 10th/50th/90th percentiles of posted
//! salaries when enough postings carry one; unconfigured credentials degrade
//! to empty results rather than errors so the analysis pipeline can continue.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::market::{JobListing, SalaryEstimate};

const BASE_URL: &str = "https://api.adzuna.com/v1/api";
const SALARY_SAMPLE_PAGE_SIZE: usize = 50;
const MIN_SALARY_SAMPLES: usize = 5;

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    id: String,
    title: String,
    company: Option<AdzunaName>,
    location: Option<AdzunaLocation>,
    #[serde(default)]
    description: String,
    redirect_url: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    created: Option<String>,
    category: Option<AdzunaCategory>,
}

#[derive(Debug, Deserialize)]
struct AdzunaName {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaLocation {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaCategory {
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaSearchResponse {
    #[serde(default)]
    results: Vec<AdzunaJob>,
    #[serde(default)]
    count: u64,
}

pub struct AdzunaClient {
    http: reqwest::Client,
    app_id: Option<String>,
    app_key: Option<String>,
}

impl AdzunaClient {
    pub fn new(http: reqwest::Client, app_id: Option<String>, app_key: Option<String>) -> Self {
        Self { http, app_id, app_key }
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.app_id.as_deref()?, self.app_key.as_deref()?))
    }

    async fn search(
        &self,
        title: &str,
        location: &str,
        page: u32,
        per_page: usize,
    ) -> Result<AdzunaSearchResponse> {
        let Some((app_id, app_key)) = self.credentials() else {
            bail!("ADZUNA_APP_ID and ADZUNA_APP_KEY are not configured");
        };

        let per_page = per_page.to_string();
        let response = self
            .http
            .get(format!("{BASE_URL}/jobs/us/search/{page}"))
            .query(&[
                ("app_id", app_id),
                ("app_key", app_key),
                ("what", title),
                ("where", location),
                ("results_per_page", &per_page),
            ])
            .send()
            .await
            .context("Adzuna search request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Adzuna search failed: {status}");
        }

        response
            .json()
            .await
            .context("Adzuna returned a malformed payload")
    }

    /// Searches job postings. Unconfigured credentials yield an empty page.
    pub async fn search_jobs(
        &self,
        title: &str,
        location: &str,
        page: u32,
        per_page: usize,
    ) -> Result<(Vec<JobListing>, u64)> {
        if self.credentials().is_none() {
            warn!("Adzuna not configured; returning empty job results");
            return Ok((Vec::new(), 0));
        }

        let location = if location.trim().is_empty() {
            "USA"
        } else {
            location
        };
        debug!(title, location, page, "Adzuna job search");
        let data = self.search(title, location, page, per_page).await?;

        let jobs = data
            .results
            .into_iter()
            .map(|job| JobListing {
                id: job.id,
                title: job.title,
                company: job
                    .company
                    .and_then(|c| c.display_name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                location: job
                    .location
                    .and_then(|l| l.display_name)
                    .unwrap_or_default(),
                description: job.description,
                url: job.redirect_url.unwrap_or_default(),
                salary_min: job.salary_min,
                salary_max: job.salary_max,
                created_at: job.created,
                category: job.category.and_then(|c| c.label),
            })
            .collect();

        Ok((jobs, data.count))
    }

    /// Estimates a salary band for a title. Posted salary figures drive the
    /// 10th/50th/90th percentiles; with missing credentials, an upstream
    /// failure, or too few samples the estimate comes from a title-keyword
    /// table instead (`sample_size` 0 marks an estimated band).
    pub async fn salary_estimate(&self, title: &str, location: Option<&str>) -> SalaryEstimate {
        let location = location.unwrap_or("USA");

        if self.credentials().is_none() {
            warn!("Adzuna not configured; using estimated salary band");
            return fallback_salary(title, location);
        }

        let data = match self.search(title, location, 1, SALARY_SAMPLE_PAGE_SIZE).await {
            Ok(data) => data,
            Err(e) => {
                warn!(title, error = %e, "salary search failed; using estimated band");
                return fallback_salary(title, location);
            }
        };

        let with_salary: Vec<&AdzunaJob> = data
            .results
            .iter()
            .filter(|j| j.salary_min.is_some() || j.salary_max.is_some())
            .collect();

        if with_salary.len() < MIN_SALARY_SAMPLES {
            debug!(
                title,
                samples = with_salary.len(),
                "too few salary samples; using estimated band"
            );
            return fallback_salary(title, location);
        }

        let mut salaries: Vec<f64> = Vec::new();
        for job in &with_salary {
            if let Some(min) = job.salary_min {
                salaries.push(min);
            }
            if let Some(max) = job.salary_max {
                salaries.push(max);
            }
        }
        salaries.sort_by(|a, b| a.total_cmp(b));

        SalaryEstimate {
            min: percentile(&salaries, 0.1),
            max: percentile(&salaries, 0.9),
            median: percentile(&salaries, 0.5),
            location: location.to_string(),
            sample_size: with_salary.len() as u64,
        }
    }
}

/// Title-keyword salary bands used when no posted-salary data is available.
fn fallback_salary(title: &str, location: &str) -> SalaryEstimate {
    let lowered = title.to_lowercase();

    let base: f64 = if lowered.contains("senior")
        || lowered.contains("lead")
        || lowered.contains("principal")
    {
        150_000.0
    } else if lowered.contains("manager") || lowered.contains("director") {
        140_000.0
    } else if lowered.contains("vp") || lowered.contains("head of") {
        200_000.0
    } else if lowered.contains("engineer") || lowered.contains("developer") {
        120_000.0
    } else if lowered.contains("analyst") {
        85_000.0
    } else if lowered.contains("intern") || lowered.contains("junior") {
        60_000.0
    } else {
        75_000.0
    };

    SalaryEstimate {
        min: (base * 0.8).round(),
        max: (base * 1.3).round(),
        median: base,
        location: location.to_string(),
        sample_size: 0,
    }
}

fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((sorted.len() as f64 * fraction) as usize).min(sorted.len() - 1);
    sorted[index].round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_picks_expected_positions() {
        let sorted: Vec<f64> = (1..=10).map(|i| i as f64 * 10_000.0).collect();
        assert_eq!(percentile(&sorted, 0.1), 20_000.0);
        assert_eq!(percentile(&sorted, 0.5), 60_000.0);
        assert_eq!(percentile(&sorted, 0.9), 100_000.0);
    }

    #[test]
    fn test_percentile_empty_is_zero() {
        assert_eq!(percentile(&[], 0.5), 0.0);
    }

    #[tokio::test]
    async fn test_unconfigured_search_is_empty_not_error() {
        let client = AdzunaClient::new(reqwest::Client::new(), None, None);
        let (jobs, count) = client.search_jobs("engineer", "Austin", 1, 15).await.unwrap();
        assert!(jobs.is_empty());
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_unconfigured_salary_falls_back_to_estimate() {
        let client = AdzunaClient::new(reqwest::Client::new(), None, None);
        let estimate = client.salary_estimate("Software Engineer", None).await;
        assert_eq!(estimate.median, 120_000.0);
        assert_eq!(estimate.sample_size, 0);
    }

    #[test]
    fn test_fallback_salary_seniority_tiers() {
        assert_eq!(fallback_salary("Senior Engineer", "USA").median, 150_000.0);
        assert_eq!(fallback_salary("Engineering Manager", "USA").median, 140_000.0);
        assert_eq!(fallback_salary("Data Analyst", "USA").median, 85_000.0);
        assert_eq!(fallback_salary("Botanist", "USA").median, 75_000.0);
    }

    #[test]
    fn test_job_payload_tolerates_missing_fields() {
        let json = r#"{"results": [{"id": "1", "title": "Engineer"}], "count": 1}"#;
        let parsed: AdzunaSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert!(parsed.results[0].company.is_none());
    }
}
