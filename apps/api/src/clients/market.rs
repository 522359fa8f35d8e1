//! Skill-demand lookup via the Lightcast open skills API, with a static
//! estimation fallback when credentials are absent or a lookup fails.
//!
//! Lightcast uses OAuth client-credentials; the token is cached process-wide
//! behind a mutex and refreshed with a five-minute expiry buffer.

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::market::SkillDemand;

const AUTH_URL: &str = "https://auth.emsicloud.com/connect/token";
const API_URL: &str = "https://emsiservices.com";
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(300);

const DEFAULT_DEMAND_SCORE: u32 = 50;
const DEFAULT_GROWTH_RATE: i32 = 5;

#[derive(Debug, Clone)]
struct TokenCache {
    token: String,
    expires_at: Instant,
}

impl TokenCache {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SkillSearchResponse {
    #[serde(default)]
    data: Vec<SkillRef>,
}

#[derive(Debug, Deserialize)]
struct SkillRef {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SkillDetailResponse {
    data: Option<SkillDetail>,
}

#[derive(Debug, Deserialize, Default)]
struct SkillDetail {
    importance: Option<u32>,
    growth: Option<i32>,
    #[serde(rename = "relatedSkills", default)]
    related_skills: Vec<SkillRef>,
}

pub struct LaborMarketClient {
    http: reqwest::Client,
    client_id: Option<String>,
    client_secret: Option<String>,
    token: Mutex<Option<TokenCache>>,
}

impl LaborMarketClient {
    pub fn new(
        http: reqwest::Client,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            http,
            client_id,
            client_secret,
            token: Mutex::new(None),
        }
    }

    fn configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    async fn access_token(&self) -> Result<String> {
        let mut cache = self.token.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.is_valid() {
                return Ok(cached.token.clone());
            }
        }

        let (Some(client_id), Some(client_secret)) =
            (self.client_id.as_deref(), self.client_secret.as_deref())
        else {
            bail!("LIGHTCAST_CLIENT_ID and LIGHTCAST_CLIENT_SECRET are not configured");
        };

        let response = self
            .http
            .post(AUTH_URL)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "client_credentials"),
                ("scope", "emsi_open"),
            ])
            .send()
            .await
            .context("Lightcast auth request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Lightcast authentication failed: {status}");
        }

        let body: TokenResponse = response
            .json()
            .await
            .context("Lightcast auth returned a malformed payload")?;

        let ttl = Duration::from_secs(body.expires_in).saturating_sub(TOKEN_EXPIRY_BUFFER);
        *cache = Some(TokenCache {
            token: body.access_token.clone(),
            expires_at: Instant::now() + ttl,
        });
        Ok(body.access_token)
    }

    /// Looks up demand data for each skill. Never fails as a whole: a skill
    /// whose lookup errors gets the static estimate, and with no credentials
    /// the entire result set is estimated.
    pub async fn skill_demand(&self, skill_names: &[String]) -> Vec<SkillDemand> {
        if !self.configured() {
            debug!("labor market API not configured; using estimated demand data");
            return skill_names.iter().map(|s| estimated_demand(s)).collect();
        }

        let mut results = Vec::with_capacity(skill_names.len());
        for skill_name in skill_names {
            match self.lookup_skill(skill_name).await {
                Ok(Some(demand)) => results.push(demand),
                Ok(None) => {
                    debug!(skill = %skill_name, "skill not found; using estimate");
                    results.push(estimated_demand(skill_name));
                }
                Err(e) => {
                    warn!(skill = %skill_name, error = %e, "skill lookup failed; using estimate");
                    results.push(estimated_demand(skill_name));
                }
            }
        }
        results
    }

    async fn lookup_skill(&self, skill_name: &str) -> Result<Option<SkillDemand>> {
        let token = self.access_token().await?;

        let search: SkillSearchResponse = self
            .http
            .get(format!("{API_URL}/skills/versions/latest/skills"))
            .query(&[("q", skill_name), ("limit", "1")])
            .bearer_auth(&token)
            .send()
            .await
            .context("skill search request failed")?
            .error_for_status()
            .context("skill search rejected")?
            .json()
            .await
            .context("skill search returned a malformed payload")?;

        let Some(skill) = search.data.into_iter().next() else {
            return Ok(None);
        };

        let detail: SkillDetailResponse = self
            .http
            .get(format!("{API_URL}/skills/versions/latest/skills/{}", skill.id))
            .bearer_auth(&token)
            .send()
            .await
            .context("skill detail request failed")?
            .error_for_status()
            .context("skill detail rejected")?
            .json()
            .await
            .context("skill detail returned a malformed payload")?;

        let detail = detail.data.unwrap_or_default();
        Ok(Some(SkillDemand {
            skill_name: skill.name,
            demand_score: detail.importance.unwrap_or(DEFAULT_DEMAND_SCORE),
            growth_rate: detail.growth.unwrap_or(0),
            job_postings: None,
            related_skills: detail.related_skills.into_iter().map(|s| s.name).collect(),
        }))
    }
}

// ── Static estimation tables ────────────────────────────────────────────────

const HIGH_DEMAND: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "react",
    "aws",
    "kubernetes",
    "docker",
    "machine learning",
    "ai",
    "data science",
    "cloud",
    "devops",
    "node.js",
    "sql",
    "java",
    "go",
    "rust",
    "terraform",
    "azure",
    "gcp",
];

const MEDIUM_DEMAND: &[&str] = &[
    "angular",
    "vue",
    "ruby",
    "php",
    "c++",
    "c#",
    ".net",
    "mongodb",
    "postgresql",
    "redis",
    "graphql",
    "rest api",
    "microservices",
    "agile",
    "scrum",
];

const HIGH_GROWTH: &[&str] = &["ai", "machine learning", "rust", "kubernetes", "typescript", "go"];
const DECLINING: &[&str] = &["jquery", "perl", "cobol", "flash"];

fn estimated_demand(skill_name: &str) -> SkillDemand {
    let normalized = skill_name.to_lowercase();

    let demand_score = if HIGH_DEMAND.iter().any(|s| normalized.contains(s)) {
        80
    } else if MEDIUM_DEMAND.iter().any(|s| normalized.contains(s)) {
        60
    } else {
        DEFAULT_DEMAND_SCORE
    };

    let growth_rate = if HIGH_GROWTH.iter().any(|s| normalized.contains(s)) {
        25
    } else if DECLINING.iter().any(|s| normalized.contains(s)) {
        -10
    } else {
        DEFAULT_GROWTH_RATE
    };

    SkillDemand {
        skill_name: skill_name.to_string(),
        demand_score,
        growth_rate,
        job_postings: None,
        related_skills: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_demand_tiers() {
        assert_eq!(estimated_demand("Rust").demand_score, 80);
        assert_eq!(estimated_demand("GraphQL").demand_score, 60);
        assert_eq!(estimated_demand("Underwater basket weaving").demand_score, 50);
    }

    #[test]
    fn test_estimated_growth_signs() {
        assert_eq!(estimated_demand("Kubernetes").growth_rate, 25);
        assert_eq!(estimated_demand("jQuery").growth_rate, -10);
        assert_eq!(estimated_demand("Excel").growth_rate, 5);
    }

    #[test]
    fn test_token_cache_validity_window() {
        let valid = TokenCache {
            token: "t".to_string(),
            expires_at: Instant::now() + Duration::from_secs(60),
        };
        assert!(valid.is_valid());

        let expired = TokenCache {
            token: "t".to_string(),
            expires_at: Instant::now() - Duration::from_secs(1),
        };
        assert!(!expired.is_valid());
    }

    #[tokio::test]
    async fn test_unconfigured_client_estimates_every_skill() {
        let client = LaborMarketClient::new(reqwest::Client::new(), None, None);
        let skills = vec!["Python".to_string(), "Crochet".to_string()];
        let demands = client.skill_demand(&skills).await;
        assert_eq!(demands.len(), 2);
        assert_eq!(demands[0].demand_score, 80);
        assert_eq!(demands[1].demand_score, 50);
    }
}
