//! LinkedIn enrichment collaborator.
//!
//! Backed by the RapidAPI "Fresh LinkedIn Profile Data" service. Profile and
//! recent-post fetches run in parallel; a post fetch that fails degrades to an
//! empty post list rather than failing the profile.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::profile::{LinkedInPost, LinkedInProfile};
use crate::models::resume::{Education, WorkExperience};

const RAPIDAPI_HOST: &str = "fresh-linkedin-profile-data.p.rapidapi.com";
const MAX_POSTS: usize = 10;

/// External LinkedIn-data collaborator. `fetch_profile` errors are treated by
/// the verifier as "skip this candidate", never as request failures.
#[async_trait]
pub trait LinkedInClient: Send + Sync {
    async fn fetch_profile(&self, url: &str) -> Result<LinkedInProfile>;

    /// Reverse lookup from an email address to a profile URL. Returns
    /// `Ok(None)` when the backing service has no such capability.
    async fn lookup_by_email(&self, email: &str) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize, Default)]
struct RapidApiExperience {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    description: Option<String>,
    #[serde(default)]
    is_current: bool,
    start_year: Option<Value>,
    end_year: Option<Value>,
}

#[derive(Debug, Deserialize, Default)]
struct RapidApiEducation {
    school: Option<String>,
    degree: Option<String>,
    field_of_study: Option<String>,
    start_year: Option<Value>,
    end_year: Option<Value>,
}

#[derive(Debug, Deserialize, Default)]
struct RapidApiProfile {
    first_name: Option<String>,
    last_name: Option<String>,
    full_name: Option<String>,
    headline: Option<String>,
    about: Option<String>,
    city: Option<String>,
    country: Option<String>,
    company_industry: Option<String>,
    connection_count: Option<u32>,
    profile_image_url: Option<String>,
    #[serde(default)]
    experiences: Vec<RapidApiExperience>,
    #[serde(default)]
    educations: Vec<RapidApiEducation>,
    #[serde(default)]
    skills: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RapidApiPost {
    text: Option<String>,
    post_url: Option<String>,
    posted: Option<String>,
    time: Option<String>,
    num_reactions: Option<u32>,
    num_comments: Option<u32>,
    num_reposts: Option<u32>,
}

fn year_string(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// RapidAPI-backed implementation.
pub struct RapidApiLinkedInClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl RapidApiLinkedInClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .context("RAPIDAPI_KEY is not configured")
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let api_key = self.api_key()?;
        let response = self
            .http
            .get(format!("https://{RAPIDAPI_HOST}{path}"))
            .query(params)
            .header("x-rapidapi-host", RAPIDAPI_HOST)
            .header("x-rapidapi-key", api_key)
            .send()
            .await
            .with_context(|| format!("RapidAPI request to {path} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("RapidAPI request to {path} failed: {status} - {body}");
        }

        response
            .json()
            .await
            .with_context(|| format!("RapidAPI {path} returned a malformed payload"))
    }

    async fn fetch_profile_data(&self, url: &str) -> Result<RapidApiProfile> {
        debug!(url, "fetching LinkedIn profile data");
        let raw = self
            .get("/enrich-lead", &[("linkedin_url", url), ("include_skills", "true")])
            .await?;

        // The service wraps the payload in `data` on some plans and returns
        // it bare on others.
        let body = raw.get("data").cloned().unwrap_or(raw);
        let profile: RapidApiProfile =
            serde_json::from_value(body).context("unexpected profile payload shape")?;
        debug!(
            url,
            name = profile.full_name.as_deref().unwrap_or("unknown"),
            "profile data received"
        );
        Ok(profile)
    }

    async fn fetch_profile_posts(&self, url: &str) -> Vec<LinkedInPost> {
        let raw = match self
            .get("/get-profile-posts", &[("linkedin_url", url), ("type", "posts")])
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(url, error = %e, "post fetch failed; continuing without posts");
                return Vec::new();
            }
        };

        let posts: Vec<RapidApiPost> = raw
            .get("data")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        posts
            .into_iter()
            .take(MAX_POSTS)
            .map(|post| LinkedInPost {
                text: post.text.unwrap_or_default(),
                post_url: post.post_url.unwrap_or_default(),
                posted_at: post.posted.unwrap_or_default(),
                time_ago: post.time.unwrap_or_default(),
                num_reactions: post.num_reactions.unwrap_or(0),
                num_comments: post.num_comments.unwrap_or(0),
                num_reposts: post.num_reposts.unwrap_or(0),
                ..Default::default()
            })
            .collect()
    }
}

#[async_trait]
impl LinkedInClient for RapidApiLinkedInClient {
    async fn fetch_profile(&self, url: &str) -> Result<LinkedInProfile> {
        let (profile, posts) =
            tokio::join!(self.fetch_profile_data(url), self.fetch_profile_posts(url));
        let data = profile?;

        let full_name = data.full_name.clone().or_else(|| {
            let joined = format!(
                "{} {}",
                data.first_name.as_deref().unwrap_or(""),
                data.last_name.as_deref().unwrap_or("")
            )
            .trim()
            .to_string();
            (!joined.is_empty()).then_some(joined)
        });

        let location = {
            let joined = [data.city.as_deref(), data.country.as_deref()]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        };

        Ok(LinkedInProfile {
            url: url.to_string(),
            full_name,
            headline: data.headline,
            summary: data.about,
            location,
            industry: data.company_industry,
            connections: data.connection_count,
            experience: data
                .experiences
                .into_iter()
                .map(|exp| WorkExperience {
                    company: exp.company.unwrap_or_else(|| "Unknown".to_string()),
                    title: exp.title.unwrap_or_else(|| "Unknown".to_string()),
                    location: exp.location,
                    start_date: year_string(&exp.start_year),
                    end_date: if exp.is_current {
                        None
                    } else {
                        year_string(&exp.end_year)
                    },
                    current: Some(exp.is_current),
                    description: exp.description,
                    highlights: Vec::new(),
                })
                .collect(),
            education: data
                .educations
                .into_iter()
                .map(|edu| Education {
                    institution: edu.school.unwrap_or_else(|| "Unknown".to_string()),
                    degree: edu.degree,
                    field: edu.field_of_study,
                    start_date: year_string(&edu.start_year),
                    end_date: year_string(&edu.end_year),
                    ..Default::default()
                })
                .collect(),
            skills: data.skills,
            profile_picture: data.profile_image_url,
            recent_posts: posts,
        })
    }

    async fn lookup_by_email(&self, _email: &str) -> Result<Option<String>> {
        // The profile-data plan has no email resolution endpoint.
        Ok(None)
    }
}
