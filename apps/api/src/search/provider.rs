//! Web-search collaborator interface and the SerpAPI implementation.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const SERPAPI_URL: &str = "https://serpapi.com/search";

/// One raw hit from the search collaborator, before categorization.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub date: Option<String>,
    pub source: Option<String>,
}

/// External search collaborator. Failures surface as errors; callers in the
/// deep-search fan-out treat them as non-fatal.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_web(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
    async fn search_news(&self, query: &str) -> Result<Vec<SearchHit>>;
}

#[derive(Debug, Deserialize)]
struct SerpApiOrganicResult {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
    date: Option<String>,
    displayed_link: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiNewsResult {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
    date: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SerpApiOrganicResult>,
    #[serde(default)]
    news_results: Vec<SerpApiNewsResult>,
    error: Option<String>,
}

/// Google / Google News search via SerpAPI.
pub struct SerpApiClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .context("SERPAPI_API_KEY is not configured")
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<SerpApiResponse> {
        let response = self
            .http
            .get(SERPAPI_URL)
            .query(params)
            .send()
            .await
            .context("SerpAPI request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("SerpAPI request failed: {status} - {body}");
        }

        let data: SerpApiResponse = response
            .json()
            .await
            .context("SerpAPI returned a malformed payload")?;

        if let Some(error) = data.error {
            bail!("SerpAPI error: {error}");
        }

        Ok(data)
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search_web(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let api_key = self.api_key()?;
        let num = max_results.to_string();

        debug!(query, max_results, "SerpAPI web search");
        let data = self
            .fetch(&[
                ("api_key", api_key),
                ("q", query),
                ("engine", "google"),
                ("num", &num),
                ("gl", "us"),
                ("hl", "en"),
            ])
            .await?;

        debug!(
            query,
            count = data.organic_results.len(),
            "SerpAPI web search returned"
        );
        Ok(data
            .organic_results
            .into_iter()
            .map(|r| SearchHit {
                title: r.title,
                link: r.link,
                snippet: r.snippet,
                date: r.date,
                source: r.displayed_link.or(r.source),
            })
            .collect())
    }

    async fn search_news(&self, query: &str) -> Result<Vec<SearchHit>> {
        let api_key = self.api_key()?;

        debug!(query, "SerpAPI news search");
        let data = self
            .fetch(&[
                ("api_key", api_key),
                ("q", query),
                ("engine", "google_news"),
                ("gl", "us"),
                ("hl", "en"),
            ])
            .await?;

        debug!(
            query,
            count = data.news_results.len(),
            "SerpAPI news search returned"
        );
        Ok(data
            .news_results
            .into_iter()
            .map(|r| SearchHit {
                title: r.title,
                link: r.link,
                snippet: r.snippet,
                date: r.date,
                source: r.source,
            })
            .collect())
    }
}
