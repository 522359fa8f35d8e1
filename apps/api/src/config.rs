use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Only the keys for the two fatal pipeline stages (PDF extraction and LLM
/// calls) are required at startup. Search, LinkedIn, labor-market, and job
/// board credentials are optional: when absent, the corresponding stage
/// degrades to an empty result instead of failing the request.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub pdfco_api_key: String,
    pub serpapi_api_key: Option<String>,
    pub rapidapi_key: Option<String>,
    pub lightcast_client_id: Option<String>,
    pub lightcast_client_secret: Option<String>,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            pdfco_api_key: require_env("PDFCO_API_KEY")?,
            serpapi_api_key: optional_env("SERPAPI_API_KEY"),
            rapidapi_key: optional_env("RAPIDAPI_KEY"),
            lightcast_client_id: optional_env("LIGHTCAST_CLIENT_ID"),
            lightcast_client_secret: optional_env("LIGHTCAST_CLIENT_SECRET"),
            adzuna_app_id: optional_env("ADZUNA_APP_ID"),
            adzuna_app_key: optional_env("ADZUNA_APP_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
