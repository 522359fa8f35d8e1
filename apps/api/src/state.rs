use std::sync::Arc;

use crate::clients::adzuna::AdzunaClient;
use crate::clients::linkedin::{LinkedInClient, RapidApiLinkedInClient};
use crate::clients::market::LaborMarketClient;
use crate::clients::pdfco::PdfcoClient;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::search::provider::{SearchProvider, SerpApiClient};

/// Shared application state, cloned per request.
///
/// The search and LinkedIn collaborators sit behind trait objects so the
/// pipeline and its tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: LlmClient,
    pub search: Arc<dyn SearchProvider>,
    pub linkedin: Arc<dyn LinkedInClient>,
    pub pdf: Arc<PdfcoClient>,
    pub market: Arc<LaborMarketClient>,
    pub jobs: Arc<AdzunaClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let llm = LlmClient::new(config.anthropic_api_key.clone());
        let search = Arc::new(SerpApiClient::new(
            http.clone(),
            config.serpapi_api_key.clone(),
        ));
        let linkedin = Arc::new(RapidApiLinkedInClient::new(
            http.clone(),
            config.rapidapi_key.clone(),
        ));
        let pdf = Arc::new(PdfcoClient::new(http.clone(), config.pdfco_api_key.clone()));
        let market = Arc::new(LaborMarketClient::new(
            http.clone(),
            config.lightcast_client_id.clone(),
            config.lightcast_client_secret.clone(),
        ));
        let jobs = Arc::new(AdzunaClient::new(
            http,
            config.adzuna_app_id.clone(),
            config.adzuna_app_key.clone(),
        ));

        Self {
            config: Arc::new(config),
            llm,
            search,
            linkedin,
            pdf,
            market,
            jobs,
        }
    }
}
