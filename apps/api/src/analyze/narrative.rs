//! Final narrative synthesis: every earlier stage's output goes into one
//! structured LLM call that produces the full `ProfileAnalysis`.

use crate::errors::AppError;
use crate::llm_client::{prompts, LlmClient};
use crate::models::analysis::ProfileAnalysis;
use crate::models::market::SkillDemand;
use crate::models::profile::{LinkedInProfile, WebPresenceResult};
use crate::models::resume::ParsedResume;

pub async fn analyze_profile(
    llm: &LlmClient,
    resume: &ParsedResume,
    web_presence: &[WebPresenceResult],
    linkedin: Option<&LinkedInProfile>,
    skill_demand: &[SkillDemand],
    deep_search_summary: &str,
) -> Result<ProfileAnalysis, AppError> {
    let resume_json = serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(e.into()))?;
    let web_presence_json = serde_json::to_string_pretty(web_presence)
        .map_err(|e| AppError::Internal(e.into()))?;
    let linkedin_json = match linkedin {
        Some(profile) => {
            serde_json::to_string_pretty(profile).map_err(|e| AppError::Internal(e.into()))?
        }
        None => "Not found".to_string(),
    };
    let skill_demand_json = serde_json::to_string_pretty(skill_demand)
        .map_err(|e| AppError::Internal(e.into()))?;

    let summary = if deep_search_summary.is_empty() {
        "No deep search performed."
    } else {
        deep_search_summary
    };

    let prompt = prompts::analysis_prompt(
        &resume_json,
        &web_presence_json,
        &linkedin_json,
        &skill_demand_json,
        summary,
    );

    llm.call_json(&prompt, prompts::ANALYSIS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("profile analysis failed: {e}")))
}
