//! LLM-backed resume parsing.

use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::{prompts, LlmClient};
use crate::models::resume::ParsedResume;

/// Parses raw resume text into structured data. `raw_text` is carried into
/// the result verbatim so downstream stages can re-inspect the source.
pub async fn parse_resume(llm: &LlmClient, raw_text: &str) -> Result<ParsedResume, AppError> {
    let prompt = prompts::resume_parse_prompt(raw_text);
    let mut parsed: ParsedResume = llm
        .call_json(&prompt, prompts::RESUME_PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("resume parsing failed: {e}")))?;

    parsed.raw_text = raw_text.to_string();
    debug!(
        name = parsed.full_name.as_deref().unwrap_or("unknown"),
        roles = parsed.experience.len(),
        skills = parsed.skills.len(),
        "resume parsed"
    );
    Ok(parsed)
}
