//! Five-stage analysis pipeline behind the streaming endpoint.
//!
//! Stage fatality is graduated: text extraction (1), resume parsing (2), and
//! narrative synthesis (5) abort the stream on failure; deep search with
//! LinkedIn verification (3) and the skill-demand lookup (4) are best-effort
//! and degrade to empty results.

use bytes::Bytes;
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};

use crate::analyze::progress::{AnalysisPayload, ProgressEvent};
use crate::analyze::{narrative, resume_parser};
use crate::errors::AppError;
use crate::models::market::SkillDemand;
use crate::models::profile::{LinkedInProfile, WebPresenceResult};
use crate::models::resume::ParsedResume;
use crate::search::results::{Category, DeepSearchResults};
use crate::search::{self, SearchContext};
use crate::state::AppState;
use crate::verify;

const MAX_SKILLS_FOR_DEMAND: usize = 10;
const TOP_NEWS_IN_PRESENCE: usize = 5;

/// Runs the whole pipeline, emitting progress over `tx`. A closed receiver
/// (client disconnect) simply stops event delivery; the send errors are
/// ignored because there is no one left to inform.
pub async fn run(state: AppState, file: Bytes, filename: String, tx: Sender<ProgressEvent>) {
    if let Err(e) = run_inner(&state, file, &filename, &tx).await {
        warn!(error = %e, "analysis pipeline aborted");
        let _ = tx.send(ProgressEvent::error(e.to_string())).await;
    }
}

async fn run_inner(
    state: &AppState,
    file: Bytes,
    filename: &str,
    tx: &Sender<ProgressEvent>,
) -> Result<(), AppError> {
    // Stage 1: text extraction (fatal).
    send(
        tx,
        ProgressEvent::progress_with_detail(
            1,
            "Extracting text from resume...",
            "Parsing your document".to_string(),
        ),
    )
    .await;
    let raw_text = state
        .pdf
        .extract_text(file, filename)
        .await
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    if raw_text.trim().is_empty() {
        return Err(AppError::Pdf("extracted text was empty".to_string()));
    }

    // Stage 2: resume parsing (fatal).
    send(
        tx,
        ProgressEvent::progress_with_detail(
            2,
            "Analyzing resume content...",
            "AI is identifying your skills, experience, and education".to_string(),
        ),
    )
    .await;
    let resume = resume_parser::parse_resume(&state.llm, &raw_text).await?;
    send(
        tx,
        ProgressEvent::progress_with_detail(
            2,
            "Resume parsed successfully",
            format!(
                "Found {} skills and {} work experiences",
                resume.skills.len(),
                resume.experience.len()
            ),
        ),
    )
    .await;

    // Stage 3: deep web search + LinkedIn verification (best-effort).
    send(
        tx,
        ProgressEvent::progress_with_detail(
            3,
            "Performing deep web search...",
            "Searching for profiles, news, publications, speaking engagements, patents, and more"
                .to_string(),
        ),
    )
    .await;
    let (deep_search, web_presence, linkedin) = search_stage(state, &resume, tx).await;

    // Stage 4: skill demand (best-effort; unconfigured credentials degrade
    // inside the client).
    send(
        tx,
        ProgressEvent::progress_with_detail(
            4,
            "Analyzing labor market data...",
            "Evaluating demand for your skills".to_string(),
        ),
    )
    .await;
    let skill_names: Vec<String> = resume
        .skills
        .iter()
        .take(MAX_SKILLS_FOR_DEMAND)
        .map(|s| s.name.clone())
        .collect();
    let skill_demand: Vec<SkillDemand> = state.market.skill_demand(&skill_names).await;
    send(
        tx,
        ProgressEvent::progress_with_detail(
            4,
            "Market analysis complete",
            format!("Analyzed {} skills", skill_demand.len()),
        ),
    )
    .await;

    // Stage 5: narrative synthesis (fatal).
    send(
        tx,
        ProgressEvent::progress_with_detail(
            5,
            "Generating comprehensive analysis...",
            "AI is analyzing your profile with deep web search data".to_string(),
        ),
    )
    .await;
    let summary = search::summarize_for_analysis(&deep_search);
    let analysis = narrative::analyze_profile(
        &state.llm,
        &resume,
        &web_presence,
        linkedin.as_ref(),
        &skill_demand,
        &summary,
    )
    .await?;
    send(
        tx,
        ProgressEvent::progress_with_detail(
            5,
            "Analysis complete!",
            "Your comprehensive profile report is ready".to_string(),
        ),
    )
    .await;

    info!("analysis pipeline complete");
    send(
        tx,
        ProgressEvent::result(AnalysisPayload {
            resume,
            web_presence,
            linked_in_profile: linkedin,
            skill_demand,
            deep_search,
            analysis,
        }),
    )
    .await;
    Ok(())
}

/// Stage 3 body. Never fails: whatever could not be found stays empty.
async fn search_stage(
    state: &AppState,
    resume: &ParsedResume,
    tx: &Sender<ProgressEvent>,
) -> (
    DeepSearchResults,
    Vec<WebPresenceResult>,
    Option<LinkedInProfile>,
) {
    let Some(name) = resume.full_name.as_deref().filter(|n| !n.trim().is_empty()) else {
        warn!("resume has no name; skipping web search");
        return (DeepSearchResults::default(), Vec::new(), None);
    };

    let context = SearchContext {
        company: resume.experience.first().map(|e| e.company.clone()),
        title: resume.experience.first().map(|e| e.title.clone()),
        location: resume.location.clone(),
        email: resume.email.clone(),
        skills: resume
            .skills
            .iter()
            .take(MAX_SKILLS_FOR_DEMAND)
            .map(|s| s.name.clone())
            .collect(),
        industry: None,
    };

    let deep_search = search::deep_search(state.search.as_ref(), name, &context).await;

    if deep_search.searches_performed == 0 {
        send(
            tx,
            ProgressEvent::progress_with_detail(
                3,
                "Web search unavailable",
                "Search API unavailable - skipping web presence discovery".to_string(),
            ),
        )
        .await;
    } else {
        send(
            tx,
            ProgressEvent::progress_with_detail(
                3,
                "Deep search complete",
                format!(
                    "Found {} results across {} searches",
                    deep_search.total_results, deep_search.searches_performed
                ),
            ),
        )
        .await;
    }

    let web_presence = flatten_web_presence(&deep_search);

    let candidates = verify::linkedin_candidates(&deep_search);
    let linkedin = if candidates.is_empty() && resume.email.is_none() {
        None
    } else {
        send(
            tx,
            ProgressEvent::progress_with_detail(
                3,
                "Enriching LinkedIn profile...",
                "Fetching detailed profile data".to_string(),
            ),
        )
        .await;
        verify::verify_linkedin(state.linkedin.as_ref(), &candidates, resume).await
    };

    (deep_search, web_presence, linkedin)
}

/// Flattens the categorized buckets into the legacy presence list: all
/// profiles, the top news items, then a capped slice of each notable
/// category with the category baked into the platform label.
fn flatten_web_presence(results: &DeepSearchResults) -> Vec<WebPresenceResult> {
    let mut presence: Vec<WebPresenceResult> = results
        .profiles
        .iter()
        .map(|p| WebPresenceResult {
            platform: p.platform.clone(),
            url: p.url.clone(),
            title: Some(p.title.clone()),
            description: Some(p.snippet.clone()),
        })
        .collect();

    for news in results.news.iter().take(TOP_NEWS_IN_PRESENCE) {
        presence.push(WebPresenceResult {
            platform: format!("news:{}", news.platform),
            url: news.url.clone(),
            title: Some(news.title.clone()),
            description: Some(news.snippet.clone()),
        });
    }

    let notable: [(Category, usize); 7] = [
        (Category::Publication, 3),
        (Category::Speaking, 3),
        (Category::Award, 2),
        (Category::Press, 3),
        (Category::Patent, 2),
        (Category::Video, 2),
        (Category::Opensource, 3),
    ];
    for (category, limit) in notable {
        for item in results.bucket(category).iter().take(limit) {
            presence.push(WebPresenceResult {
                platform: format!("{}:{}", category.label(), item.platform),
                url: item.url.clone(),
                title: Some(item.title.clone()),
                description: Some(item.snippet.clone()),
            });
        }
    }

    presence
}

async fn send(tx: &Sender<ProgressEvent>, event: ProgressEvent) {
    let _ = tx.send(event).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::results::test_support::make_result;

    #[test]
    fn test_flatten_includes_all_profiles_and_capped_news() {
        let mut results = DeepSearchResults::default();
        for i in 0..3 {
            results.push(make_result(
                &format!("https://linkedin.com/in/p{i}"),
                Category::Profile,
                80,
            ));
        }
        for i in 0..8 {
            results.push(make_result(
                &format!("https://news.example.com/{i}"),
                Category::News,
                60,
            ));
        }
        let presence = flatten_web_presence(&results);
        assert_eq!(presence.len(), 3 + TOP_NEWS_IN_PRESENCE);
        assert!(presence[3].platform.starts_with("news:"));
    }

    #[test]
    fn test_flatten_labels_notable_categories() {
        let mut results = DeepSearchResults::default();
        results.push(make_result(
            "https://patents.google.com/patent/US1",
            Category::Patent,
            70,
        ));
        results.push(make_result(
            "https://arxiv.org/abs/1",
            Category::Publication,
            70,
        ));
        let presence = flatten_web_presence(&results);
        let platforms: Vec<&str> = presence.iter().map(|p| p.platform.as_str()).collect();
        assert!(platforms.iter().any(|p| p.starts_with("publication:")));
        assert!(platforms.iter().any(|p| p.starts_with("patent:")));
    }

    #[test]
    fn test_flatten_empty_results_is_empty() {
        let results = DeepSearchResults::default();
        assert!(flatten_web_presence(&results).is_empty());
    }
}
