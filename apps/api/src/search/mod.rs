//! Deep web search: multi-query aggregation, URL deduplication, category
//! bucketing, and visibility scoring for a named person.

pub mod categorize;
pub mod executor;
pub mod platform;
pub mod provider;
pub mod relevance;
pub mod results;

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::search::provider::SearchProvider;
use crate::search::results::{Category, DeepSearchResults};

/// Resume-derived context used to shape the query set. Only company, title,
/// and location feed into queries; the remaining fields ride along for the
/// downstream stages that share this context.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub skills: Vec<String>,
    pub industry: Option<String>,
}

const RESULTS_PER_QUERY: usize = 40;
const NEWS_RESULTS_CAP: usize = 10;

/// Runs the full deep search for `name`.
///
/// Every query executes independently and concurrently; a failed query is
/// logged and contributes nothing. If every call fails (bad credentials,
/// network down) the returned aggregate is valid and empty with `minimal`
/// visibility — this function does not error.
///
/// `searches_performed` counts only calls that succeeded.
pub async fn deep_search(
    provider: &dyn SearchProvider,
    name: &str,
    context: &SearchContext,
) -> DeepSearchResults {
    let mut results = DeepSearchResults::default();
    if name.trim().is_empty() {
        results.recompute();
        return results;
    }

    let queries = build_queries(name, context);
    info!(name, query_count = queries.len(), "starting deep web search");

    let outcomes = join_all(queries.iter().map(|query| async move {
        (
            query.as_str(),
            executor::run_query(provider, query, None, name, RESULTS_PER_QUERY).await,
        )
    }))
    .await;

    let mut pooled = Vec::new();
    let mut searches_performed: u32 = 0;
    let mut failed: u32 = 0;
    for (query, outcome) in outcomes {
        match outcome {
            Ok(batch) => {
                searches_performed += 1;
                pooled.extend(batch);
            }
            Err(e) => {
                warn!(query, error = %e, "search query failed");
                failed += 1;
            }
        }
    }

    // Dedicated news search, force-tagged as news and deduplicated against
    // the web results below.
    let news_query = format!("\"{name}\"");
    match executor::run_news_query(provider, &news_query, name, NEWS_RESULTS_CAP).await {
        Ok(batch) => {
            searches_performed += 1;
            pooled.extend(batch);
        }
        Err(e) => {
            warn!(error = %e, "news search failed");
            failed += 1;
        }
    }

    if searches_performed == 0 && failed > 0 {
        error!(failed, "all deep-search queries failed; returning empty results");
    }

    // Global URL dedupe, first occurrence wins.
    let mut seen: HashSet<String> = HashSet::new();
    for result in pooled {
        if seen.insert(result.url.clone()) {
            results.push(result);
        }
    }

    results.searches_performed = searches_performed;
    results.sort_buckets();
    results.recompute();

    info!(
        total = results.total_results,
        searches = results.searches_performed,
        visibility = ?results.summary.overall_visibility,
        "deep search complete"
    );
    results
}

/// Builds the query set: bare name, name + context, name variations, and
/// platform-targeted queries. Duplicates and degenerate queries are dropped.
fn build_queries(name: &str, context: &SearchContext) -> Vec<String> {
    let context_str = [
        context.company.as_deref(),
        context.title.as_deref(),
        context.location.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    let parts: Vec<&str> = name.split_whitespace().filter(|p| p.len() > 1).collect();
    let first = parts.first().copied().unwrap_or("");
    let last = parts.last().copied().unwrap_or("");

    let mut candidates = vec![
        format!("\"{name}\""),
        format!("\"{name}\" {context_str}").trim().to_string(),
        format!("\"{first} {last}\""),
    ];
    if let Some(company) = &context.company {
        candidates.push(format!("\"{name}\" \"{company}\""));
    }
    if let Some(title) = &context.title {
        candidates.push(format!("\"{name}\" {title}"));
    }
    candidates.push(format!("\"{name}\" site:linkedin.com"));
    candidates.push(format!("\"{name}\" site:twitter.com OR site:x.com"));

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|q| q.trim().len() > 3)
        .filter(|q| seen.insert(q.clone()))
        .collect()
}

/// Renders the aggregate as a text block for the narrative analysis prompt.
pub fn summarize_for_analysis(results: &DeepSearchResults) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push("## Web Presence Deep Search Results".to_string());
    sections.push(format!("Total results found: {}", results.total_results));
    sections.push(format!("Searches performed: {}", results.searches_performed));
    sections.push(format!(
        "Overall visibility: {}",
        serde_json::to_string(&results.summary.overall_visibility)
            .unwrap_or_default()
            .trim_matches('"')
            .to_uppercase()
    ));
    sections.push(String::new());

    if !results.profiles.is_empty() {
        sections.push(format!("### Professional Profiles ({})", results.profiles.len()));
        for p in results.profiles.iter().take(10) {
            sections.push(format!("- [{}] {}", p.platform, p.title));
            sections.push(format!("  URL: {}", p.url));
            sections.push(format!("  {}", truncate(&p.snippet, 200)));
        }
        sections.push(String::new());
    }

    if !results.news.is_empty() {
        sections.push(format!("### News Coverage ({})", results.news.len()));
        for n in results.news.iter().take(10) {
            sections.push(format!("- {}", n.title));
            sections.push(format!(
                "  Source: {} | Date: {}",
                n.source.as_deref().unwrap_or(&n.platform),
                n.date.as_deref().unwrap_or("Unknown")
            ));
            sections.push(format!("  {}", truncate(&n.snippet, 200)));
        }
        sections.push(String::new());
    }

    let generic_sections: [(&str, Category, usize); 7] = [
        ("Publications & Research", Category::Publication, 5),
        ("Speaking Engagements", Category::Speaking, 5),
        ("Patents", Category::Patent, 5),
        ("Awards & Recognition", Category::Award, 5),
        ("Press & Company News", Category::Press, 5),
        ("Video Content", Category::Video, 5),
        ("Open Source Contributions", Category::Opensource, 5),
    ];

    for (header, category, limit) in generic_sections {
        let bucket = results.bucket(category);
        if bucket.is_empty() {
            continue;
        }
        sections.push(format!("### {header} ({})", bucket.len()));
        for item in bucket.iter().take(limit) {
            sections.push(format!("- {}", item.title));
            sections.push(format!("  {}", truncate(&item.snippet, 200)));
        }
        sections.push(String::new());
    }

    sections.join("\n")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
