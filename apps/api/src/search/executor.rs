//! Runs one query against the search collaborator and maps raw hits into
//! cataloged results. Callers in the fan-out treat an `Err` here as an empty
//! result set: a failed query degrades the aggregate, it never aborts it.

use anyhow::Result;

use crate::search::categorize::categorize;
use crate::search::platform::identify_platform;
use crate::search::provider::{SearchHit, SearchProvider};
use crate::search::relevance::relevance_score;
use crate::search::results::{CatalogedSearchResult, Category};

/// Executes one web search. When `forced` is `None` each hit is categorized
/// by the rule table; otherwise every hit is tagged with the forced category.
pub async fn run_query(
    provider: &dyn SearchProvider,
    query: &str,
    forced: Option<Category>,
    subject: &str,
    max_results: usize,
) -> Result<Vec<CatalogedSearchResult>> {
    let hits = provider.search_web(query, max_results).await?;
    Ok(hits
        .into_iter()
        .map(|hit| catalog(hit, forced, subject, query))
        .collect())
}

/// Executes the dedicated news search. News hits are always tagged `news`
/// regardless of what the rule table would say.
pub async fn run_news_query(
    provider: &dyn SearchProvider,
    query: &str,
    subject: &str,
    max_results: usize,
) -> Result<Vec<CatalogedSearchResult>> {
    let hits = provider.search_news(query).await?;
    Ok(hits
        .into_iter()
        .take(max_results)
        .map(|hit| catalog(hit, Some(Category::News), subject, query))
        .collect())
}

fn catalog(
    hit: SearchHit,
    forced: Option<Category>,
    subject: &str,
    query: &str,
) -> CatalogedSearchResult {
    let category = forced.unwrap_or_else(|| categorize(&hit));
    let platform = identify_platform(&hit.link);
    let relevance = relevance_score(&hit, subject);
    CatalogedSearchResult {
        category,
        platform,
        url: hit.link,
        title: hit.title,
        snippet: hit.snippet,
        date: hit.date,
        source: hit.source,
        relevance_score: relevance,
        search_query: query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;

    struct FixedProvider {
        hits: Vec<SearchHit>,
        fail: bool,
    }

    #[async_trait]
    impl SearchProvider for FixedProvider {
        async fn search_web(&self, _query: &str, _max: usize) -> Result<Vec<SearchHit>> {
            if self.fail {
                bail!("simulated 401");
            }
            Ok(self.hits.clone())
        }

        async fn search_news(&self, _query: &str) -> Result<Vec<SearchHit>> {
            if self.fail {
                bail!("simulated 401");
            }
            Ok(self.hits.clone())
        }
    }

    fn hit(url: &str, title: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            link: url.to_string(),
            snippet: String::new(),
            date: None,
            source: None,
        }
    }

    #[tokio::test]
    async fn test_run_query_categorizes_and_tags() {
        let provider = FixedProvider {
            hits: vec![hit("https://linkedin.com/in/jane-doe", "Jane Doe")],
            fail: false,
        };
        let results = run_query(&provider, "\"Jane Doe\"", None, "Jane Doe", 10)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, Category::Profile);
        assert_eq!(results[0].platform, "linkedin");
        assert_eq!(results[0].search_query, "\"Jane Doe\"");
        assert!(results[0].relevance_score >= 80);
    }

    #[tokio::test]
    async fn test_run_news_query_forces_news_category() {
        let provider = FixedProvider {
            // A URL the rule table would call a profile.
            hits: vec![hit("https://medium.com/@jane/post", "Jane Doe on testing")],
            fail: false,
        };
        let results = run_news_query(&provider, "\"Jane Doe\"", "Jane Doe", 10)
            .await
            .unwrap();
        assert_eq!(results[0].category, Category::News);
    }

    #[tokio::test]
    async fn test_run_news_query_respects_max_results() {
        let provider = FixedProvider {
            hits: (0..20)
                .map(|i| hit(&format!("https://news.example.com/{i}"), "story"))
                .collect(),
            fail: false,
        };
        let results = run_news_query(&provider, "q", "Jane Doe", 10).await.unwrap();
        assert_eq!(results.len(), 10);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates_to_caller() {
        let provider = FixedProvider {
            hits: vec![],
            fail: true,
        };
        assert!(run_query(&provider, "q", None, "Jane Doe", 10).await.is_err());
    }
}
