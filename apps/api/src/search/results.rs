//! Result containers for the deep web search: categories, buckets, and the
//! aggregate visibility summary.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Content category assigned to every search result. Exactly one per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Profile,
    News,
    Publication,
    Speaking,
    Patent,
    Award,
    Podcast,
    Video,
    Opensource,
    Press,
    Mention,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Profile,
        Category::News,
        Category::Publication,
        Category::Speaking,
        Category::Patent,
        Category::Award,
        Category::Podcast,
        Category::Video,
        Category::Opensource,
        Category::Press,
        Category::Mention,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Profile => "profile",
            Category::News => "news",
            Category::Publication => "publication",
            Category::Speaking => "speaking",
            Category::Patent => "patent",
            Category::Award => "award",
            Category::Podcast => "podcast",
            Category::Video => "video",
            Category::Opensource => "opensource",
            Category::Press => "press",
            Category::Mention => "mention",
        }
    }

    /// Weight used in the visibility score. Publications and patents count
    /// most, bare mentions least.
    fn weight(&self) -> u32 {
        match self {
            Category::Publication | Category::Patent => 5,
            Category::News | Category::Speaking => 4,
            Category::Profile | Category::Award | Category::Podcast | Category::Press => 3,
            Category::Video | Category::Opensource => 2,
            Category::Mention => 1,
        }
    }
}

/// Coarse four-level summary of how much public web presence was found.
/// Variant order matters: derived `Ord` ranks `Minimal < Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Minimal,
    Low,
    Medium,
    High,
}

/// A search hit after categorization, platform tagging, and relevance scoring.
/// Immutable once created; deduplicated globally by `url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogedSearchResult {
    pub category: Category,
    pub platform: String,
    pub url: String,
    pub title: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub relevance_score: u32,
    pub search_query: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSummary {
    #[serde(rename = "hasLinkedIn")]
    pub has_linkedin: bool,
    #[serde(rename = "hasGitHub")]
    pub has_github: bool,
    #[serde(rename = "hasTwitter")]
    pub has_twitter: bool,
    pub news_count: usize,
    pub publication_count: usize,
    pub speaking_count: usize,
    pub overall_visibility: Visibility,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Minimal
    }
}

/// Aggregate of all deep-search results, one ordered bucket per category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeepSearchResults {
    pub profiles: Vec<CatalogedSearchResult>,
    pub news: Vec<CatalogedSearchResult>,
    pub publications: Vec<CatalogedSearchResult>,
    pub speaking: Vec<CatalogedSearchResult>,
    pub patents: Vec<CatalogedSearchResult>,
    pub awards: Vec<CatalogedSearchResult>,
    pub podcasts: Vec<CatalogedSearchResult>,
    pub videos: Vec<CatalogedSearchResult>,
    pub opensource: Vec<CatalogedSearchResult>,
    pub press: Vec<CatalogedSearchResult>,
    pub mentions: Vec<CatalogedSearchResult>,
    pub total_results: usize,
    pub searches_performed: u32,
    pub summary: SearchSummary,
}

impl DeepSearchResults {
    pub fn bucket(&self, category: Category) -> &Vec<CatalogedSearchResult> {
        match category {
            Category::Profile => &self.profiles,
            Category::News => &self.news,
            Category::Publication => &self.publications,
            Category::Speaking => &self.speaking,
            Category::Patent => &self.patents,
            Category::Award => &self.awards,
            Category::Podcast => &self.podcasts,
            Category::Video => &self.videos,
            Category::Opensource => &self.opensource,
            Category::Press => &self.press,
            Category::Mention => &self.mentions,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<CatalogedSearchResult> {
        match category {
            Category::Profile => &mut self.profiles,
            Category::News => &mut self.news,
            Category::Publication => &mut self.publications,
            Category::Speaking => &mut self.speaking,
            Category::Patent => &mut self.patents,
            Category::Award => &mut self.awards,
            Category::Podcast => &mut self.podcasts,
            Category::Video => &mut self.videos,
            Category::Opensource => &mut self.opensource,
            Category::Press => &mut self.press,
            Category::Mention => &mut self.mentions,
        }
    }

    /// Routes a result into the bucket matching its category.
    pub fn push(&mut self, result: CatalogedSearchResult) {
        self.bucket_mut(result.category).push(result);
    }

    /// Sorts every bucket descending by relevance score.
    pub fn sort_buckets(&mut self) {
        for category in Category::ALL {
            self.bucket_mut(category)
                .sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        }
    }

    /// Recomputes `total_results` and the summary block from bucket contents.
    /// Call after all results have been routed.
    pub fn recompute(&mut self) {
        self.total_results = Category::ALL.iter().map(|c| self.bucket(*c).len()).sum();
        self.summary = SearchSummary {
            has_linkedin: self.profiles.iter().any(|p| p.platform == "linkedin"),
            has_github: self.profiles.iter().any(|p| p.platform == "github"),
            has_twitter: self.profiles.iter().any(|p| p.platform == "twitter"),
            news_count: self.news.len(),
            publication_count: self.publications.len(),
            speaking_count: self.speaking.len(),
            overall_visibility: self.visibility(),
        };
    }

    fn distinct_platforms(&self) -> usize {
        let mut platforms: HashSet<&str> = HashSet::new();
        for category in Category::ALL {
            for result in self.bucket(category) {
                platforms.insert(result.platform.as_str());
            }
        }
        platforms.len()
    }

    /// Maps weighted category counts plus distinct-platform spread onto a
    /// visibility tier. Adding a result can only raise the tier, never lower
    /// it: all weights are positive and all thresholds are lower bounds.
    pub fn visibility(&self) -> Visibility {
        let total: usize = Category::ALL.iter().map(|c| self.bucket(*c).len()).sum();
        let category_score: u32 = Category::ALL
            .iter()
            .map(|c| self.bucket(*c).len() as u32 * c.weight())
            .sum();
        let platform_count = self.distinct_platforms();

        if category_score >= 40 || platform_count >= 6 {
            Visibility::High
        } else if category_score >= 20 || platform_count >= 4 {
            Visibility::Medium
        } else if category_score >= 5 || platform_count >= 2 || total >= 3 {
            Visibility::Low
        } else {
            Visibility::Minimal
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::make_result;
    use super::*;

    #[test]
    fn test_total_results_equals_sum_of_buckets() {
        let mut results = DeepSearchResults::default();
        results.push(make_result("https://linkedin.com/in/a", Category::Profile, 80));
        results.push(make_result("https://news.example.com/1", Category::News, 70));
        results.push(make_result("https://arxiv.org/abs/1", Category::Publication, 60));
        results.recompute();
        assert_eq!(results.total_results, 3);
        assert_eq!(
            results.total_results,
            Category::ALL.iter().map(|c| results.bucket(*c).len()).sum::<usize>()
        );
    }

    #[test]
    fn test_buckets_sorted_descending_by_score() {
        let mut results = DeepSearchResults::default();
        results.push(make_result("https://a.com/1", Category::Mention, 40));
        results.push(make_result("https://b.com/2", Category::Mention, 90));
        results.push(make_result("https://c.com/3", Category::Mention, 65));
        results.sort_buckets();
        let scores: Vec<u32> = results.mentions.iter().map(|r| r.relevance_score).collect();
        assert_eq!(scores, vec![90, 65, 40]);
    }

    #[test]
    fn test_empty_results_are_minimal_visibility() {
        let mut results = DeepSearchResults::default();
        results.recompute();
        assert_eq!(results.summary.overall_visibility, Visibility::Minimal);
        assert_eq!(results.total_results, 0);
    }

    #[test]
    fn test_visibility_tier_ordering() {
        assert!(Visibility::Minimal < Visibility::Low);
        assert!(Visibility::Low < Visibility::Medium);
        assert!(Visibility::Medium < Visibility::High);
    }

    #[test]
    fn test_visibility_monotonic_under_added_publication() {
        // Adding one publication must never lower the tier, whatever the
        // starting set looks like.
        let mut base = DeepSearchResults::default();
        for i in 0..50 {
            let before = base.visibility();
            let mut extended = base.clone();
            extended.push(make_result(
                &format!("https://arxiv.org/abs/{i}"),
                Category::Publication,
                60,
            ));
            assert!(extended.visibility() >= before, "tier dropped at step {i}");
            base = extended;
        }
    }

    #[test]
    fn test_summary_platform_presence_flags() {
        let mut results = DeepSearchResults::default();
        results.push(make_result(
            "https://www.linkedin.com/in/jane",
            Category::Profile,
            90,
        ));
        results.push(make_result("https://github.com/jane", Category::Profile, 80));
        results.recompute();
        assert!(results.summary.has_linkedin);
        assert!(results.summary.has_github);
        assert!(!results.summary.has_twitter);
    }

    #[test]
    fn test_wire_shape_uses_camel_case() {
        let mut results = DeepSearchResults::default();
        results.recompute();
        let json = serde_json::to_string(&results).unwrap();
        assert!(json.contains("\"totalResults\""));
        assert!(json.contains("\"searchesPerformed\""));
        assert!(json.contains("\"hasLinkedIn\""));
        assert!(json.contains("\"overallVisibility\":\"minimal\""));
    }
}
