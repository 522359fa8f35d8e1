//! Relevance scoring for a single search result against the subject's name.
//!
//! Pure and deterministic: downstream bucket ordering depends on exact
//! scores, so the formula is pinned by tests.

use chrono::{Datelike, Utc};

use crate::search::provider::SearchHit;

const BASE_SCORE: u32 = 50;
const EXACT_TITLE_BONUS: u32 = 30;
const TITLE_TOKEN_BONUS: u32 = 10;
const SNIPPET_BONUS: u32 = 15;
const CURRENT_YEAR_BONUS: u32 = 10;
const PRIOR_YEAR_BONUS: u32 = 5;
const MAX_SCORE: u32 = 100;

/// Scores a hit against the full name, clamped to [0, 100].
pub fn relevance_score(hit: &SearchHit, name: &str) -> u32 {
    score_with_reference_year(hit, name, Utc::now().year())
}

/// Same formula with an explicit reference year so tests stay off the wall
/// clock. The recency bonus treats the reference year and the next as
/// current (+10) and the prior year as recent (+5).
pub(crate) fn score_with_reference_year(hit: &SearchHit, name: &str, year: i32) -> u32 {
    let name_lower = name.trim().to_lowercase();
    if name_lower.is_empty() {
        return BASE_SCORE;
    }

    let title_lower = hit.title.to_lowercase();
    let snippet_lower = hit.snippet.to_lowercase();

    let mut score = BASE_SCORE;

    if title_lower.contains(&name_lower) {
        score += EXACT_TITLE_BONUS;
    } else {
        let matched = name_lower
            .split_whitespace()
            .filter(|part| part.len() > 2 && title_lower.contains(part))
            .count() as u32;
        score += matched * TITLE_TOKEN_BONUS;
    }

    if snippet_lower.contains(&name_lower) {
        score += SNIPPET_BONUS;
    }

    if let Some(date) = hit.date.as_deref() {
        let date_lower = date.to_lowercase();
        if date_lower.contains(&year.to_string()) || date_lower.contains(&(year + 1).to_string()) {
            score += CURRENT_YEAR_BONUS;
        } else if date_lower.contains(&(year - 1).to_string()) {
            score += PRIOR_YEAR_BONUS;
        }
    }

    score.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, snippet: &str, date: Option<&str>) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            link: "https://example.com".to_string(),
            snippet: snippet.to_string(),
            date: date.map(str::to_string),
            source: None,
        }
    }

    #[test]
    fn test_base_score_for_unrelated_result() {
        let h = hit("Weather report", "Sunny all week", None);
        assert_eq!(score_with_reference_year(&h, "Jane Doe", 2025), 50);
    }

    #[test]
    fn test_exact_name_in_title() {
        let h = hit("Jane Doe wins award", "", None);
        assert_eq!(score_with_reference_year(&h, "Jane Doe", 2025), 80);
    }

    #[test]
    fn test_partial_name_tokens_in_title() {
        // "jane" and "doe" each match but the full name does not appear.
        let h = hit("Doe, Jane - speaker bio", "", None);
        assert_eq!(score_with_reference_year(&h, "Jane Doe", 2025), 70);
    }

    #[test]
    fn test_short_tokens_are_ignored() {
        // "A." is too short to count as a name part.
        let h = hit("Jane profile", "", None);
        assert_eq!(score_with_reference_year(&h, "Jane A. Li", 2025), 60);
    }

    #[test]
    fn test_name_in_snippet_adds_fifteen() {
        let h = hit("Engineering blog", "An interview with Jane Doe", None);
        assert_eq!(score_with_reference_year(&h, "Jane Doe", 2025), 65);
    }

    #[test]
    fn test_current_year_date_bonus() {
        let h = hit("Jane Doe", "", Some("Mar 3, 2025"));
        assert_eq!(score_with_reference_year(&h, "Jane Doe", 2025), 90);
    }

    #[test]
    fn test_next_year_counts_as_current() {
        let h = hit("Jane Doe", "", Some("Jan 2026"));
        assert_eq!(score_with_reference_year(&h, "Jane Doe", 2025), 90);
    }

    #[test]
    fn test_prior_year_date_bonus() {
        let h = hit("Jane Doe", "", Some("Nov 2024"));
        assert_eq!(score_with_reference_year(&h, "Jane Doe", 2025), 85);
    }

    #[test]
    fn test_score_clamped_at_100() {
        let h = hit(
            "Jane Doe profile",
            "Jane Doe, senior engineer",
            Some("Feb 2025"),
        );
        // 50 + 30 + 15 + 10 = 105 before clamping.
        assert_eq!(score_with_reference_year(&h, "Jane Doe", 2025), 100);
    }

    #[test]
    fn test_empty_name_returns_base() {
        let h = hit("Anything at all", "text", Some("2025"));
        assert_eq!(score_with_reference_year(&h, "   ", 2025), 50);
    }
}
