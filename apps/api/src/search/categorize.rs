//! Heuristic result categorization.
//!
//! Classification is FIRST match wins over `CATEGORY_RULES`, an explicit
//! ordered table. The order is load-bearing: a result that reads as both a
//! profile and a speaking engagement is a profile because that rule comes
//! first. Reordering the table changes classification outcomes, so any rule
//! change must keep the priority sequence intact.

use crate::search::provider::SearchHit;
use crate::search::results::Category;

/// Lowercased views of one hit, shared by all predicates.
pub struct RuleInput<'a> {
    pub url: &'a str,
    /// url + title + snippet, space-joined.
    pub combined: &'a str,
}

type Predicate = fn(&RuleInput) -> bool;

/// Priority-ordered rule table. Results matching no rule are mentions.
pub const CATEGORY_RULES: &[(Category, Predicate)] = &[
    (Category::Profile, is_profile),
    (Category::News, is_news),
    (Category::Publication, is_publication),
    (Category::Speaking, is_speaking),
    (Category::Patent, is_patent),
    (Category::Award, is_award),
    (Category::Podcast, is_podcast),
    (Category::Video, is_video),
    (Category::Opensource, is_opensource),
    (Category::Press, is_press),
];

/// Classifies one hit into exactly one category.
pub fn categorize(hit: &SearchHit) -> Category {
    let url = hit.link.to_lowercase();
    let combined = format!(
        "{} {} {}",
        url,
        hit.title.to_lowercase(),
        hit.snippet.to_lowercase()
    );
    let input = RuleInput {
        url: &url,
        combined: &combined,
    };

    for (category, predicate) in CATEGORY_RULES {
        if predicate(&input) {
            return *category;
        }
    }
    Category::Mention
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn is_profile(input: &RuleInput) -> bool {
    contains_any(
        input.url,
        &[
            "/in/",
            "/profile",
            "/user",
            "/people/",
            "/author/",
            "/writer/",
            "/contributor/",
            "/@",
        ],
    ) || contains_any(input.combined, &["profile", "about me"])
}

fn is_news(input: &RuleInput) -> bool {
    contains_any(input.url, &["/news/", "/article/", "/story/"])
        || contains_any(
            input.combined,
            &["reported", "announced", "according to", "news"],
        )
}

fn is_publication(input: &RuleInput) -> bool {
    contains_any(
        input.combined,
        &["paper", "research", "published", "journal", "study", "abstract"],
    ) || contains_any(input.url, &["scholar", "arxiv", "doi.org"])
}

fn is_speaking(input: &RuleInput) -> bool {
    contains_any(
        input.combined,
        &[
            "speaker",
            "keynote",
            "conference",
            "summit",
            "presentation",
            "webinar",
            "talk",
            "panel",
        ],
    )
}

fn is_patent(input: &RuleInput) -> bool {
    contains_any(input.combined, &["patent", "inventor"]) || input.url.contains("patent")
}

fn is_award(input: &RuleInput) -> bool {
    contains_any(
        input.combined,
        &["award", "honored", "recognized", "winner", "top ", "best "],
    )
}

fn is_podcast(input: &RuleInput) -> bool {
    contains_any(input.combined, &["podcast", "episode"])
        || contains_any(input.url, &["podcast", "spotify"])
        || (input.url.contains("apple.com") && input.combined.contains("listen"))
}

fn is_video(input: &RuleInput) -> bool {
    contains_any(input.url, &["youtube", "vimeo"]) || contains_any(input.combined, &["video", "watch"])
}

fn is_opensource(input: &RuleInput) -> bool {
    contains_any(input.url, &["github", "gitlab"])
        || contains_any(
            input.combined,
            &["repository", "open source", "contributor", "commit"],
        )
}

fn is_press(input: &RuleInput) -> bool {
    contains_any(
        input.combined,
        &["appointed", "joined", "hired", "promoted", "ceo", "founder"],
    )
}
