//! LinkedIn candidate verification.
//!
//! Candidates come from the deep-search profiles bucket, already ordered by
//! relevance. Each is checked sequentially through a fixed decision chain,
//! stopping at the first accept. Sequential on purpose: an accept makes every
//! later fetch unnecessary, and candidate order is a correctness-relevant
//! tie-break. Rejections are logged but never abort the chain.

use tracing::{debug, info, warn};

use crate::clients::linkedin::LinkedInClient;
use crate::models::profile::LinkedInProfile;
use crate::models::resume::ParsedResume;
use crate::search::results::{CatalogedSearchResult, DeepSearchResults};

const MIN_CONNECTIONS: u32 = 50;
const MIN_ROLES_FOR_CONNECTION_GUARD: usize = 3;

const PROFESSIONAL_TITLE_SIGNALS: &[&str] = &[
    "professor", "director", "manager", "engineer", "analyst", "senior", "lead", "head", "vp",
    "chief",
];

const ACADEMIC_EMPLOYER_SIGNALS: &[&str] = &["university", "college", "institute"];

const COMPANY_STOPWORDS: &[&str] = &[
    "inc",
    "llc",
    "ltd",
    "corp",
    "corporation",
    "company",
    "group",
    "technologies",
    "the",
    "and",
];

/// Filters the profiles bucket down to verifiable LinkedIn person-profile
/// URLs, preserving relevance order.
pub fn linkedin_candidates(results: &DeepSearchResults) -> Vec<CatalogedSearchResult> {
    results
        .profiles
        .iter()
        .filter(|r| r.platform == "linkedin" && r.url.contains("/in/"))
        .cloned()
        .collect()
}

/// Works through the candidates in order and returns the first verified
/// profile, falling back to an email-based lookup when every candidate is
/// rejected. Returns `None` when nothing can be confirmed.
pub async fn verify_linkedin(
    client: &dyn LinkedInClient,
    candidates: &[CatalogedSearchResult],
    resume: &ParsedResume,
) -> Option<LinkedInProfile> {
    let resume_name = resume.full_name.as_deref().unwrap_or("");
    let name_tokens = name_tokens(resume_name);

    for candidate in candidates {
        // Pre-filter on the search hit itself before spending a fetch.
        if !name_tokens.is_empty() {
            let hit_text = format!("{} {}", candidate.title, candidate.snippet).to_lowercase();
            if !shares_token(&hit_text, &name_tokens) {
                debug!(url = %candidate.url, "candidate skipped: no name token in search hit");
                continue;
            }
        }

        let profile = match client.fetch_profile(&candidate.url).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(url = %candidate.url, error = %e, "profile fetch failed; trying next candidate");
                continue;
            }
        };

        match check_candidate(&profile, resume, &name_tokens) {
            Ok(()) => {
                info!(url = %candidate.url, "LinkedIn profile verified");
                return Some(profile);
            }
            Err(reason) => {
                debug!(url = %candidate.url, reason, "candidate rejected");
            }
        }
    }

    // Last resort: resolve by email and take whatever comes back.
    if let Some(email) = resume.email.as_deref() {
        match client.lookup_by_email(email).await {
            Ok(Some(url)) => match client.fetch_profile(&url).await {
                Ok(profile) => {
                    info!(url, "LinkedIn profile resolved via email lookup");
                    return Some(profile);
                }
                Err(e) => warn!(url, error = %e, "email-resolved profile fetch failed"),
            },
            Ok(None) => debug!("email lookup found no profile"),
            Err(e) => warn!(error = %e, "email lookup failed"),
        }
    }

    None
}

/// Applies the accept/reject rules to one fetched profile. `Err` carries the
/// rejection reason for logging.
fn check_candidate(
    profile: &LinkedInProfile,
    resume: &ParsedResume,
    name_tokens: &[String],
) -> Result<(), &'static str> {
    let headline = profile.headline.as_deref().unwrap_or("").to_lowercase();

    if !name_tokens.is_empty() {
        let fetched_name = profile.full_name.as_deref().unwrap_or("").to_lowercase();
        if !fetched_name.is_empty() && !shares_token(&fetched_name, name_tokens) {
            return Err("fetched name shares no token with resume name");
        }
    }

    let professional = resume_is_professional(resume);
    let academic = resume_is_academic(resume);

    // A student headline contradicts a professional resume, unless the
    // resume itself is academic (professors supervise students and academic
    // profiles often read "PhD candidate" mid-career-change).
    if professional && !academic && (headline.contains("student") || headline.contains("studying"))
    {
        return Err("student headline vs professional resume");
    }

    if let Some(connections) = profile.connections {
        if connections < MIN_CONNECTIONS
            && resume.experience.len() >= MIN_ROLES_FOR_CONNECTION_GUARD
            && professional
        {
            return Err("near-empty profile for a multi-role professional");
        }
    }

    if context_matches(profile, resume, &headline) {
        Ok(())
    } else {
        Err("no company/title/academic context overlap")
    }
}

/// Rule 6: company, title, or academic-institution overlap between resume and
/// fetched profile. With no resume company/title data at all, context is
/// deemed non-contradictory and the name match stands alone.
fn context_matches(profile: &LinkedInProfile, resume: &ParsedResume, headline: &str) -> bool {
    let companies: Vec<&str> = resume
        .experience
        .iter()
        .map(|e| e.company.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    let titles: Vec<&str> = resume
        .experience
        .iter()
        .map(|e| e.title.as_str())
        .filter(|t| !t.is_empty())
        .collect();

    if companies.is_empty() && titles.is_empty() {
        return true;
    }

    let employers: Vec<String> = profile
        .experience
        .iter()
        .map(|e| e.company.to_lowercase())
        .collect();

    for company in &companies {
        for word in company_words(company) {
            if headline.contains(&word) || employers.iter().any(|e| e.contains(&word)) {
                return true;
            }
        }
    }

    for title in &titles {
        let lowered = title.to_lowercase();
        if lowered.contains("professor") {
            // Title words like "assistant" are too generic for professor
            // roles; require the literal word.
            if headline.contains("professor") {
                return true;
            }
            continue;
        }
        if significant_words(&lowered, &[])
            .iter()
            .any(|w| headline.contains(w))
        {
            return true;
        }
    }

    // Academic branch: a university/college/institute employer whose
    // distinctive words show up in the headline, or any professor headline.
    for company in &companies {
        let lowered = company.to_lowercase();
        if ACADEMIC_EMPLOYER_SIGNALS.iter().any(|s| lowered.contains(s)) {
            if headline.contains("professor") {
                return true;
            }
            let distinctive: Vec<String> = significant_words(&lowered, &[])
                .into_iter()
                .filter(|w| !ACADEMIC_EMPLOYER_SIGNALS.contains(&w.as_str()))
                .collect();
            if distinctive.iter().any(|w| headline.contains(w)) {
                return true;
            }
        }
    }

    false
}

fn name_tokens(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .filter(|t| t.len() > 2)
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|t| t.len() > 2)
        .collect()
}

fn shares_token(text: &str, tokens: &[String]) -> bool {
    tokens.iter().any(|t| text.contains(t.as_str()))
}

fn significant_words(text: &str, stopwords: &[&str]) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.len() > 3 && !stopwords.contains(&w.as_str()))
        .collect()
}

fn company_words(company: &str) -> Vec<String> {
    significant_words(&company.to_lowercase(), COMPANY_STOPWORDS)
}

fn resume_is_professional(resume: &ParsedResume) -> bool {
    resume.experience.iter().any(|e| {
        let title = e.title.to_lowercase();
        PROFESSIONAL_TITLE_SIGNALS.iter().any(|s| title.contains(s))
    })
}

fn resume_is_academic(resume: &ParsedResume) -> bool {
    resume.experience.iter().any(|e| {
        let title = e.title.to_lowercase();
        let company = e.company.to_lowercase();
        title.contains("professor")
            || ACADEMIC_EMPLOYER_SIGNALS.iter().any(|s| company.contains(s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::WorkExperience;
    use crate::search::results::{test_support::make_result, Category};
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockLinkedInClient {
        profiles: HashMap<String, LinkedInProfile>,
        email_hit: Option<String>,
        fetches: AtomicUsize,
        email_lookups: AtomicUsize,
    }

    impl MockLinkedInClient {
        fn new(profiles: Vec<LinkedInProfile>) -> Self {
            Self {
                profiles: profiles.into_iter().map(|p| (p.url.clone(), p)).collect(),
                email_hit: None,
                fetches: AtomicUsize::new(0),
                email_lookups: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LinkedInClient for MockLinkedInClient {
        async fn fetch_profile(&self, url: &str) -> Result<LinkedInProfile> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.profiles.get(url) {
                Some(p) => Ok(p.clone()),
                None => bail!("profile not found"),
            }
        }

        async fn lookup_by_email(&self, _email: &str) -> Result<Option<String>> {
            self.email_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.email_hit.clone())
        }
    }

    fn candidate(url: &str, title: &str) -> CatalogedSearchResult {
        let mut c = make_result(url, Category::Profile, 80);
        c.platform = "linkedin".to_string();
        c.title = title.to_string();
        c
    }

    fn profile(url: &str, name: &str, headline: &str, connections: u32) -> LinkedInProfile {
        LinkedInProfile {
            url: url.to_string(),
            full_name: Some(name.to_string()),
            headline: Some(headline.to_string()),
            connections: Some(connections),
            ..Default::default()
        }
    }

    fn resume(name: &str, roles: &[(&str, &str)]) -> ParsedResume {
        ParsedResume {
            full_name: Some(name.to_string()),
            experience: roles
                .iter()
                .map(|(company, title)| WorkExperience {
                    company: company.to_string(),
                    title: title.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_without_email_returns_none() {
        let client = MockLinkedInClient::new(vec![]);
        let result = verify_linkedin(&client, &[], &resume("Jane Doe", &[])).await;
        assert!(result.is_none());
        assert_eq!(client.fetch_count(), 0);
        assert_eq!(client.email_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_prefilter_skips_fetch_for_unrelated_hit() {
        let client = MockLinkedInClient::new(vec![]);
        let candidates = vec![candidate(
            "https://linkedin.com/in/bob-smith",
            "Bob Smith - Accountant",
        )];
        let result = verify_linkedin(&client, &candidates, &resume("Jane Doe", &[])).await;
        assert!(result.is_none());
        assert_eq!(client.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_first_accept_short_circuits() {
        let url_a = "https://linkedin.com/in/jane-doe";
        let url_b = "https://linkedin.com/in/jane-doe-2";
        let url_c = "https://linkedin.com/in/jane-doe-3";
        let client = MockLinkedInClient::new(vec![
            profile(url_a, "Jane Doe", "Senior Engineer at Acme Corp", 800),
            profile(url_b, "Jane Doe", "Senior Engineer at Acme Corp", 800),
            profile(url_c, "Jane Doe", "Senior Engineer at Acme Corp", 800),
        ]);
        let candidates = vec![
            candidate(url_a, "Jane Doe - Senior Engineer"),
            candidate(url_b, "Jane Doe - Senior Engineer"),
            candidate(url_c, "Jane Doe - Senior Engineer"),
        ];
        let r = resume("Jane Doe", &[("Acme Corp", "Senior Engineer")]);
        let result = verify_linkedin(&client, &candidates, &r).await;
        assert_eq!(result.unwrap().url, url_a);
        assert_eq!(client.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_fetched_name_mismatch_rejects() {
        let url = "https://linkedin.com/in/jane-doe";
        let client = MockLinkedInClient::new(vec![profile(
            url,
            "Robert Roe",
            "Senior Engineer at Acme Corp",
            800,
        )]);
        let candidates = vec![candidate(url, "Jane Doe - Senior Engineer")];
        let r = resume("Jane Doe", &[("Acme Corp", "Senior Engineer")]);
        assert!(verify_linkedin(&client, &candidates, &r).await.is_none());
    }

    #[tokio::test]
    async fn test_student_headline_rejected_for_professional_resume() {
        let url = "https://linkedin.com/in/jane-doe";
        let client = MockLinkedInClient::new(vec![profile(
            url,
            "Jane Doe",
            "MBA student at State University",
            300,
        )]);
        let candidates = vec![candidate(url, "Jane Doe")];
        let r = resume("Jane Doe", &[("Acme Corp", "Senior Director")]);
        assert!(verify_linkedin(&client, &candidates, &r).await.is_none());
    }

    #[tokio::test]
    async fn test_academic_resume_tolerates_student_headline() {
        // A professor's resume must not trip the student-mismatch rule; the
        // academic branch of the context match accepts on the shared
        // institution name.
        let url = "https://linkedin.com/in/jane-doe";
        let client = MockLinkedInClient::new(vec![profile(
            url,
            "Jane Doe",
            "PhD Candidate, Stanford University",
            120,
        )]);
        let candidates = vec![candidate(url, "Jane Doe - Stanford")];
        let r = resume("Jane Doe", &[("Stanford University", "Professor")]);
        let result = verify_linkedin(&client, &candidates, &r).await;
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_low_connections_rejected_for_multi_role_professional() {
        let url = "https://linkedin.com/in/jane-doe";
        let client = MockLinkedInClient::new(vec![profile(
            url,
            "Jane Doe",
            "Engineer at Acme Corp",
            12,
        )]);
        let candidates = vec![candidate(url, "Jane Doe")];
        let r = resume(
            "Jane Doe",
            &[
                ("Acme Corp", "Senior Engineer"),
                ("Initech", "Engineer"),
                ("Globex", "Junior Engineer"),
            ],
        );
        assert!(verify_linkedin(&client, &candidates, &r).await.is_none());
    }

    #[tokio::test]
    async fn test_no_context_data_accepts_on_name_alone() {
        let url = "https://linkedin.com/in/jane-doe";
        let client = MockLinkedInClient::new(vec![profile(url, "Jane Doe", "Hello there", 400)]);
        let candidates = vec![candidate(url, "Jane Doe")];
        let r = resume("Jane Doe", &[]);
        assert!(verify_linkedin(&client, &candidates, &r).await.is_some());
    }

    #[tokio::test]
    async fn test_no_context_overlap_rejects() {
        let url = "https://linkedin.com/in/jane-doe";
        let client = MockLinkedInClient::new(vec![profile(
            url,
            "Jane Doe",
            "Pastry chef in Lyon",
            400,
        )]);
        let candidates = vec![candidate(url, "Jane Doe")];
        let r = resume("Jane Doe", &[("Acme Corp", "Senior Engineer")]);
        assert!(verify_linkedin(&client, &candidates, &r).await.is_none());
    }

    #[tokio::test]
    async fn test_email_fallback_after_all_rejections() {
        let resolved = "https://linkedin.com/in/jane-doe-resolved";
        let mut client = MockLinkedInClient::new(vec![profile(
            resolved,
            "Jane Doe",
            "Senior Engineer at Acme Corp",
            800,
        )]);
        client.email_hit = Some(resolved.to_string());
        let mut r = resume("Jane Doe", &[("Acme Corp", "Senior Engineer")]);
        r.email = Some("jane@acme.example".to_string());
        let result = verify_linkedin(&client, &[], &r).await;
        assert_eq!(result.unwrap().url, resolved);
        assert_eq!(client.email_lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_moves_to_next_candidate() {
        let good = "https://linkedin.com/in/jane-doe-2";
        let client = MockLinkedInClient::new(vec![profile(
            good,
            "Jane Doe",
            "Senior Engineer at Acme Corp",
            800,
        )]);
        let candidates = vec![
            candidate("https://linkedin.com/in/jane-doe-missing", "Jane Doe"),
            candidate(good, "Jane Doe"),
        ];
        let r = resume("Jane Doe", &[("Acme Corp", "Senior Engineer")]);
        let result = verify_linkedin(&client, &candidates, &r).await;
        assert_eq!(result.unwrap().url, good);
        assert_eq!(client.fetch_count(), 2);
    }

    #[test]
    fn test_linkedin_candidates_filters_platform_and_path() {
        let mut results = DeepSearchResults::default();
        results.push({
            let mut r = make_result("https://linkedin.com/in/jane", Category::Profile, 90);
            r.platform = "linkedin".to_string();
            r
        });
        results.push({
            let mut r = make_result("https://linkedin.com/company/acme", Category::Profile, 70);
            r.platform = "linkedin".to_string();
            r
        });
        results.push(make_result("https://github.com/jane", Category::Profile, 60));
        let candidates = linkedin_candidates(&results);
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].url.contains("/in/"));
    }

    #[test]
    fn test_name_tokens_drop_short_parts() {
        assert_eq!(name_tokens("Jane A. Doe"), vec!["jane", "doe"]);
    }
}
