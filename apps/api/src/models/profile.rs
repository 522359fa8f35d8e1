#![allow(dead_code)]

//! Enriched LinkedIn profile data and flattened web-presence entries.

use serde::{Deserialize, Serialize};

use crate::models::resume::{Education, WorkExperience};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedInPost {
    pub text: String,
    pub post_url: String,
    pub posted_at: String,
    pub time_ago: String,
    pub num_reactions: u32,
    pub num_comments: u32,
    pub num_reposts: u32,
    pub images: Vec<String>,
    pub video_url: Option<String>,
}

/// Full LinkedIn profile as returned by the enrichment collaborator.
/// Everything beyond the URL is optional: an unconfigured or failing
/// enrichment call still yields a usable (if empty) profile shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedInProfile {
    pub url: String,
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub connections: Option<u32>,
    pub experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub profile_picture: Option<String>,
    pub recent_posts: Vec<LinkedInPost>,
}

/// Flattened presence entry fed to the narrative analysis prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPresenceResult {
    pub platform: String,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}
