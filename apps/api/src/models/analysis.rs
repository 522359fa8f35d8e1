#![allow(dead_code)]

//! Narrative career-analysis output produced by the final LLM stage.
//!
//! The analysis prompt asks for this exact JSON shape, but LLM output is
//! lenient territory: every field defaults so a partially filled response
//! still deserializes.

use serde::{Deserialize, Serialize};

use crate::models::resume::Skill;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferredSkill {
    pub name: String,
    pub level: Option<String>,
    pub category: Option<String>,
    pub inference_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGap {
    pub skill: String,
    pub importance: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillAnalysis {
    pub stated: Vec<Skill>,
    pub inferred: Vec<InferredSkill>,
    pub gaps: Vec<SkillGap>,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextRole {
    pub title: String,
    pub probability: f64,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerPath {
    pub current_role: String,
    pub next_roles: Vec<NextRole>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerAnalysis {
    pub trajectory: String,
    /// linear | pivoting | accelerating | stagnating
    pub progression: String,
    pub years_of_experience: f64,
    pub industry_focus: Vec<String>,
    pub potential_paths: Vec<CareerPath>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketPosition {
    pub overall_score: u32,
    pub skills_in_demand: Vec<String>,
    pub skills_to_acquire: Vec<String>,
    pub salary_range: SalaryRange,
    pub competitiveness: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformAssessment {
    pub platform: String,
    pub url: Option<String>,
    pub assessment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebPresenceAssessment {
    pub platforms: Vec<PlatformAssessment>,
    pub consistency: u32,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recommendation {
    pub priority: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Concern {
    pub severity: String,
    pub area: String,
    pub description: String,
    pub mitigation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileAnalysis {
    pub skills: SkillAnalysis,
    pub career: CareerAnalysis,
    pub market_position: MarketPosition,
    pub web_presence: WebPresenceAssessment,
    pub recommendations: Vec<Recommendation>,
    pub concerns: Vec<Concern>,
}
