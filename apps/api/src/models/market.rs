#![allow(dead_code)]

//! Labor-market and job-board data shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDemand {
    pub skill_name: String,
    /// 0–100, higher = more job postings mention this skill.
    pub demand_score: u32,
    /// Approximate year-over-year growth in percent; may be negative.
    pub growth_rate: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_postings: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub created_at: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryEstimate {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
    pub sample_size: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompatibilityBreakdown {
    pub skills: u32,
    pub experience: u32,
    pub industry: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryLeverage {
    pub target_low: f64,
    pub target_high: f64,
    pub rationale: String,
}

/// LLM-scored fit between one candidate profile and one job posting.
/// LLM output, so everything defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobCompatibility {
    pub score: u32,
    pub breakdown: CompatibilityBreakdown,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub salary_leverage: SalaryLeverage,
    pub recommendation: String,
}
