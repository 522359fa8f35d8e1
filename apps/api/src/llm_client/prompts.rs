//! Prompt templates for the structured LLM calls: resume parsing, the
//! narrative profile analysis, and job-compatibility scoring. All instruct
//! the model to return bare JSON; `LlmClient::call_json` strips fences when
//! the model wraps it anyway.

use crate::models::analysis::ProfileAnalysis;
use crate::models::market::{JobListing, SalaryEstimate};

pub const RESUME_PARSE_SYSTEM: &str = "You are a precise resume parser. You extract structured data from resume text and return only valid JSON, never prose.";

pub const ANALYSIS_SYSTEM: &str = "You are a career intelligence analyst. You produce comprehensive, honest, actionable profile assessments and return only valid JSON, never prose.";

pub const COMPATIBILITY_SYSTEM: &str = "You are a job-fit analyst. You score how well a specific candidate matches a specific role and return only valid JSON, never prose.";

/// Builds the resume-parsing prompt. The output shape mirrors `ParsedResume`.
pub fn resume_parse_prompt(raw_text: &str) -> String {
    format!(
        r#"Parse this resume text and extract structured information. Return a JSON object with the following structure:
{{
  "fullName": "string or null",
  "email": "string or null",
  "phone": "string or null",
  "location": "string or null",
  "summary": "string or null - professional summary if present",
  "experience": [
    {{
      "company": "string",
      "title": "string",
      "location": "string or null",
      "startDate": "YYYY-MM or YYYY format",
      "endDate": "YYYY-MM or YYYY format or null if current",
      "current": "boolean",
      "description": "string or null",
      "highlights": ["array of key achievements"]
    }}
  ],
  "education": [
    {{
      "institution": "string",
      "degree": "string or null",
      "field": "string or null",
      "startDate": "YYYY format",
      "endDate": "YYYY format",
      "gpa": "string or null",
      "highlights": ["array of notable achievements"]
    }}
  ],
  "skills": [
    {{
      "name": "string",
      "category": "string - e.g., 'programming', 'soft skills', 'tools', etc."
    }}
  ],
  "certifications": [
    {{
      "name": "string",
      "issuer": "string or null",
      "date": "string or null"
    }}
  ]
}}

Resume text:
{raw_text}

Return ONLY the JSON object, no additional text."#
    )
}

/// Builds the profile-analysis prompt. The caller supplies pre-serialized
/// JSON blocks for each data source plus the rendered deep-search summary.
pub fn analysis_prompt(
    resume_json: &str,
    web_presence_json: &str,
    linkedin_json: &str,
    skill_demand_json: &str,
    deep_search_summary: &str,
) -> String {
    format!(
        r#"Analyze this professional profile and provide comprehensive insights similar to what enterprise talent intelligence platforms provide to employers.

## Resume Data
{resume_json}

## Web Presence Found
{web_presence_json}

## LinkedIn Profile (if available)
{linkedin_json}

## Labor Market Skill Demand Data
{skill_demand_json}

## Deep Web Search Results
{deep_search_summary}

IMPORTANT: Use the deep web search results to significantly inform your analysis. The web search reveals:
- News coverage and media mentions: thought leadership, visibility, industry recognition
- Publications and research: expertise depth and academic credibility
- Speaking engagements: industry recognition and communication skills
- Patents: innovation and technical problem-solving
- Awards and recognition: validation of claimed achievements
- Open source contributions: technical skills and community involvement
- Press releases and company news: validation of career trajectory and role claims
- Podcast appearances: subject matter expertise and public profile
- Video content: presentation skills and public engagement

Factor these findings into your assessment. If someone claims to be a thought leader but has minimal web presence, that's a concern. If they have extensive news coverage and speaking engagements, that validates their expertise.

Provide a comprehensive analysis in the following JSON structure:
{{
  "skills": {{
    "stated": [{{"name": "skill", "level": "beginner|intermediate|advanced|expert", "category": "category"}}],
    "inferred": [{{"name": "skill", "level": "level", "category": "category", "inferenceReason": "why you inferred this"}}],
    "gaps": [{{"skill": "skill name", "importance": "low|medium|high", "reason": "why this gap matters"}}],
    "strengths": ["list of skill-based strengths"]
  }},
  "career": {{
    "trajectory": "description of career progression pattern",
    "progression": "linear|pivoting|accelerating|stagnating",
    "yearsOfExperience": number,
    "industryFocus": ["industries they've worked in"],
    "potentialPaths": [
      {{
        "currentRole": "current or most recent title",
        "nextRoles": [{{"title": "potential next role", "probability": 0.0-1.0, "requiredSkills": ["skills needed"]}}]
      }}
    ]
  }},
  "marketPosition": {{
    "overallScore": 0-100,
    "skillsInDemand": ["their skills that are in high demand"],
    "skillsToAcquire": ["skills they should learn"],
    "salaryRange": {{"min": number, "max": number, "median": number}},
    "competitiveness": "low|medium|high"
  }},
  "webPresence": {{
    "platforms": [{{"platform": "name", "url": "url", "assessment": "positive|neutral|negative|missing"}}],
    "consistency": 0-100,
    "issues": ["list of issues or inconsistencies found"]
  }},
  "recommendations": [
    {{
      "priority": "high|medium|low",
      "category": "skills|experience|education|online-presence|networking",
      "title": "short recommendation title",
      "description": "detailed description",
      "actionItems": ["specific action items"]
    }}
  ],
  "concerns": [
    {{
      "severity": "low|medium|high",
      "area": "area of concern",
      "description": "what employers might be concerned about",
      "mitigation": "how to address this concern"
    }}
  ]
}}

Be thorough, honest, and actionable. Think about what an employer using an enterprise talent intelligence platform would see and flag. The candidate deserves to know this information.

Return ONLY the JSON object."#
    )
}

const JOB_DESCRIPTION_MAX_CHARS: usize = 1000;

/// Builds the job-compatibility prompt. The output shape mirrors
/// `JobCompatibility`.
pub fn compatibility_prompt(
    job: &JobListing,
    analysis: &ProfileAnalysis,
    market_value: Option<&SalaryEstimate>,
) -> String {
    let description: String = job.description.chars().take(JOB_DESCRIPTION_MAX_CHARS).collect();

    let posted_salary = match (job.salary_min, job.salary_max) {
        (Some(min), Some(max)) => format!("${min:.0} - ${max:.0}"),
        (Some(min), None) => format!("${min:.0}+"),
        (None, Some(max)) => format!("up to ${max:.0}"),
        (None, None) => "Not listed".to_string(),
    };

    let stated_skills = join_names(analysis.skills.stated.iter().map(|s| s.name.as_str()));
    let inferred_skills = join_names(analysis.skills.inferred.iter().map(|s| s.name.as_str()));
    let industries = join_names(analysis.career.industry_focus.iter().map(String::as_str));

    let market_line = match market_value {
        Some(estimate) => format!("${:.0} - ${:.0}", estimate.min, estimate.max),
        None => "Not established".to_string(),
    };

    format!(
        r#"Analyze this candidate's fit for a specific role.

## Job
Title: {title}
Company: {company}
Location: {location}
Posted salary: {posted_salary}
Description: {description}

## Candidate Profile
Years of experience: {years}
Stated skills: {stated_skills}
Inferred skills: {inferred_skills}
Industry focus: {industries}
Career trajectory: {trajectory}
Market value: {market_line}

Return a JSON object with the following structure:
{{
  "score": 0-100,
  "breakdown": {{"skills": 0-100, "experience": 0-100, "industry": 0-100}},
  "strengths": ["2-4 specific reasons this candidate fits this role"],
  "gaps": ["2-4 specific gaps or risks for this role"],
  "salaryLeverage": {{"targetLow": number, "targetHigh": number, "rationale": "1 sentence"}},
  "recommendation": "2-3 sentences on whether and how to pursue this role"
}}

Be specific. Generic advice is failure. Think about what makes THIS candidate a good or poor fit for THIS specific role.

Return ONLY the JSON object."#,
        title = job.title,
        company = job.company,
        location = job.location,
        years = analysis.career.years_of_experience,
        trajectory = analysis.career.trajectory,
    )
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "None listed".to_string()
    } else {
        joined
    }
}
