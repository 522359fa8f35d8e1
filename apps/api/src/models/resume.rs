#![allow(dead_code)]

//! Structured resume data as returned by the LLM parsing stage.
//!
//! Field names are camelCase on the wire to match the JSON shape the parsing
//! prompt asks for; the LLM frequently omits optional fields, so everything
//! defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    pub level: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub expiration_date: Option<String>,
}

/// Full parsed resume. `raw_text` is populated by the pipeline after the LLM
/// call, not by the model itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub certifications: Vec<Certification>,
    pub raw_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_resume_tolerates_missing_fields() {
        let json = r#"{"fullName": "Jane Doe", "experience": [{"company": "Acme Corp", "title": "Senior Engineer"}]}"#;
        let parsed: ParsedResume = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.experience.len(), 1);
        assert_eq!(parsed.experience[0].company, "Acme Corp");
        assert!(parsed.skills.is_empty());
        assert!(parsed.email.is_none());
    }

    #[test]
    fn test_parsed_resume_camel_case_round_trip() {
        let resume = ParsedResume {
            full_name: Some("Jane Doe".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&resume).unwrap();
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"rawText\""));
    }
}
