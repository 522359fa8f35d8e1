//! NDJSON progress protocol for the streaming analysis endpoint.
//!
//! Each event serializes to one line. Clients key off the `type` field:
//! `progress` lines narrate the stages, then exactly one terminal line
//! follows, either `result` or `error`.

use serde::Serialize;

use crate::models::analysis::ProfileAnalysis;
use crate::models::market::SkillDemand;
use crate::models::profile::{LinkedInProfile, WebPresenceResult};
use crate::models::resume::ParsedResume;
use crate::search::results::DeepSearchResults;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    Progress {
        step: u32,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    Error {
        error: String,
    },
    Result {
        success: bool,
        data: Box<AnalysisPayload>,
    },
}

impl ProgressEvent {
    pub fn progress(step: u32, message: &str) -> Self {
        ProgressEvent::Progress {
            step,
            message: message.to_string(),
            detail: None,
        }
    }

    pub fn progress_with_detail(step: u32, message: &str, detail: String) -> Self {
        ProgressEvent::Progress {
            step,
            message: message.to_string(),
            detail: Some(detail),
        }
    }

    pub fn error(message: String) -> Self {
        ProgressEvent::Error { error: message }
    }

    pub fn result(payload: AnalysisPayload) -> Self {
        ProgressEvent::Result {
            success: true,
            data: Box::new(payload),
        }
    }
}

/// Everything the pipeline produced, returned in the terminal result line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub resume: ParsedResume,
    pub web_presence: Vec<WebPresenceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in_profile: Option<LinkedInProfile>,
    pub skill_demand: Vec<SkillDemand>,
    pub deep_search: DeepSearchResults,
    pub analysis: ProfileAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_wire_shape() {
        let event = ProgressEvent::progress(2, "Parsing resume...");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"progress\""));
        assert!(json.contains("\"step\":2"));
        assert!(!json.contains("\"detail\""));
    }

    #[test]
    fn test_error_event_wire_shape() {
        let event = ProgressEvent::error("boom".to_string());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("\"error\":\"boom\""));
    }

    #[test]
    fn test_result_event_carries_success_flag() {
        let payload = AnalysisPayload {
            resume: ParsedResume::default(),
            web_presence: vec![],
            linked_in_profile: None,
            skill_demand: vec![],
            deep_search: DeepSearchResults::default(),
            analysis: ProfileAnalysis::default(),
        };
        let json = serde_json::to_string(&ProgressEvent::result(payload)).unwrap();
        assert!(json.contains("\"type\":\"result\""));
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"resume\""));
    }
}
