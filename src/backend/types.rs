//! Request and response bodies for the agent backend RPC boundary.
//!
//! Each inbound engine operation maps to exactly one named call; bodies are
//! JSON with camelCase keys, matching what the dashboard shell sends.

use serde::{Deserialize, Serialize};

use crate::lifecycle::AgentMode;

/// Body of `POST /v1/jobs/scaffold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartScaffoldRequest {
    pub name: String,
    pub recipe_id: String,
    pub context: String,
    pub mode: AgentMode,
}

/// Body of `POST /v1/jobs/uplink`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartUplinkRequest {
    pub repo_name: String,
    pub context: String,
    pub mode: AgentMode,
}

/// Response of both job-creation calls: the identifier the backend assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartJobResponse {
    pub job_id: String,
}

/// Body of the approve and merge calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobActionRequest {
    pub job_id: String,
}

/// Body of `POST /v1/jobs/refine`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub job_id: String,
    pub feedback: String,
}

/// Acknowledgement returned by approve, refine and merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckResponse {
    pub acknowledged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_request_uses_camel_case_keys() {
        let req = StartScaffoldRequest {
            name: "my-app".into(),
            recipe_id: "rust-tauri".into(),
            context: "# Role".into(),
            mode: AgentMode::Interactive,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""recipeId":"rust-tauri""#));
        assert!(json.contains(r#""mode":"interactive""#));
    }

    #[test]
    fn start_job_response_parses_backend_format() {
        let resp: StartJobResponse = serde_json::from_str(r#"{"jobId":"abc123"}"#).unwrap();
        assert_eq!(resp.job_id, "abc123");
    }

    #[test]
    fn refine_request_roundtrip() {
        let req = RefineRequest {
            job_id: "j1".into(),
            feedback: "smaller steps".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: RefineRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.job_id, "j1");
        assert_eq!(back.feedback, "smaller steps");
    }
}
