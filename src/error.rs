use thiserror::Error;

use crate::backend::BackendError;
use crate::lifecycle::JobStatus;

#[derive(Debug, Error)]
pub enum MccError {
    #[error("Repository name must not be empty")]
    EmptyRepoName,

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Cannot {op} a job in status {status}")]
    InvalidTransition {
        op: &'static str,
        status: JobStatus,
    },

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_operation_and_status() {
        let err = MccError::InvalidTransition {
            op: "merge",
            status: JobStatus::Working,
        };
        assert_eq!(err.to_string(), "Cannot merge a job in status WORKING");
    }

    #[test]
    fn job_not_found_display() {
        let err = MccError::JobNotFound("abc123".into());
        assert_eq!(err.to_string(), "Job not found: abc123");
    }
}
