use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::JobStatus;
use crate::error::MccError;

/// Maximum number of log lines retained per job; older lines are discarded.
pub const LOG_CAP: usize = 20;

/// How a job came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Provision a fresh repository from a generator recipe.
    Scaffold,
    /// Attach the agent to an existing repository.
    ExistingUplink,
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Scaffold => write!(f, "scaffold"),
            JobKind::ExistingUplink => write!(f, "uplink"),
        }
    }
}

/// Whether the agent pauses for human review after planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    /// No pause: planning flows straight into coding.
    Auto,
    /// Planning pauses in `WaitingApproval` until the user approves.
    Interactive,
}

impl std::fmt::Display for AgentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentMode::Auto => write!(f, "auto"),
            AgentMode::Interactive => write!(f, "interactive"),
        }
    }
}

/// Pull-request metadata, populated when a job reaches `PrReady`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrDetails {
    pub title: String,
    pub url: String,
    pub number: u64,
    pub files_changed: u32,
}

/// A tracked unit of automated repository work.
///
/// Jobs are created by the engine, advanced by the simulated (or remote)
/// agent, and unblocked by explicit user operations. The `id` is assigned at
/// creation and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub repo_name: String,
    #[serde(rename = "type")]
    pub kind: JobKind,
    pub mode: AgentMode,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    /// Icon name carried for the dashboard; opaque to the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_icon: Option<String>,
    /// The AGENTS.md instructions document handed to the agent.
    pub agent_context: String,
    /// Rolling terminal trace, newest last, capped at [`LOG_CAP`] lines.
    pub logs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_details: Option<PrDetails>,
}

impl Job {
    /// Create a scaffold job in `Booting`.
    pub fn scaffold(
        id: String,
        repo_name: String,
        agent_context: String,
        mode: AgentMode,
        generator_icon: Option<String>,
    ) -> Self {
        Self {
            id,
            repo_name,
            kind: JobKind::Scaffold,
            mode,
            status: JobStatus::Booting,
            created_at: Utc::now(),
            generator_icon,
            agent_context,
            logs: vec![">> Initializing command center...".to_string()],
            pr_details: None,
        }
    }

    /// Create an uplink job in `UploadingContext`, skipping the
    /// scaffold-only provisioning states.
    pub fn uplink(id: String, repo_name: String, agent_context: String, mode: AgentMode) -> Self {
        Self {
            id,
            repo_name,
            kind: JobKind::ExistingUplink,
            mode,
            status: JobStatus::UploadingContext,
            created_at: Utc::now(),
            generator_icon: Some("Github".to_string()),
            agent_context,
            logs: vec![">> Connecting to existing uplink...".to_string()],
            pr_details: None,
        }
    }

    /// Append a `>> `-prefixed trace line, discarding the oldest lines once
    /// the log exceeds [`LOG_CAP`].
    pub fn push_log(&mut self, line: &str) {
        self.logs.push(format!(">> {line}"));
        if self.logs.len() > LOG_CAP {
            let excess = self.logs.len() - LOG_CAP;
            self.logs.drain(..excess);
        }
    }

    /// The line shown on the job card: the most recent trace entry.
    pub fn last_log(&self) -> &str {
        self.logs.last().map(String::as_str).unwrap_or("")
    }

    /// Unblock a job waiting for plan review and start the coding phase.
    pub fn approve(&mut self) -> Result<(), MccError> {
        if self.status != JobStatus::WaitingApproval {
            return Err(MccError::InvalidTransition {
                op: "approve",
                status: self.status,
            });
        }
        self.status = JobStatus::Working;
        self.push_log("Plan approved by user. Executing...");
        Ok(())
    }

    /// Merge the pull request of a job in `PrReady`, ending its lifecycle.
    pub fn merge(&mut self) -> Result<(), MccError> {
        if self.status != JobStatus::PrReady {
            return Err(MccError::InvalidTransition {
                op: "merge",
                status: self.status,
            });
        }
        self.status = JobStatus::Merged;
        self.push_log("PR Merged. Mission complete.");
        Ok(())
    }

    /// Record that plan feedback was forwarded to the planner. Only accepted
    /// while the plan is under review; the status does not change.
    pub fn note_refinement(&mut self, feedback: &str) -> Result<(), MccError> {
        if self.status != JobStatus::WaitingApproval {
            return Err(MccError::InvalidTransition {
                op: "refine",
                status: self.status,
            });
        }
        self.push_log(&format!("Feedback sent to planner: {feedback}"));
        Ok(())
    }
}
