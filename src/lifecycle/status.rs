use std::fmt;

use serde::{Deserialize, Serialize};

use super::job::AgentMode;

/// The eight statuses of the job pipeline.
///
/// Jobs flow forward through:
/// BOOTING → GENERATING → UPLOADING_CONTEXT → PLANNING →
/// {WAITING_APPROVAL | WORKING} → PR_READY → MERGED
///
/// `Booting` and `Generating` are scaffold-only; uplink jobs are created
/// directly in `UploadingContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Booting,
    Generating,
    UploadingContext,
    Planning,
    WaitingApproval,
    Working,
    PrReady,
    Merged,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Booting => write!(f, "BOOTING"),
            JobStatus::Generating => write!(f, "GENERATING"),
            JobStatus::UploadingContext => write!(f, "UPLOADING_CONTEXT"),
            JobStatus::Planning => write!(f, "PLANNING"),
            JobStatus::WaitingApproval => write!(f, "WAITING_APPROVAL"),
            JobStatus::Working => write!(f, "WORKING"),
            JobStatus::PrReady => write!(f, "PR_READY"),
            JobStatus::Merged => write!(f, "MERGED"),
        }
    }
}

impl JobStatus {
    /// Position of this status along the forward-only pipeline.
    ///
    /// Every transition the engine applies must strictly increase this rank.
    pub fn rank(self) -> u8 {
        match self {
            JobStatus::Booting => 0,
            JobStatus::Generating => 1,
            JobStatus::UploadingContext => 2,
            JobStatus::Planning => 3,
            JobStatus::WaitingApproval => 4,
            JobStatus::Working => 5,
            JobStatus::PrReady => 6,
            JobStatus::Merged => 7,
        }
    }

    /// A blocking status never auto-advances; it exits only via an explicit
    /// user operation (approve for `WaitingApproval`, merge for `PrReady`).
    pub fn is_blocking(self) -> bool {
        matches!(self, JobStatus::WaitingApproval | JobStatus::PrReady)
    }

    /// `Merged` has no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Merged)
    }

    /// The status an automatic forward step lands in, or `None` when the
    /// status only exits through a user operation (or not at all).
    ///
    /// From `Planning` the destination depends on the agent mode:
    /// interactive jobs pause in `WaitingApproval`, auto jobs go straight
    /// to `Working`.
    pub fn successor(self, mode: AgentMode) -> Option<JobStatus> {
        match self {
            JobStatus::Booting => Some(JobStatus::Generating),
            JobStatus::Generating => Some(JobStatus::UploadingContext),
            JobStatus::UploadingContext => Some(JobStatus::Planning),
            JobStatus::Planning => Some(match mode {
                AgentMode::Interactive => JobStatus::WaitingApproval,
                AgentMode::Auto => JobStatus::Working,
            }),
            JobStatus::Working => Some(JobStatus::PrReady),
            JobStatus::WaitingApproval | JobStatus::PrReady | JobStatus::Merged => None,
        }
    }
}
