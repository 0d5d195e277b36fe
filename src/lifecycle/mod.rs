mod job;
mod status;

pub use job::{AgentMode, Job, JobKind, LOG_CAP, PrDetails};
pub use status::JobStatus;
