//! The simulated agent driver.
//!
//! Stands in for the real backend push mechanism: on every tick it
//! nondeterministically moves each non-blocked job one step along the
//! pipeline and emits status-appropriate trace lines. The RNG is injectable
//! so transition timing is reproducible in tests (seed a [`Simulator`] and
//! every run replays identically).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::lifecycle::{Job, JobKind, JobStatus, PrDetails};
use crate::store::JobStore;

/// Trace lines emitted while a job sits in a given status.
fn log_lines(status: JobStatus) -> &'static [&'static str] {
    match status {
        JobStatus::Booting => &[
            "Provisioning container...",
            "Setting up environment...",
            "Installing base dependencies...",
        ],
        JobStatus::Generating => &[
            "Running scaffolding scripts...",
            "Initializing git...",
            "Installing npm packages...",
        ],
        JobStatus::UploadingContext => &[
            "Reading AGENTS.md...",
            "Committing context file...",
            "Pushing to remote...",
        ],
        JobStatus::Planning => &[
            "Agent: Reading repository...",
            "Agent: Analyzing request...",
            "Agent: Formulating execution plan...",
        ],
        JobStatus::WaitingApproval => &["Plan generated.", "Waiting for user review...", "Paused."],
        JobStatus::Working => &[
            "Agent: Writing code...",
            "Agent: Running tests...",
            "Agent: Refactoring...",
        ],
        JobStatus::PrReady => &[
            "Pull Request created.",
            "CI Checks passed.",
            "Ready to merge.",
        ],
        JobStatus::Merged => &[
            "Merged successfully.",
            "Closing branch.",
            "Deployment triggered.",
        ],
    }
}

/// Probability that a single step leaves the given status, or `None` for
/// statuses the driver must never touch.
fn advance_chance(status: JobStatus) -> Option<f64> {
    match status {
        JobStatus::Booting | JobStatus::Generating | JobStatus::UploadingContext => Some(0.3),
        JobStatus::Planning | JobStatus::Working => Some(0.4),
        JobStatus::WaitingApproval | JobStatus::PrReady | JobStatus::Merged => None,
    }
}

/// One simulated step for a single job: maybe a trace line, maybe a forward
/// transition. Entering `WaitingApproval` and `PrReady` carries the side
/// effects the pipeline requires (approval notice, PR metadata).
pub fn advance_job(job: &mut Job, rng: &mut impl Rng) {
    if rng.random::<f64>() > 0.3 {
        let lines = log_lines(job.status);
        let line = lines[rng.random_range(0..lines.len())];
        job.push_log(line);
    }

    let Some(chance) = advance_chance(job.status) else {
        return;
    };
    if rng.random::<f64>() >= chance {
        return;
    }
    let Some(next) = job.status.successor(job.mode) else {
        return;
    };

    job.status = next;
    match next {
        JobStatus::WaitingApproval => job.push_log("Plan requires approval."),
        JobStatus::PrReady => {
            let number: u64 = rng.random_range(1..=1000);
            job.pr_details = Some(PrDetails {
                title: match job.kind {
                    JobKind::Scaffold => "Feat: Initialize Project".to_string(),
                    JobKind::ExistingUplink => "Feat: Agent Update".to_string(),
                },
                url: format!("https://github.com/{}/pull/{number}", job.repo_name),
                number,
                files_changed: rng.random_range(3..=17),
            });
            job.push_log("PR Created successfully.");
        }
        _ => {}
    }
}

/// Periodic driver over the whole collection.
pub struct Simulator {
    rng: StdRng,
}

impl Simulator {
    /// Simulator with OS-seeded randomness, for normal runs.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic simulator for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance every job that is neither blocked nor terminal by one step.
    /// Returns whether any job was eligible.
    pub fn tick(&mut self, store: &mut JobStore) -> bool {
        let mut advanced = false;
        for job in store.iter_mut() {
            if job.status.is_blocking() || job.status.is_terminal() {
                continue;
            }
            advance_job(job, &mut self.rng);
            advanced = true;
        }
        advanced
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
