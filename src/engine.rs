//! The job lifecycle engine.
//!
//! [`JobEngine`] is the single owner of the [`JobStore`]: every mutation —
//! job creation, the periodic simulated tick, and the user operations that
//! unblock paused jobs — is serialized through its methods, so a tick can
//! never race a user action on the same job.
//!
//! When a backend is configured, each operation calls the backend first and
//! only mutates local state after the call succeeds; a failed call leaves
//! the collection exactly as it was.

use std::path::PathBuf;
use std::time::Duration;

use uuid::Uuid;

use crate::backend::{BackendClient, JobBackend, StartScaffoldRequest, StartUplinkRequest};
use crate::config::MccConfig;
use crate::error::MccError;
use crate::lifecycle::{AgentMode, Job, JobStatus};
use crate::sim::Simulator;
use crate::store::JobStore;

pub struct JobEngine {
    store: JobStore,
    backend: Option<BackendClient>,
    sim: Simulator,
    store_path: PathBuf,
}

impl JobEngine {
    /// Load the persisted collection and wire up the backend client when one
    /// is configured. A seed makes the simulated driver reproducible.
    pub fn new(config: &MccConfig, seed: Option<u64>) -> Result<Self, MccError> {
        let store_path = PathBuf::from(&config.store_path);
        let store = JobStore::load(&store_path)?;
        let backend = if config.backend_url.is_empty() {
            None
        } else {
            Some(BackendClient::new(
                config.api_token.clone(),
                config.backend_url.clone(),
            ))
        };
        let sim = match seed {
            Some(seed) => Simulator::seeded(seed),
            None => Simulator::new(),
        };
        Ok(Self {
            store,
            backend,
            sim,
            store_path,
        })
    }

    /// Read-only view of the collection, for rendering.
    pub fn store(&self) -> &JobStore {
        &self.store
    }

    /// Start a scaffold job. Rejects an empty name before any mutation and
    /// returns the new job's identifier.
    pub async fn create_scaffold_job(
        &mut self,
        name: &str,
        recipe_id: &str,
        context: &str,
        mode: AgentMode,
        icon: Option<String>,
    ) -> Result<String, MccError> {
        if name.trim().is_empty() {
            return Err(MccError::EmptyRepoName);
        }
        let id = match &self.backend {
            Some(backend) => {
                backend
                    .start_scaffold_job(&StartScaffoldRequest {
                        name: name.to_string(),
                        recipe_id: recipe_id.to_string(),
                        context: context.to_string(),
                        mode,
                    })
                    .await?
                    .job_id
            }
            None => Uuid::new_v4().to_string(),
        };
        self.store.insert(Job::scaffold(
            id.clone(),
            name.to_string(),
            context.to_string(),
            mode,
            icon,
        ));
        self.flush()?;
        Ok(id)
    }

    /// Start an uplink job against an existing repository.
    pub async fn create_uplink_job(
        &mut self,
        repo_name: &str,
        context: &str,
        mode: AgentMode,
    ) -> Result<String, MccError> {
        if repo_name.trim().is_empty() {
            return Err(MccError::EmptyRepoName);
        }
        let id = match &self.backend {
            Some(backend) => {
                backend
                    .start_uplink_job(&StartUplinkRequest {
                        repo_name: repo_name.to_string(),
                        context: context.to_string(),
                        mode,
                    })
                    .await?
                    .job_id
            }
            None => Uuid::new_v4().to_string(),
        };
        self.store.insert(Job::uplink(
            id.clone(),
            repo_name.to_string(),
            context.to_string(),
            mode,
        ));
        self.flush()?;
        Ok(id)
    }

    /// Approve the plan of a job paused in `WaitingApproval`.
    pub async fn approve(&mut self, job_id: &str) -> Result<(), MccError> {
        self.expect_status(job_id, JobStatus::WaitingApproval, "approve")?;
        if let Some(backend) = &self.backend {
            backend.approve_plan(job_id).await?;
        }
        if let Some(job) = self.store.get_mut(job_id) {
            job.approve()?;
        }
        self.flush()
    }

    /// Merge the pull request of a job in `PrReady`, completing it.
    pub async fn merge(&mut self, job_id: &str) -> Result<(), MccError> {
        self.expect_status(job_id, JobStatus::PrReady, "merge")?;
        if let Some(backend) = &self.backend {
            backend.merge_pull_request(job_id).await?;
        }
        if let Some(job) = self.store.get_mut(job_id) {
            job.merge()?;
        }
        self.flush()
    }

    /// Forward plan feedback to the planner; the job stays paused.
    pub async fn refine(&mut self, job_id: &str, feedback: &str) -> Result<(), MccError> {
        self.expect_status(job_id, JobStatus::WaitingApproval, "refine")?;
        if let Some(backend) = &self.backend {
            backend.refine_plan(job_id, feedback).await?;
        }
        if let Some(job) = self.store.get_mut(job_id) {
            job.note_refinement(feedback)?;
        }
        self.flush()
    }

    /// Drive the simulated agent until every job is blocked or merged, or
    /// until the tick budget runs out. Persists after each tick and hands
    /// the collection to `on_tick` for rendering.
    pub async fn run(
        &mut self,
        ticks: Option<u64>,
        interval_ms: u64,
        mut on_tick: impl FnMut(&JobStore),
    ) -> Result<(), MccError> {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
        let mut remaining = ticks;
        loop {
            if self.store.all_settled() {
                break;
            }
            if let Some(n) = remaining {
                if n == 0 {
                    break;
                }
                remaining = Some(n - 1);
            }
            interval.tick().await;
            if self.sim.tick(&mut self.store) {
                self.flush()?;
            }
            on_tick(&self.store);
        }
        Ok(())
    }

    fn expect_status(
        &self,
        job_id: &str,
        expected: JobStatus,
        op: &'static str,
    ) -> Result<(), MccError> {
        let job = self
            .store
            .get(job_id)
            .ok_or_else(|| MccError::JobNotFound(job_id.to_string()))?;
        if job.status != expected {
            return Err(MccError::InvalidTransition {
                op,
                status: job.status,
            });
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), MccError> {
        self.store.save(&self.store_path)
    }
}
