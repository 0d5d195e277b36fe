//! The persistent job collection.
//!
//! [`JobStore`] is an insertion-ordered id→[`Job`] map serialized as a single
//! JSON document, so the engine can resume every job in whatever status was
//! last recorded, including blocking states.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::MccError;
use crate::lifecycle::Job;

/// Insertion-ordered collection of jobs, keyed by id.
///
/// The store is owned by a single engine; all mutation goes through the
/// engine's operations. Display-level re-sorting (active-first and the like)
/// is the dashboard's concern, not the store's.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: IndexMap<String, Job>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the collection from a JSON document. A missing file means an
    /// empty store, not an error.
    pub fn load(path: &Path) -> Result<Self, MccError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path)?;
        let jobs: IndexMap<String, Job> = serde_json::from_str(&contents)?;
        Ok(Self { jobs })
    }

    /// Write the full collection to disk.
    pub fn save(&self, path: &Path) -> Result<(), MccError> {
        let contents = serde_json::to_string_pretty(&self.jobs)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn insert(&mut self, job: Job) {
        self.jobs.insert(job.id.clone(), job);
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Job> {
        self.jobs.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Job> {
        self.jobs.values_mut()
    }

    /// True when no job can be advanced by the driver anymore: every job is
    /// either waiting on a user decision or merged.
    pub fn all_settled(&self) -> bool {
        self.iter()
            .all(|job| job.status.is_blocking() || job.status.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{AgentMode, JobStatus};
    use tempfile::TempDir;

    fn sample_store() -> JobStore {
        let mut store = JobStore::new();
        store.insert(Job::scaffold(
            "a1".into(),
            "my-app".into(),
            "# ctx".into(),
            AgentMode::Auto,
            Some("AppWindow".into()),
        ));
        store.insert(Job::uplink(
            "b2".into(),
            "octo/repo".into(),
            String::new(),
            AgentMode::Interactive,
        ));
        store
    }

    #[test]
    fn insertion_order_is_preserved() {
        let store = sample_store();
        let ids: Vec<&str> = store.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b2"]);
    }

    #[test]
    fn load_missing_file_yields_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = JobStore::load(&tmp.path().join("nope.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn save_load_resumes_statuses_including_blocking() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mcc_jobs.json");

        let mut store = sample_store();
        store
            .get_mut("b2")
            .unwrap()
            .status = JobStatus::WaitingApproval;
        store.save(&path).unwrap();

        let loaded = JobStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("a1").unwrap().status, JobStatus::Booting);
        assert_eq!(loaded.get("b2").unwrap().status, JobStatus::WaitingApproval);
        let ids: Vec<&str> = loaded.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b2"]);
    }

    #[test]
    fn all_settled_tracks_blocking_and_terminal() {
        let mut store = sample_store();
        assert!(!store.all_settled());

        store.get_mut("a1").unwrap().status = JobStatus::Merged;
        store.get_mut("b2").unwrap().status = JobStatus::PrReady;
        assert!(store.all_settled());

        store.get_mut("b2").unwrap().status = JobStatus::Working;
        assert!(!store.all_settled());
    }

    #[test]
    fn empty_store_is_settled() {
        assert!(JobStore::new().all_settled());
    }
}
