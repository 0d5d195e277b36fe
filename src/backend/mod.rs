pub mod client;
pub mod error;
pub mod types;

pub use client::{BackendClient, JobBackend};
pub use error::BackendError;
pub use types::{StartJobResponse, StartScaffoldRequest, StartUplinkRequest};
