//! Print queue engine: REST client for the jobs API and effect execution.
mod api;
mod engine;
mod types;

pub use api::{jobs_endpoint, ApiSettings, JobApi, ReqwestJobApi, JOBS_PATH};
pub use engine::EngineHandle;
pub use types::{
    ApiError, EngineEvent, FailureKind, Generation, JobRecord, JobSubmission, RequestId,
};
