use crate::{Generation, NewJob, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the job list for the container mounted as `generation`.
    LoadJobs { generation: Generation },
    /// Create one job on the server.
    CreateJob {
        generation: Generation,
        request_id: RequestId,
        job: NewJob,
    },
    /// Drop every request still in flight; their results are never reported.
    CancelInFlight,
}
