use std::sync::{mpsc, Arc};
use std::thread;

use printq_logging::{printq_debug, printq_error};
use tokio_util::sync::CancellationToken;

use crate::api::{ApiSettings, JobApi, ReqwestJobApi};
use crate::{ApiError, EngineEvent, FailureKind, Generation, JobSubmission, RequestId};

enum Request {
    LoadJobs {
        generation: Generation,
    },
    CreateJob {
        generation: Generation,
        request_id: RequestId,
        job: JobSubmission,
    },
}

enum EngineCommand {
    Run(Request),
    CancelInFlight,
}

/// Runs API calls on a background runtime and reports results over a channel.
///
/// Every request is its own task, so concurrent creates complete in whatever
/// order the server answers them.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Starts the worker thread and its runtime. Fails if either cannot be
    /// created, so the caller never waits on a dead engine.
    pub fn new(api: Arc<dyn JobApi>) -> Result<Self, ApiError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let runtime = tokio::runtime::Runtime::new().map_err(|err| {
            ApiError::new(
                FailureKind::Runtime,
                format!("failed to start runtime: {err}"),
            )
        })?;

        thread::Builder::new()
            .name("printq-engine".to_string())
            .spawn(move || run_worker(&runtime, api, cmd_rx, event_tx))
            .map_err(|err| {
                ApiError::new(
                    FailureKind::Runtime,
                    format!("failed to spawn engine thread: {err}"),
                )
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn with_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        let api = ReqwestJobApi::new(settings)?;
        Self::new(Arc::new(api))
    }

    pub fn load_jobs(&self, generation: Generation) {
        self.send(EngineCommand::Run(Request::LoadJobs { generation }));
    }

    pub fn create_job(&self, generation: Generation, request_id: RequestId, job: JobSubmission) {
        self.send(EngineCommand::Run(Request::CreateJob {
            generation,
            request_id,
            job,
        }));
    }

    /// Cancels every request issued so far. Later requests are unaffected.
    pub fn cancel_in_flight(&self) {
        self.send(EngineCommand::CancelInFlight);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            printq_error!("Engine thread is gone; command dropped");
        }
    }
}

fn run_worker(
    runtime: &tokio::runtime::Runtime,
    api: Arc<dyn JobApi>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut cancel = CancellationToken::new();
    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Run(request) => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                let token = cancel.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            printq_debug!("Request cancelled before completion");
                        }
                        event = handle_request(api.as_ref(), request) => {
                            let _ = event_tx.send(event);
                        }
                    }
                });
            }
            EngineCommand::CancelInFlight => {
                cancel.cancel();
                cancel = CancellationToken::new();
            }
        }
    }
}

async fn handle_request(api: &dyn JobApi, request: Request) -> EngineEvent {
    match request {
        Request::LoadJobs { generation } => EngineEvent::JobsLoaded {
            generation,
            result: api.list_jobs().await,
        },
        Request::CreateJob {
            generation,
            request_id,
            job,
        } => EngineEvent::JobCreated {
            generation,
            request_id,
            result: api.create_job(&job).await,
        },
    }
}
