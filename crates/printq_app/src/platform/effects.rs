use printq_core::{Effect, Job, Msg, NewJob, RequestFailure};
use printq_engine::{ApiError, EngineEvent, EngineHandle, JobSubmission};
use printq_logging::{printq_info, printq_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadJobs { generation } => {
                    printq_info!("LoadJobs generation={}", generation);
                    self.engine.load_jobs(generation);
                }
                Effect::CreateJob {
                    generation,
                    request_id,
                    job,
                } => {
                    printq_info!(
                        "CreateJob generation={} request_id={} status={}",
                        generation,
                        request_id,
                        job.status
                    );
                    self.engine
                        .create_job(generation, request_id, to_submission(job));
                }
                Effect::CancelInFlight => {
                    printq_info!("CancelInFlight");
                    self.engine.cancel_in_flight();
                }
            }
        }
    }

    /// Drains finished requests as messages for the update loop.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn to_submission(job: NewJob) -> JobSubmission {
    JobSubmission {
        status: job.status,
        name: job.name,
        message: job.message,
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobsLoaded { generation, result } => Msg::JobsLoaded {
            generation,
            result: match result {
                Ok(records) => Ok(records.into_iter().map(Job::from_map).collect()),
                Err(err) => {
                    printq_warn!("Loading jobs failed: {}", err);
                    Err(map_failure(&err))
                }
            },
        },
        EngineEvent::JobCreated {
            generation,
            request_id,
            result,
        } => Msg::JobCreated {
            generation,
            request_id,
            result: match result {
                Ok(record) => Ok(Job::from_map(record)),
                Err(err) => {
                    printq_warn!("Creating job {} failed: {}", request_id, err);
                    Err(map_failure(&err))
                }
            },
        },
    }
}

fn map_failure(err: &ApiError) -> RequestFailure {
    match err.kind.http_status() {
        Some(code) => RequestFailure::UnexpectedStatus(code),
        None => RequestFailure::Transport(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printq_engine::{FailureKind, JobRecord};
    use serde_json::json;

    fn record(value: serde_json::Value) -> JobRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn loaded_records_become_jobs_in_order() {
        let msg = map_event(EngineEvent::JobsLoaded {
            generation: 3,
            result: Ok(vec![record(json!({"id": 1})), record(json!({"id": 2}))]),
        });

        match msg {
            Msg::JobsLoaded { generation, result } => {
                assert_eq!(generation, 3);
                let ids: Vec<_> = result
                    .unwrap()
                    .iter()
                    .map(|job| job.id().cloned())
                    .collect();
                assert_eq!(ids, vec![Some(json!(1)), Some(json!(2))]);
            }
            other => panic!("unexpected msg {other:?}"),
        }
    }

    #[test]
    fn status_failures_keep_their_code() {
        let msg = map_event(EngineEvent::JobCreated {
            generation: 1,
            request_id: 7,
            result: Err(ApiError {
                kind: FailureKind::HttpStatus(400),
                message: "400 Bad Request".to_string(),
            }),
        });

        assert_eq!(
            msg,
            Msg::JobCreated {
                generation: 1,
                request_id: 7,
                result: Err(RequestFailure::UnexpectedStatus(400)),
            }
        );
    }

    #[test]
    fn transport_failures_carry_the_detail() {
        let msg = map_event(EngineEvent::JobsLoaded {
            generation: 1,
            result: Err(ApiError {
                kind: FailureKind::Timeout,
                message: "operation timed out".to_string(),
            }),
        });

        match msg {
            Msg::JobsLoaded {
                result: Err(RequestFailure::Transport(detail)),
                ..
            } => assert_eq!(detail, "timeout: operation timed out"),
            other => panic!("unexpected msg {other:?}"),
        }
    }

    #[test]
    fn submission_copies_all_three_fields() {
        let submission = to_submission(NewJob::new("open", "poster", "A3, color"));
        assert_eq!(submission.status, "open");
        assert_eq!(submission.name, "poster");
        assert_eq!(submission.message, "A3, color");
    }
}
