use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde_json::Value;

use crate::form::JobForm;
use crate::table::{render_table, TableSchema};
use crate::view_model::{AppViewModel, FormView};
use crate::Job;

pub type Generation = u64;
pub type RequestId = u64;

pub const LOADING_PLACEHOLDER: &str = "Loading...";
pub const ERROR_PLACEHOLDER: &str = "Something went wrong";

/// Why a request produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The server answered with a status other than the expected one.
    UnexpectedStatus(u16),
    /// No usable response: connection, timeout, oversized or malformed body.
    Transport(String),
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::UnexpectedStatus(code) => write!(f, "unexpected http status {code}"),
            RequestFailure::Transport(detail) => write!(f, "transport failure: {detail}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    generation: Generation,
    mounted: bool,
    loaded: bool,
    load_error: Option<String>,
    submit_error: Option<String>,
    jobs: Vec<Job>,
    form: JobForm,
    schema: TableSchema,
    next_request_id: RequestId,
    pending: BTreeSet<RequestId>,
    applied_results: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: TableSchema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Single status string: the latest error if any, otherwise the loading text.
    pub fn placeholder(&self) -> &str {
        self.submit_error
            .as_deref()
            .or(self.load_error.as_deref())
            .unwrap_or(LOADING_PLACEHOLDER)
    }

    pub fn pending_submissions(&self) -> usize {
        self.pending.len()
    }

    /// Count of successful load or create results that changed `jobs`.
    /// Survives remounts so callers can compare it across an `update`.
    pub fn applied_results(&self) -> u64 {
        self.applied_results
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let banner = if self.loaded {
            None
        } else {
            Some(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| LOADING_PLACEHOLDER.to_string()),
            )
        };
        AppViewModel {
            banner,
            submit_error: self.submit_error.clone(),
            form: FormView {
                draft: self.form.draft().clone(),
                focus: self.form.focus(),
                notice: self.form.notice().map(ToOwned::to_owned),
            },
            table: render_table(&self.jobs, &self.schema),
            job_count: self.jobs.len(),
            pending_submissions: self.pending.len(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn form_mut(&mut self) -> &mut JobForm {
        self.dirty = true;
        &mut self.form
    }

    /// Fresh container for a new mount. Keeps the schema and the request id
    /// counter so ids never repeat across mounts.
    pub(crate) fn mount(&mut self) -> Generation {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            mounted: true,
            schema: std::mem::take(&mut self.schema),
            next_request_id: self.next_request_id,
            applied_results: self.applied_results,
            dirty: true,
            ..Self::default()
        };
        generation
    }

    pub(crate) fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        self.pending.clear();
        self.dirty = true;
    }

    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending.insert(request_id);
        self.dirty = true;
        request_id
    }

    /// Returns false when the result belongs to an older mount and was dropped.
    ///
    /// Jobs created before the list arrived stay at the end unless the list
    /// already carries their id.
    pub(crate) fn apply_loaded(
        &mut self,
        generation: Generation,
        result: Result<Vec<Job>, RequestFailure>,
    ) -> bool {
        if generation != self.generation || !self.mounted {
            return false;
        }
        match result {
            Ok(jobs) => {
                let created_early = std::mem::replace(&mut self.jobs, jobs);
                let listed: HashSet<String> = self
                    .jobs
                    .iter()
                    .filter_map(Job::id)
                    .map(Value::to_string)
                    .collect();
                self.jobs.extend(created_early.into_iter().filter(|job| {
                    job.id()
                        .is_none_or(|id| !listed.contains(&id.to_string()))
                }));
                self.loaded = true;
                self.applied_results += 1;
                self.load_error = None;
            }
            Err(_) => {
                self.load_error = Some(ERROR_PLACEHOLDER.to_string());
            }
        }
        self.dirty = true;
        true
    }

    /// Returns false when the result is stale or unknown and was dropped.
    pub(crate) fn apply_created(
        &mut self,
        generation: Generation,
        request_id: RequestId,
        result: Result<Job, RequestFailure>,
    ) -> bool {
        if generation != self.generation || !self.pending.remove(&request_id) {
            return false;
        }
        match result {
            Ok(job) => {
                self.jobs.push(job);
                self.applied_results += 1;
            }
            Err(_) => self.submit_error = Some(ERROR_PLACEHOLDER.to_string()),
        }
        self.dirty = true;
        true
    }

    pub(crate) fn dismiss_submit_error(&mut self) -> bool {
        let had_error = self.submit_error.take().is_some();
        if had_error {
            self.dirty = true;
        }
        had_error
    }
}
