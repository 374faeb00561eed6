use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FIELD_ID: &str = "id";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_NAME: &str = "name";
pub const FIELD_MESSAGE: &str = "message";

/// A print job as returned by the server.
///
/// The field set is not fixed by the client; keys keep the order they had in
/// the response body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Job(Map<String, Value>);

impl Job {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Server-assigned id, if present and not null.
    pub fn id(&self) -> Option<&Value> {
        self.0.get(FIELD_ID).filter(|value| !value.is_null())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

}

impl From<Map<String, Value>> for Job {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Body of a create request: the three fields the form collects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewJob {
    pub status: String,
    pub name: String,
    pub message: String,
}

impl NewJob {
    pub fn new(
        status: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Statuses the server knows about. Offered as suggestions only; the status
/// field accepts any non-empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Unassigned,
    Open,
    Completed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Unassigned, JobStatus::Open, JobStatus::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Unassigned => "unassigned",
            JobStatus::Open => "open",
            JobStatus::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
    }

    /// Next suggestion after whatever is currently typed. Unknown or empty
    /// text starts the cycle from the server default.
    pub fn next_after(current: &str) -> Self {
        match Self::parse(current) {
            Some(JobStatus::Unassigned) => JobStatus::Open,
            Some(JobStatus::Open) => JobStatus::Completed,
            Some(JobStatus::Completed) | None => JobStatus::Unassigned,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_keeps_server_key_order() {
        let job: Job =
            serde_json::from_value(json!({"name": "a", "id": 3, "status": "open", "message": "m"}))
                .unwrap();
        let keys: Vec<_> = job.keys().collect();
        assert_eq!(keys, vec!["name", "id", "status", "message"]);
        assert_eq!(job.id(), Some(&json!(3)));
    }

    #[test]
    fn null_id_counts_as_missing() {
        let job: Job = serde_json::from_value(json!({"id": null, "name": "a"})).unwrap();
        assert!(job.contains_key("id"));
        assert_eq!(job.id(), None);
    }

    #[test]
    fn new_job_serializes_three_fields() {
        let body = serde_json::to_value(NewJob::new("queued", "x", "y")).unwrap();
        assert_eq!(body, json!({"status": "queued", "name": "x", "message": "y"}));
    }

    #[test]
    fn status_suggestions_cycle() {
        assert_eq!(JobStatus::next_after(""), JobStatus::Unassigned);
        assert_eq!(JobStatus::next_after("unassigned"), JobStatus::Open);
        assert_eq!(JobStatus::next_after(" OPEN"), JobStatus::Completed);
        assert_eq!(JobStatus::next_after("completed"), JobStatus::Unassigned);
        assert_eq!(JobStatus::next_after("queued"), JobStatus::Unassigned);
    }
}
