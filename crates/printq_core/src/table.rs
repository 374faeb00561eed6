//! Job table view: a pure function from a job list to rows of text.
use std::collections::HashSet;

use serde_json::Value;

use crate::job::{Job, FIELD_ID, FIELD_MESSAGE, FIELD_NAME, FIELD_STATUS};

pub const NO_JOBS: &str = "No jobs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub field: String,
    pub label: String,
}

impl Column {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

/// Where the table's columns come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSchema {
    /// Fixed `(field, label)` pairs.
    Declared(Vec<Column>),
    /// One column per key of the first job, headed by the key itself.
    FirstRecord,
}

impl Default for TableSchema {
    fn default() -> Self {
        TableSchema::Declared(default_columns())
    }
}

pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new(FIELD_ID, "ID"),
        Column::new(FIELD_STATUS, "Status"),
        Column::new(FIELD_NAME, "Name"),
        Column::new(FIELD_MESSAGE, "Message"),
    ]
}

/// Stable identity of a rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    Id(String),
    /// Position in the job list, used when the job has no id or repeats one.
    Synthetic(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub key: RowKey,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobTableView {
    #[default]
    Empty,
    Populated {
        caption: String,
        headers: Vec<String>,
        rows: Vec<JobRowView>,
        /// Rows whose fields did not match the columns and were padded or cut.
        normalized_rows: usize,
    },
}

impl JobTableView {
    pub fn header_count(&self) -> usize {
        match self {
            JobTableView::Empty => 0,
            JobTableView::Populated { headers, .. } => headers.len(),
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            JobTableView::Empty => 0,
            JobTableView::Populated { rows, .. } => rows.len(),
        }
    }
}

pub fn caption(count: usize) -> String {
    format!("Showing {count} items")
}

pub fn render_table(jobs: &[Job], schema: &TableSchema) -> JobTableView {
    let Some(first) = jobs.first() else {
        return JobTableView::Empty;
    };

    let (fields, headers): (Vec<String>, Vec<String>) = match schema {
        TableSchema::Declared(columns) => columns
            .iter()
            .map(|column| (column.field.clone(), column.label.clone()))
            .unzip(),
        TableSchema::FirstRecord => first
            .keys()
            .map(|key| (key.to_string(), key.to_string()))
            .unzip(),
    };

    let keys = row_keys(jobs);
    let mut normalized_rows = 0;
    let rows: Vec<JobRowView> = jobs
        .iter()
        .zip(keys)
        .map(|(job, key)| {
            let missing = fields.iter().any(|field| !job.contains_key(field));
            let extra = job.keys().any(|key| !fields.iter().any(|field| field == key));
            if missing || extra {
                normalized_rows += 1;
            }
            let cells = fields
                .iter()
                .map(|field| cell_text(job.get(field)))
                .collect();
            JobRowView { key, cells }
        })
        .collect();

    JobTableView::Populated {
        caption: caption(jobs.len()),
        headers,
        rows,
        normalized_rows,
    }
}

/// Raw value as shown in a cell. Strings are not quoted; nested values are
/// shown as compact JSON.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(nested) => nested.to_string(),
    }
}

fn row_keys(jobs: &[Job]) -> Vec<RowKey> {
    let mut seen = HashSet::new();
    jobs.iter()
        .enumerate()
        .map(|(index, job)| match job.id().map(|id| cell_text(Some(id))) {
            Some(id) if seen.insert(id.clone()) => RowKey::Id(id),
            _ => RowKey::Synthetic(index),
        })
        .collect()
}
