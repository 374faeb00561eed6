use crate::{FormField, JobDraft, JobTableView};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub draft: JobDraft,
    pub focus: FormField,
    pub notice: Option<String>,
}

impl FormView {
    pub fn value(&self, field: FormField) -> &str {
        self.draft.get(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Loading text or load error; `None` once the list has loaded.
    pub banner: Option<String>,
    pub submit_error: Option<String>,
    pub form: FormView,
    pub table: JobTableView,
    pub job_count: usize,
    pub pending_submissions: usize,
    pub dirty: bool,
}
