use crate::job::{JobStatus, NewJob};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormField {
    #[default]
    Status,
    Name,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Status, FormField::Name, FormField::Message];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Status => "Status",
            FormField::Name => "Name",
            FormField::Message => "Message",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Status => FormField::Name,
            FormField::Name => FormField::Message,
            FormField::Message => FormField::Status,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Status => FormField::Message,
            FormField::Name => FormField::Status,
            FormField::Message => FormField::Name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobDraft {
    pub status: String,
    pub name: String,
    pub message: String,
}

impl JobDraft {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Status => &self.status,
            FormField::Name => &self.name,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Status => self.status = value,
            FormField::Name => self.name = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First empty field, in form order. Whitespace counts as content.
    pub fn first_missing(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
    }

    pub fn to_new_job(&self) -> Result<NewJob, FormField> {
        match self.first_missing() {
            Some(field) => Err(field),
            None => Ok(NewJob::new(
                self.status.clone(),
                self.name.clone(),
                self.message.clone(),
            )),
        }
    }
}

/// Local draft state of the job form. Independent of the container's job list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobForm {
    draft: JobDraft,
    focus: FormField,
    notice: Option<String>,
}

impl JobForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Required-field prompt from the last blocked submit.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Overwrites exactly one field of the draft.
    pub fn on_field_change(&mut self, field: FormField, value: String) {
        self.draft.set(field, value);
        self.notice = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn cycle_status(&mut self) {
        let next = JobStatus::next_after(&self.draft.status);
        self.on_field_change(FormField::Status, next.as_str().to_string());
    }

    /// Hands the drafted job to `add_job`, then clears the draft.
    ///
    /// The reset happens no matter what `add_job` does with the job. A draft
    /// with an empty field is not handed over: the draft is kept, focus jumps
    /// to the missing field and a notice is set. Returns whether the job was
    /// handed over.
    pub fn on_submit(&mut self, add_job: impl FnOnce(NewJob)) -> bool {
        match self.draft.to_new_job() {
            Ok(job) => {
                add_job(job);
                self.draft.clear();
                self.focus = FormField::Status;
                self.notice = None;
                true
            }
            Err(missing) => {
                self.focus = missing;
                self.notice = Some(format!("Please fill out the {} field", missing.label()));
                false
            }
        }
    }
}
