use crate::{FormField, Generation, Job, RequestFailure, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The view came up; (re)creates the container and starts the list fetch.
    Mounted,
    /// The view went away; anything still in flight is stale from now on.
    Unmounted,
    /// User edited one form field (full new text of the field).
    FieldChanged { field: FormField, value: String },
    /// User moved to the next form field.
    FocusNext,
    /// User moved to the previous form field.
    FocusPrev,
    /// User asked for the next known status suggestion.
    CycleStatus,
    /// User submitted the form.
    FormSubmitted,
    /// User dismissed the submit error line.
    DismissError,
    /// List fetch finished.
    JobsLoaded {
        generation: Generation,
        result: Result<Vec<Job>, RequestFailure>,
    },
    /// Create call finished.
    JobCreated {
        generation: Generation,
        request_id: RequestId,
        result: Result<Job, RequestFailure>,
    },
}
