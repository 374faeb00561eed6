//! Print queue core: pure state machine, job form and table view model.
mod effect;
mod form;
mod job;
mod msg;
mod state;
mod table;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{FormField, JobDraft, JobForm};
pub use job::{Job, JobStatus, NewJob, FIELD_ID, FIELD_MESSAGE, FIELD_NAME, FIELD_STATUS};
pub use msg::Msg;
pub use state::{
    AppState, Generation, RequestFailure, RequestId, ERROR_PLACEHOLDER, LOADING_PLACEHOLDER,
};
pub use table::{
    caption, cell_text, default_columns, render_table, Column, JobRowView, JobTableView, RowKey,
    TableSchema, NO_JOBS,
};
pub use update::update;
pub use view_model::{AppViewModel, FormView};
