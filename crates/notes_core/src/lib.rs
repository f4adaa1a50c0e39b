//! Smart Notes core: pure request state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{DownloadOutcome, Msg, RequestOutcome};
pub use state::{
    AppState, DownloadState, NotesResult, RequestState, RequestToken, ARTIFACT_FILENAME,
    FAILURE_NOTICE,
};
pub use update::update;
pub use view_model::{
    AppViewModel, DownloadLinkView, ResultsView, APP_TITLE, DOWNLOAD_LABEL, INPUT_PLACEHOLDER,
    SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE, SUMMARY_HEADING,
};
