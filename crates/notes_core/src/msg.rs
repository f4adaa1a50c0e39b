use crate::{NotesResult, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User pressed "Generate Notes".
    SubmitClicked,
    /// The processing request identified by `token` finished.
    RequestSettled {
        token: RequestToken,
        outcome: RequestOutcome,
    },
    /// User acknowledged the failure notice.
    NoticeDismissed,
    /// User activated the "Download PDF" link.
    DownloadClicked,
    /// The artifact download identified by `token` finished.
    DownloadSettled {
        token: RequestToken,
        outcome: DownloadOutcome,
    },
}

/// Result of one processing request as seen by the UI.
///
/// Every failure cause (rejected status, transport error, malformed body)
/// collapses into `Failed`; the detail is logged where it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Completed(NotesResult),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { path: String },
    Failed,
}
