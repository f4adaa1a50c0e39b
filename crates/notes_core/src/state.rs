use crate::view_model::{AppViewModel, DownloadLinkView, ResultsView};

pub type RequestToken = u64;

/// Text of the blocking notice shown for every failed request.
pub const FAILURE_NOTICE: &str = "Error processing video. Please try again.";

/// Suggested file name for the downloaded document.
pub const ARTIFACT_FILENAME: &str = "summary.pdf";

/// Fields returned by a successful processing request, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotesResult {
    pub summary: String,
    pub pdf_url: Option<String>,
}

/// Lifecycle of the most recent processing request.
///
/// The busy flag is derived from `Pending`; results only exist inside
/// `Succeeded`, so starting a new request drops them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending {
        token: RequestToken,
    },
    Succeeded(NotesResult),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadState {
    #[default]
    Idle,
    Saving {
        token: RequestToken,
    },
    Saved {
        path: String,
    },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    request: RequestState,
    download: DownloadState,
    notice: Option<String>,
    last_token: RequestToken,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn download(&self) -> &DownloadState {
        &self.download
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.request, RequestState::Pending { .. })
    }

    /// Summary of the last successful request, empty when there is none.
    pub fn summary(&self) -> &str {
        match &self.request {
            RequestState::Succeeded(result) => &result.summary,
            _ => "",
        }
    }

    pub fn pdf_url(&self) -> Option<&str> {
        match &self.request {
            RequestState::Succeeded(result) => result.pdf_url.as_deref(),
            _ => None,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let results = if self.summary().is_empty() {
            None
        } else {
            Some(ResultsView {
                summary: self.summary().to_string(),
                download: self.pdf_url().map(|url| DownloadLinkView {
                    url: url.to_string(),
                    file_name: ARTIFACT_FILENAME.to_string(),
                    enabled: !matches!(self.download, DownloadState::Saving { .. }),
                }),
            })
        };

        AppViewModel {
            input: self.input.clone(),
            busy: self.is_busy(),
            submit_enabled: !self.is_busy(),
            results,
            notice: self.notice.clone(),
            download_status: self.download_status(),
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, value: String) {
        if self.input != value {
            self.input = value;
            self.mark_dirty();
        }
    }

    /// Enters `Pending` with a fresh token, discarding results, notice and
    /// download status of the previous attempt.
    pub(crate) fn begin_request(&mut self) -> RequestToken {
        let token = self.next_token();
        self.request = RequestState::Pending { token };
        self.download = DownloadState::Idle;
        self.notice = None;
        self.mark_dirty();
        token
    }

    /// Applies a settlement for `token`. Returns `false` when the token is
    /// not the one currently pending.
    pub(crate) fn settle_request(&mut self, token: RequestToken, result: Option<NotesResult>) -> bool {
        match self.request {
            RequestState::Pending { token: pending } if pending == token => {}
            _ => return false,
        }
        match result {
            Some(result) => {
                self.request = RequestState::Succeeded(result);
            }
            None => {
                self.request = RequestState::Failed;
                self.notice = Some(FAILURE_NOTICE.to_string());
            }
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Starts a download of the current artifact, if there is one and no
    /// download is already running.
    pub(crate) fn begin_download(&mut self) -> Option<(RequestToken, String)> {
        if matches!(self.download, DownloadState::Saving { .. }) {
            return None;
        }
        let url = self.pdf_url()?.to_string();
        let token = self.next_token();
        self.download = DownloadState::Saving { token };
        self.mark_dirty();
        Some((token, url))
    }

    pub(crate) fn settle_download(&mut self, token: RequestToken, path: Option<String>) -> bool {
        match self.download {
            DownloadState::Saving { token: pending } if pending == token => {}
            _ => return false,
        }
        self.download = match path {
            Some(path) => DownloadState::Saved { path },
            None => DownloadState::Failed,
        };
        self.mark_dirty();
        true
    }

    fn next_token(&mut self) -> RequestToken {
        self.last_token += 1;
        self.last_token
    }

    fn download_status(&self) -> Option<String> {
        match &self.download {
            DownloadState::Idle => None,
            DownloadState::Saving { .. } => Some(format!("Saving {ARTIFACT_FILENAME}...")),
            DownloadState::Saved { path } => Some(format!("Saved to {path}")),
            DownloadState::Failed => Some("Download failed".to_string()),
        }
    }
}
