pub const APP_TITLE: &str = "Smart Learning Notes";
pub const INPUT_PLACEHOLDER: &str = "Enter YouTube Video URL";
pub const SUBMIT_LABEL_IDLE: &str = "Generate Notes";
pub const SUBMIT_LABEL_BUSY: &str = "Processing...";
pub const SUMMARY_HEADING: &str = "Summary:";
pub const DOWNLOAD_LABEL: &str = "Download PDF";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub busy: bool,
    pub submit_enabled: bool,
    /// Present only when the summary is non-empty.
    pub results: Option<ResultsView>,
    pub notice: Option<String>,
    pub download_status: Option<String>,
}

impl AppViewModel {
    pub fn submit_label(&self) -> &'static str {
        if self.busy {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub summary: String,
    pub download: Option<DownloadLinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLinkView {
    pub url: String,
    pub file_name: String,
    pub enabled: bool,
}
