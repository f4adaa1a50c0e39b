use crate::RequestToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the video URL to the processing endpoint.
    SubmitVideo {
        token: RequestToken,
        video_url: String,
    },
    /// Fetch the generated document and store it under `file_name`.
    DownloadArtifact {
        token: RequestToken,
        url: String,
        file_name: String,
    },
}
