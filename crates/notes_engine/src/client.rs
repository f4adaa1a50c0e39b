use std::time::Duration;

use futures_util::StreamExt;
use url::Url;

use crate::{FailureKind, NotesResponse, ProcessError, ProcessRequest};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001/process";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Full URL of the processing route.
    pub endpoint: String,
    /// `None` waits for the transport to settle on its own.
    pub request_timeout: Option<Duration>,
    pub max_artifact_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
            max_artifact_bytes: 50 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait NotesClient: Send + Sync {
    /// Posts `video_url` to the processing endpoint and parses the reply.
    async fn process(&self, video_url: &str) -> Result<NotesResponse, ProcessError>;

    /// Downloads the artifact behind `reference`, which may be relative to
    /// the endpoint.
    async fn download(&self, reference: &str) -> Result<Vec<u8>, ProcessError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestNotesClient {
    settings: ClientSettings,
}

impl ReqwestNotesClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ProcessError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ProcessError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint_url(&self) -> Result<Url, ProcessError> {
        Url::parse(&self.settings.endpoint)
            .map_err(|err| ProcessError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    /// Resolves an artifact reference against the endpoint. Absolute
    /// references are returned unchanged.
    pub fn resolve_artifact_url(&self, reference: &str) -> Result<Url, ProcessError> {
        self.endpoint_url()?
            .join(reference)
            .map_err(|err| ProcessError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
impl NotesClient for ReqwestNotesClient {
    async fn process(&self, video_url: &str) -> Result<NotesResponse, ProcessError> {
        let endpoint = self.endpoint_url()?;
        let client = self.build_client()?;

        let response = client
            .post(endpoint.as_str())
            .json(&ProcessRequest { video_url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProcessError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice::<NotesResponse>(&body)
            .map_err(|err| ProcessError::new(FailureKind::MalformedBody, err.to_string()))
    }

    async fn download(&self, reference: &str) -> Result<Vec<u8>, ProcessError> {
        let url = self.resolve_artifact_url(reference)?;
        let client = self.build_client()?;
        let max_bytes = self.settings.max_artifact_bytes;

        let response = client
            .get(url.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProcessError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ProcessError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "artifact too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ProcessError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "artifact too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProcessError {
    if err.is_timeout() {
        return ProcessError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ProcessError::new(FailureKind::MalformedBody, err.to_string());
    }
    ProcessError::new(FailureKind::Network, err.to_string())
}
