use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub type RequestToken = u64;

/// JSON body posted to the processing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRequest<'a> {
    pub video_url: &'a str,
}

/// JSON body returned by the processing endpoint. Both fields are optional;
/// `null` is treated the same as a missing field and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NotesResponse {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RequestCompleted {
        token: RequestToken,
        result: Result<NotesResponse, ProcessError>,
    },
    ArtifactSaved {
        token: RequestToken,
        result: Result<PathBuf, ProcessError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessError {
    pub kind: FailureKind,
    pub message: String,
}

impl ProcessError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ProcessError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Network,
    Timeout,
    MalformedBody,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Persist,
    /// A newer download started before this one could be saved.
    Superseded,
    EngineStopped,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Persist => write!(f, "could not save artifact"),
            FailureKind::Superseded => write!(f, "superseded by a newer download"),
            FailureKind::EngineStopped => write!(f, "engine stopped"),
        }
    }
}
