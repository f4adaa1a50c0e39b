//! Smart Notes engine: network IO and artifact persistence.
mod client;
mod engine;
mod persist;
mod types;

pub use client::{ClientSettings, NotesClient, ReqwestNotesClient, DEFAULT_ENDPOINT};
pub use engine::{EngineHandle, EngineReply};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, FailureKind, NotesResponse, ProcessError, ProcessRequest, RequestToken,
};
