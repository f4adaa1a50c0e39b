use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use tokio::sync::oneshot;

use crate::client::{ClientSettings, NotesClient, ReqwestNotesClient};
use crate::persist::AtomicFileWriter;
use crate::{EngineEvent, FailureKind, ProcessError, RequestToken};

enum EngineCommand {
    Submit {
        token: RequestToken,
        video_url: String,
        reply: oneshot::Sender<EngineEvent>,
    },
    Download {
        token: RequestToken,
        reference: String,
        file_name: String,
        reply: oneshot::Sender<EngineEvent>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyKind {
    Request,
    Artifact,
}

/// Pending answer to one engine command.
///
/// Resolves on whatever executor awaits it; the network work itself runs on
/// the engine's own runtime thread.
#[derive(Debug)]
pub struct EngineReply {
    token: RequestToken,
    kind: ReplyKind,
    rx: oneshot::Receiver<EngineEvent>,
}

impl EngineReply {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub async fn wait(self) -> EngineEvent {
        match self.rx.await {
            Ok(event) => event,
            Err(_) => {
                engine_error!("Engine dropped reply for token={}", self.token);
                let err = ProcessError::new(FailureKind::EngineStopped, "engine thread is gone");
                match self.kind {
                    ReplyKind::Request => EngineEvent::RequestCompleted {
                        token: self.token,
                        result: Err(err),
                    },
                    ReplyKind::Artifact => EngineEvent::ArtifactSaved {
                        token: self.token,
                        result: Err(err),
                    },
                }
            }
        }
    }
}

/// Newest download token handed out. Every artifact lands on the same file
/// name, so only the newest download may write it.
type LatestDownload = Arc<Mutex<RequestToken>>;

#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    latest_download: LatestDownload,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, output_dir: PathBuf) -> Self {
        Self::with_client(Arc::new(ReqwestNotesClient::new(settings)), output_dir)
    }

    pub fn with_client(client: Arc<dyn NotesClient>, output_dir: PathBuf) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let writer = Arc::new(AtomicFileWriter::new(output_dir));
        let latest_download: LatestDownload = Arc::new(Mutex::new(0));
        let engine_latest = latest_download.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let writer = writer.clone();
                let latest = engine_latest.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), writer.as_ref(), &latest, command).await;
                });
            }
        });

        Self {
            cmd_tx,
            latest_download,
        }
    }

    pub fn submit(&self, token: RequestToken, video_url: impl Into<String>) -> EngineReply {
        let (reply, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            token,
            video_url: video_url.into(),
            reply,
        });
        EngineReply {
            token,
            kind: ReplyKind::Request,
            rx,
        }
    }

    pub fn download(
        &self,
        token: RequestToken,
        reference: impl Into<String>,
        file_name: impl Into<String>,
    ) -> EngineReply {
        if let Ok(mut latest) = self.latest_download.lock() {
            *latest = (*latest).max(token);
        }
        let (reply, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(EngineCommand::Download {
            token,
            reference: reference.into(),
            file_name: file_name.into(),
            reply,
        });
        EngineReply {
            token,
            kind: ReplyKind::Artifact,
            rx,
        }
    }
}

async fn handle_command(
    client: &dyn NotesClient,
    writer: &AtomicFileWriter,
    latest_download: &Mutex<RequestToken>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Submit {
            token,
            video_url,
            reply,
        } => {
            engine_info!(
                "Submitting token={} url_len={} url={}",
                token,
                video_url.len(),
                video_url
            );
            let result = client.process(&video_url).await;
            match &result {
                Ok(response) => engine_info!(
                    "Request token={} succeeded summary_len={} pdf_url={:?}",
                    token,
                    response.summary.as_deref().map_or(0, str::len),
                    response.pdf_url
                ),
                Err(err) => engine_warn!("Request token={} failed: {}", token, err),
            }
            let _ = reply.send(EngineEvent::RequestCompleted { token, result });
        }
        EngineCommand::Download {
            token,
            reference,
            file_name,
            reply,
        } => {
            engine_info!("Downloading artifact token={} from {}", token, reference);
            let result = match client.download(&reference).await {
                Ok(bytes) => persist_if_latest(writer, latest_download, token, &file_name, &bytes),
                Err(err) => Err(err),
            };
            match &result {
                Ok(path) => engine_info!("Artifact token={} saved to {:?}", token, path),
                Err(err) => engine_warn!("Artifact token={} failed: {}", token, err),
            }
            let _ = reply.send(EngineEvent::ArtifactSaved { token, result });
        }
    }
}

/// Writes the artifact only while `token` is still the newest download. The
/// lock is held across the write so a newer download cannot be overwritten
/// by one that finishes later.
fn persist_if_latest(
    writer: &AtomicFileWriter,
    latest_download: &Mutex<RequestToken>,
    token: RequestToken,
    file_name: &str,
    bytes: &[u8],
) -> Result<PathBuf, ProcessError> {
    let latest = latest_download
        .lock()
        .map_err(|_| ProcessError::new(FailureKind::Persist, "download lock poisoned"))?;
    if *latest != token {
        engine_debug!(
            "Artifact token={} superseded by token={}, not writing",
            token,
            *latest
        );
        return Err(ProcessError::new(
            FailureKind::Superseded,
            format!("newer download token={} in flight", *latest),
        ));
    }
    writer
        .write(file_name, bytes)
        .map_err(|err| ProcessError::new(FailureKind::Persist, err.to_string()))
}
