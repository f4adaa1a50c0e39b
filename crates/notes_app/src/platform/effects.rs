use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info};
use iced::Task;
use notes_core::{DownloadOutcome, Effect, Msg, NotesResult, RequestOutcome};
use notes_engine::{ClientSettings, EngineEvent, EngineHandle};

/// Turns core effects into engine commands and feeds their replies back as
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, output_dir: PathBuf) -> Self {
        engine_info!(
            "Engine endpoint={} output_dir={:?}",
            settings.endpoint,
            output_dir
        );
        Self {
            engine: EngineHandle::new(settings, output_dir),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) -> Task<Msg> {
        Task::batch(effects.into_iter().map(|effect| self.run_one(effect)))
    }

    fn run_one(&self, effect: Effect) -> Task<Msg> {
        match effect {
            Effect::SubmitVideo { token, video_url } => {
                let reply = self.engine.submit(token, video_url);
                Task::perform(reply.wait(), map_event)
            }
            Effect::DownloadArtifact {
                token,
                url,
                file_name,
            } => {
                let reply = self.engine.download(token, url, file_name);
                Task::perform(reply.wait(), map_event)
            }
        }
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RequestCompleted { token, result } => {
            let outcome = match result {
                Ok(response) => RequestOutcome::Completed(NotesResult {
                    summary: response.summary.unwrap_or_default(),
                    pdf_url: response.pdf_url,
                }),
                Err(err) => {
                    engine_debug!("Collapsing request failure token={}: {}", token, err);
                    RequestOutcome::Failed
                }
            };
            Msg::RequestSettled { token, outcome }
        }
        EngineEvent::ArtifactSaved { token, result } => {
            let outcome = match result {
                Ok(path) => DownloadOutcome::Saved {
                    path: path.display().to_string(),
                },
                Err(_) => DownloadOutcome::Failed,
            };
            Msg::DownloadSettled { token, outcome }
        }
    }
}
