use std::path::PathBuf;

use anyhow::Context;
use engine_logging::{engine_debug, engine_info, engine_warn};
use iced::{Element, Task};
use notes_core::{update, AppState, Msg, APP_TITLE};

use super::config::{load_config, AppConfig};
use super::effects::EffectRunner;
use super::{logging, ui};

pub fn run_app() -> anyhow::Result<()> {
    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let loaded = load_config(&work_dir);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::initialize(&config, &work_dir);
    if let Err(err) = &loaded {
        engine_warn!("Using default config: {:#}", err);
    }
    engine_info!("Starting {} endpoint={}", APP_TITLE, config.endpoint);

    iced::application(
        move || NotesApp::new(&config),
        NotesApp::update,
        NotesApp::view,
    )
    .title(APP_TITLE)
    .window_size((ui::constants::WINDOW_WIDTH, ui::constants::WINDOW_HEIGHT))
    .run()
    .context("Smart Notes window failed")
}

struct NotesApp {
    state: AppState,
    effects: EffectRunner,
}

impl NotesApp {
    fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::new(),
            effects: EffectRunner::new(config.client_settings(), config.output_dir.clone()),
        }
    }

    fn update(&mut self, msg: Msg) -> Task<Msg> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            engine_debug!(
                "State changed busy={} notice={}",
                state.is_busy(),
                state.notice().is_some()
            );
        }
        self.state = state;
        self.effects.run(effects)
    }

    fn view(&self) -> Element<'_, Msg> {
        ui::render::render(&self.state.view())
    }
}
