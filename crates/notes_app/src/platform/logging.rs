//! Platform logging initialization for the Smart Notes app.
//!
//! Logs go to the terminal and, when enabled, to `./smart_notes.log`.

use std::path::Path;

use engine_logging::LogDestination;
use log::LevelFilter;

use super::config::{AppConfig, LOG_FILENAME};

pub(crate) fn destination_for(config: &AppConfig, dir: &Path) -> LogDestination {
    if config.log_to_file {
        LogDestination::Both(dir.join(LOG_FILENAME))
    } else {
        LogDestination::Terminal
    }
}

pub(crate) fn initialize(config: &AppConfig, dir: &Path) {
    engine_logging::initialize(&destination_for(config, dir), LevelFilter::Info);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_follows_config() {
        let dir = Path::new("/tmp/notes");
        let mut config = AppConfig::default();

        assert_eq!(
            destination_for(&config, dir),
            LogDestination::Both(dir.join("smart_notes.log"))
        );

        config.log_to_file = false;
        assert_eq!(destination_for(&config, dir), LogDestination::Terminal);
    }
}
