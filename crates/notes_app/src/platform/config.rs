use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use notes_engine::{ClientSettings, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "smart_notes.ron";
pub(crate) const LOG_FILENAME: &str = "smart_notes.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub endpoint: String,
    /// Where downloaded documents are saved.
    pub output_dir: PathBuf,
    pub request_timeout_secs: Option<u64>,
    pub max_artifact_bytes: u64,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_dir: PathBuf::from("output"),
            request_timeout_secs: None,
            max_artifact_bytes: client.max_artifact_bytes,
            log_to_file: true,
        }
    }
}

impl AppConfig {
    pub(crate) fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_artifact_bytes: self.max_artifact_bytes,
        }
    }
}

/// Reads `smart_notes.ron` from `dir`. A missing file yields the defaults;
/// an unreadable or unparseable one is an error the caller reports once
/// logging is up.
pub(crate) fn load_config(dir: &Path) -> anyhow::Result<AppConfig> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config from {path:?}"));
        }
    };

    ron::from_str::<AppConfig>(&content)
        .with_context(|| format!("failed to parse config from {path:?}"))
}
