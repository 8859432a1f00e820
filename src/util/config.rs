use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::{api::CHEAPSHARK_HOST, deals::DEFAULT_RETRIES, Status};

use super::paths;

/// Settings read from a JSON file. Every field is optional in the file.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Config {
    /// Base URL of the deals API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Retries after a failed lookup; total attempts are `retries + 1`.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Pause between failed attempts.
    #[serde(default)]
    pub retry_delay_ms: u64,

    /// Directory holding the favorites document.
    #[serde(default = "paths::home_dir")]
    pub storage_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            retries: default_retries(),
            retry_delay_ms: 0,
            storage_dir: paths::home_dir(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, Status> {
        let text = fs::read_to_string(path)?;
        Config::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Config, Status> {
        serde_json::from_str(text)
            .map_err(|e| Status::invalid_argument(format!("invalid config: {e}")))
    }

    /// Loads `path` if given, otherwise the default config file. A missing
    /// default file yields the default settings.
    pub fn load(path: Option<&Path>) -> Result<Config, Status> {
        match path {
            Some(path) => Config::from_file(path),
            None => {
                let path = paths::default_config();
                match fs::read_to_string(&path) {
                    Ok(text) => Config::parse(&text),
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        debug!("no config at {}, using defaults", path.display());
                        Ok(Config::default())
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn default_api_url() -> String {
    CHEAPSHARK_HOST.to_owned()
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}
