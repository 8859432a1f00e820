use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{FavoritesEvent, FetchEvent};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum LogEvent {
    Fetch(FetchEvent),
    Favorites(FavoritesEvent),
}

impl LogEvent {
    pub fn encode(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                warn!("{}", e);
                String::default()
            }
        }
    }

    pub fn decode(json: &str) -> Option<LogEvent> {
        serde_json::from_str(json).ok()
    }
}

#[macro_export]
macro_rules! log_event {
    ($event:expr) => {
        ::tracing::debug!(event = $event.encode())
    };
}
