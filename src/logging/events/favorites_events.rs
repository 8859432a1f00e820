use serde::{Deserialize, Serialize};

use crate::{log_event, logging::LogEvent};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum FavoritesEvent {
    Load(Access),
    Write(Access),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Access {
    key: String,
    entries: usize,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FavoritesEvent {
    pub fn load(key: &str, entries: usize, error: Option<String>) {
        log_event!(LogEvent::Favorites(FavoritesEvent::Load(Access {
            key: key.to_owned(),
            entries,
            error,
        })));
    }

    pub fn write(key: &str, entries: usize, error: Option<String>) {
        log_event!(LogEvent::Favorites(FavoritesEvent::Write(Access {
            key: key.to_owned(),
            entries,
            error,
        })));
    }
}
