use serde::{Deserialize, Serialize};

use crate::{log_event, logging::LogEvent, Status};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum FetchEvent {
    Attempt(Attempt),
    Completed(Completed),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Attempt {
    source: String,
    query: String,
    attempt: usize,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Completed {
    query: String,
    attempts: usize,
    result: FetchResult,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum FetchResult {
    Deals { raw: usize, kept: usize },
    NoResults { raw: usize },
    Failed(String),
}

impl FetchEvent {
    pub fn attempt(source: String, query: &str, attempt: usize, response: &Result<String, Status>) {
        log_event!(LogEvent::Fetch(FetchEvent::Attempt(Attempt {
            source,
            query: query.to_owned(),
            attempt,
            error: match response {
                Ok(_) => None,
                Err(status) => Some(status.to_string()),
            },
        })))
    }

    pub fn completed(query: &str, attempts: usize, result: FetchResult) {
        log_event!(LogEvent::Fetch(FetchEvent::Completed(Completed {
            query: query.to_owned(),
            attempts,
            result,
        })))
    }
}
