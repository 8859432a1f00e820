use crate::Status;

use super::counters::*;

pub struct FetchCounters;

impl FetchCounters {
    pub fn retry(query: &str, retries_remaining: u32, status: &Status) {
        error_counter(
            "fetch_retry",
            &format!("Deals fetch for '{query}' failed, {retries_remaining} retries left"),
            status,
        )
    }

    pub fn exhausted(query: &str, attempts: usize, status: &Status) {
        error_counter(
            "fetch_exhausted",
            &format!("Deals fetch for '{query}' failed after {attempts} attempts"),
            status,
        )
    }

    pub fn decode_fail(query: &str, status: &Status) {
        error_counter(
            "fetch_decode_fail",
            &format!("Deals response for '{query}' could not be decoded"),
            status,
        )
    }

    pub fn no_results(query: &str, raw: usize) {
        counter(
            "fetch_no_results",
            &format!("No supported deals for '{query}' ({raw} raw results)"),
        )
    }
}
