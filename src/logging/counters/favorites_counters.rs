use crate::Status;

use super::counters::*;

pub struct FavoritesCounters;

impl FavoritesCounters {
    pub fn corrupt_data(key: &str, status: &Status) {
        error_counter(
            "favorites_corrupt_data",
            &format!("Discarding unreadable favorites under '{key}'"),
            status,
        )
    }

    pub fn write_fail(key: &str, entries: usize, status: &Status) {
        error_counter(
            "favorites_write_fail",
            &format!("Failed to persist {entries} favorites under '{key}'"),
            status,
        )
    }
}
