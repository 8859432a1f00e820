mod counters;
mod favorites_counters;
mod fetch_counters;

pub use favorites_counters::FavoritesCounters;
pub use fetch_counters::FetchCounters;
