mod favorites_events;
mod fetch_events;

pub use favorites_events::*;
pub use fetch_events::*;
