mod deal;
mod filter_state;

pub use deal::Deal;
pub use filter_state::{FilterState, PlatformFilter, SortOption};
