mod cheapshark;
pub mod stores;

pub use cheapshark::{CheapSharkApi, CHEAPSHARK_HOST};
