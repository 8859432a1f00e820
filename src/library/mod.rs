mod favorites;
mod storage;

pub use favorites::{Favorites, FAVORITES_KEY};
pub use storage::{FileStore, MemoryStore};
