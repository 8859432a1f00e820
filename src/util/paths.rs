//! All local data lives under `~/.game_deals/`:
//! - `~/.game_deals/config.json` - optional configuration
//! - `~/.game_deals/favorites.json` - bookmarked deals

use std::path::PathBuf;

/// Returns the game_deals home directory (`~/.game_deals/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".game_deals")
}

/// Returns the default config file path (`~/.game_deals/config.json`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_in_home_dir() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(config.ends_with("config.json"));
    }
}
