use phf::phf_map;

pub const STEAM_STORE_ID: &str = "1";
pub const GOG_STORE_ID: &str = "7";
pub const UNKNOWN_STORE: &str = "Unknown Store";

static STORES: phf::Map<&'static str, &'static str> = phf_map! {
    "1" => "Steam",
    "7" => "GOG",
};

/// Returns the human-readable name of a deals API store id.
pub fn name_for(store_id: &str) -> &'static str {
    STORES.get(store_id).copied().unwrap_or(UNKNOWN_STORE)
}

/// True for the marketplaces kept after normalization.
pub fn is_supported(store_id: &str) -> bool {
    STORES.contains_key(store_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_stores() {
        assert_eq!(name_for(STEAM_STORE_ID), "Steam");
        assert_eq!(name_for(GOG_STORE_ID), "GOG");
    }

    #[test]
    fn unknown_stores() {
        for id in ["", "0", "2", "11", "25", "steam", " 1", "1 "] {
            assert_eq!(name_for(id), UNKNOWN_STORE, "store id '{id}'");
            assert!(!is_supported(id));
        }
    }

    #[test]
    fn supported_stores() {
        assert!(is_supported(STEAM_STORE_ID));
        assert!(is_supported(GOG_STORE_ID));
    }
}
