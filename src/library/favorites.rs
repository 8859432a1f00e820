use tracing::{debug, instrument, warn};

use crate::{
    documents::Deal,
    logging::{FavoritesCounters, FavoritesEvent},
    traits::KeyValueStore,
    Status,
};

pub const FAVORITES_KEY: &str = "favorites";

/// User bookmarked deals, mirrored to durable storage on every change.
///
/// The in-memory list is authoritative. A failed write is logged and the next
/// successful write catches storage up with the full list.
pub struct Favorites<S: KeyValueStore> {
    store: S,
    entries: Vec<Deal>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Reads favorites from `store`. Missing or unreadable data yields an empty
    /// list.
    #[instrument(name = "favorites::load", level = "trace", skip(store))]
    pub fn load(store: S) -> Self {
        let entries = match read(&store) {
            Ok(entries) => {
                FavoritesEvent::load(FAVORITES_KEY, entries.len(), None);
                entries
            }
            Err(status) => {
                warn!("ignoring stored favorites: {status}");
                FavoritesCounters::corrupt_data(FAVORITES_KEY, &status);
                FavoritesEvent::load(FAVORITES_KEY, 0, Some(status.to_string()));
                vec![]
            }
        };

        Favorites { store, entries }
    }

    pub fn entries(&self) -> &[Deal] {
        &self.entries
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.entries.iter().any(|e| e.game_id == game_id)
    }

    /// Appends `deal`. The same game can be added more than once.
    #[instrument(
        name = "favorites::add",
        level = "trace",
        skip(self, deal),
        fields(game_id = %deal.game_id)
    )]
    pub fn add(&mut self, deal: Deal) -> &[Deal] {
        add(deal, &mut self.entries);
        self.persist();
        &self.entries
    }

    /// Removes every entry of `game_id`.
    #[instrument(name = "favorites::remove", level = "trace", skip(self))]
    pub fn remove(&mut self, game_id: &str) -> &[Deal] {
        if !remove(game_id, &mut self.entries) {
            debug!("no favorite with game_id={game_id}");
        }
        self.persist();
        &self.entries
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&self) {
        if let Err(status) = write(&self.store, &self.entries) {
            warn!("favorites not persisted: {status}");
            FavoritesCounters::write_fail(FAVORITES_KEY, self.entries.len(), &status);
            FavoritesEvent::write(FAVORITES_KEY, self.entries.len(), Some(status.to_string()));
            return;
        }
        FavoritesEvent::write(FAVORITES_KEY, self.entries.len(), None);
    }
}

fn add(deal: Deal, favorites: &mut Vec<Deal>) {
    favorites.push(deal);
}

fn remove(game_id: &str, favorites: &mut Vec<Deal>) -> bool {
    let original_len = favorites.len();
    favorites.retain(|e| e.game_id != game_id);
    favorites.len() != original_len
}

fn read(store: &impl KeyValueStore) -> Result<Vec<Deal>, Status> {
    match store.get(FAVORITES_KEY)? {
        Some(text) => Ok(serde_json::from_str(&text)?),
        None => Ok(vec![]),
    }
}

fn write(store: &impl KeyValueStore, favorites: &[Deal]) -> Result<(), Status> {
    store.set(FAVORITES_KEY, &serde_json::to_string(favorites)?)
}
