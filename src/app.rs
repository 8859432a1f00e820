use tracing::{info, instrument, warn};

use crate::{
    deals::{pipeline, DealFetcher, FetchOutcome},
    documents::{Deal, FilterState},
    library::Favorites,
    traits::{DealSource, KeyValueStore},
    Status,
};

/// State behind the deal search screen: the last search outcome, the user's
/// filter selection and the favorites list.
///
/// Searches are tagged with a generation. Only the completion of the most
/// recently started search is applied, so a slow earlier search cannot
/// overwrite the results of a later one.
pub struct AppState<S: KeyValueStore> {
    pub filter: FilterState,

    query: String,
    results: Vec<Deal>,
    loading: bool,
    no_results: bool,
    error: Option<String>,
    generation: u64,
    favorites: Favorites<S>,
}

/// Handle of a started search, redeemed by `AppState::complete_search`.
#[derive(Debug)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(favorites: Favorites<S>) -> Self {
        AppState {
            filter: FilterState::default(),
            query: String::default(),
            results: vec![],
            loading: false,
            no_results: false,
            error: None,
            generation: 0,
            favorites,
        }
    }

    /// Marks a search for `query` as in flight. Returns None for a blank query,
    /// which leaves the state untouched.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.generation += 1;
        self.query = query.to_owned();
        self.loading = true;
        Some(SearchTicket {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Applies the outcome of the search behind `ticket`. Returns false and
    /// drops the outcome if a newer search has started since.
    pub fn complete_search(&mut self, ticket: SearchTicket, outcome: FetchOutcome) -> bool {
        if ticket.generation != self.generation {
            warn!(
                "dropping stale results for '{}' (search {} superseded by {})",
                ticket.query, ticket.generation, self.generation
            );
            return false;
        }

        self.loading = false;
        match outcome {
            FetchOutcome::Deals(deals) => {
                self.results = deals;
                self.no_results = false;
                self.error = None;
            }
            FetchOutcome::NoResults => {
                self.results.clear();
                self.no_results = true;
                self.error = None;
            }
            FetchOutcome::Failed(message) => {
                self.results.clear();
                self.no_results = false;
                self.error = Some(message);
            }
        }
        true
    }

    /// Runs a full search chain for `query` and applies its outcome.
    #[instrument(name = "search", level = "info", skip(self, fetcher))]
    pub async fn search<D: DealSource>(
        &mut self,
        fetcher: &DealFetcher<D>,
        query: &str,
        retries: u32,
    ) -> bool {
        let Some(ticket) = self.begin_search(query) else {
            return false;
        };

        let outcome = fetcher.fetch(ticket.query(), retries).await;
        self.complete_search(ticket, outcome)
    }

    /// Deals to display under the current filter selection.
    pub fn visible_deals(&self) -> Vec<Deal> {
        pipeline::apply(&self.results, &self.filter)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Deal] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn no_results(&self) -> bool {
        self.no_results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn favorites(&self) -> &Favorites<S> {
        &self.favorites
    }

    /// Bookmarks the listed deal with `game_id`.
    pub fn add_favorite(&mut self, game_id: &str) -> Result<&[Deal], Status> {
        let deal = self
            .results
            .iter()
            .find(|deal| deal.game_id == game_id)
            .cloned()
            .ok_or_else(|| {
                Status::not_found(format!("no listed deal with game_id={game_id}"))
            })?;

        info!("adding '{}' to favorites", deal.title);
        Ok(self.favorites.add(deal))
    }

    pub fn remove_favorite(&mut self, game_id: &str) -> &[Deal] {
        self.favorites.remove(game_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        deals::{
            testing::{body, deal_json, ScriptedSource},
            FETCH_FAILED_MESSAGE,
        },
        library::{MemoryStore, FAVORITES_KEY},
    };

    fn new_state() -> AppState<MemoryStore> {
        AppState::new(Favorites::load(MemoryStore::new()))
    }

    fn fetcher(response: Result<String, Status>) -> DealFetcher<ScriptedSource> {
        DealFetcher::new(ScriptedSource::always(response))
    }

    #[tokio::test]
    async fn search_with_supported_deals() {
        let mut state = new_state();
        let fetcher = fetcher(Ok(body(vec![
            deal_json("1", "1", "1.99"),
            deal_json("2", "1", "2.99"),
            deal_json("3", "7", "3.99"),
            deal_json("4", "25", "4.99"),
            deal_json("5", "2", "5.99"),
        ])));

        assert!(state.search(&fetcher, "Portal", 3).await);
        assert_eq!(state.results().len(), 3);
        assert!(!state.no_results());
        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn search_without_results() {
        let mut state = new_state();
        let fetcher = fetcher(Ok("[]".to_owned()));

        assert!(state.search(&fetcher, "Zzzznotagame", 3).await);
        assert!(state.no_results());
        assert!(state.results().is_empty());
        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn search_failure_sets_error() {
        let mut state = new_state();
        let fetcher = fetcher(Err(Status::unavailable("timeout")));

        assert!(state.search(&fetcher, "Portal", 3).await);
        assert_eq!(state.error(), Some(FETCH_FAILED_MESSAGE));
        assert!(state.results().is_empty());
        assert!(!state.no_results());
        assert!(!state.is_loading());
        assert_eq!(fetcher.source().calls(), 4);
    }

    #[tokio::test]
    async fn blank_query_is_a_no_op() {
        let mut state = new_state();
        let fetcher = fetcher(Ok("[]".to_owned()));

        assert!(!state.search(&fetcher, "   ", 3).await);
        assert_eq!(fetcher.source().calls(), 0);
        assert!(!state.is_loading());
        assert!(!state.no_results());
    }

    #[test]
    fn loading_until_completion() {
        let mut state = new_state();

        let ticket = state.begin_search("Portal").unwrap();
        assert!(state.is_loading());
        assert_eq!(state.query(), "Portal");

        state.complete_search(ticket, FetchOutcome::NoResults);
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_search_is_dropped() {
        let mut state = new_state();
        let slow = state.begin_search("Portal").unwrap();
        let fast = state.begin_search("Half-Life").unwrap();

        assert!(state.complete_search(fast, FetchOutcome::NoResults));
        assert!(!state.complete_search(
            slow,
            FetchOutcome::Failed(FETCH_FAILED_MESSAGE.to_owned())
        ));

        assert_eq!(state.query(), "Half-Life");
        assert!(state.no_results());
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn visible_deals_follow_filter() {
        let mut state = new_state();
        let fetcher = fetcher(Ok(body(vec![
            deal_json("cheap", "1", "15"),
            deal_json("pricey", "7", "30"),
        ])));
        state.search(&fetcher, "Portal", 0).await;

        state.filter.min_price = Some("10".to_owned());
        state.filter.max_price = Some("20".to_owned());

        let visible = state.visible_deals();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].game_id, "cheap");
        assert_eq!(state.results().len(), 2);
    }

    #[tokio::test]
    async fn favorite_listed_deal() {
        let mut state = new_state();
        let fetcher = fetcher(Ok(body(vec![deal_json("X", "1", "4.99")])));
        state.search(&fetcher, "Portal", 0).await;

        assert_eq!(state.add_favorite("X").unwrap().len(), 1);
        assert!(matches!(state.add_favorite("Y"), Err(Status::NotFound(_))));

        assert!(state.remove_favorite("X").is_empty());
        assert_eq!(
            state.favorites().store().get(FAVORITES_KEY),
            Ok(Some("[]".to_owned()))
        );
    }
}
