use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::{
    api::stores,
    documents::Deal,
    logging::{FetchCounters, FetchEvent, FetchResult},
    traits::DealSource,
    Status,
};

pub const DEFAULT_RETRIES: u32 = 3;
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch deals. Please try again later.";

/// Terminal result of a fetch call chain, retries included.
#[derive(Clone, PartialEq, Debug)]
pub enum FetchOutcome {
    /// Deals from supported stores, in the order the source returned them.
    Deals(Vec<Deal>),

    /// The source returned nothing, or nothing from a supported store.
    NoResults,

    /// All attempts failed or the response could not be decoded. Carries the
    /// message shown to the user.
    Failed(String),
}

pub struct DealFetcher<S: DealSource> {
    source: S,
    retry_delay: Duration,
}

impl<S: DealSource> DealFetcher<S> {
    pub fn new(source: S) -> Self {
        DealFetcher {
            source,
            retry_delay: Duration::ZERO,
        }
    }

    /// Waits `retry_delay` between failed attempts. Does not change the number
    /// of attempts.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Looks up deals for `query`, retrying transient failures up to
    /// `retries_remaining` times for a total of `retries_remaining + 1`
    /// attempts. `query` must not be empty.
    #[instrument(name = "fetcher::fetch", level = "info", skip(self))]
    pub async fn fetch(&self, query: &str, retries_remaining: u32) -> FetchOutcome {
        let mut retries_remaining = retries_remaining;
        let mut attempts = 0;

        let body = loop {
            attempts += 1;
            let response = self.source.search(query).await;
            FetchEvent::attempt(S::id(), query, attempts, &response);

            match response {
                Ok(body) => break body,
                Err(status) if retries_remaining > 0 => {
                    retries_remaining -= 1;
                    warn!("deals fetch attempt {attempts} for '{query}' failed: {status}");
                    FetchCounters::retry(query, retries_remaining, &status);
                    if !self.retry_delay.is_zero() {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(status) => {
                    FetchCounters::exhausted(query, attempts, &status);
                    return failed(query, attempts);
                }
            }
        };

        let deals = match decode(&body) {
            Ok(deals) => deals,
            Err(status) => {
                FetchCounters::decode_fail(query, &status);
                return failed(query, attempts);
            }
        };

        let raw = deals.len();
        let deals = normalize(deals);
        if deals.is_empty() {
            FetchCounters::no_results(query, raw);
            FetchEvent::completed(query, attempts, FetchResult::NoResults { raw });
            return FetchOutcome::NoResults;
        }

        info!("found {} supported deals for '{query}' ({raw} raw)", deals.len());
        FetchEvent::completed(
            query,
            attempts,
            FetchResult::Deals {
                raw,
                kept: deals.len(),
            },
        );
        FetchOutcome::Deals(deals)
    }
}

/// Keeps only deals listed on a supported store.
pub fn normalize(deals: Vec<Deal>) -> Vec<Deal> {
    deals
        .into_iter()
        .filter(|deal| stores::is_supported(&deal.store_id))
        .collect()
}

fn decode(body: &str) -> Result<Vec<Deal>, Status> {
    serde_json::from_str::<Vec<Deal>>(body).map_err(|e| {
        let msg = format!("Parse error: {}\n Deals response: {}", e, body);
        Status::internal(msg)
    })
}

fn failed(query: &str, attempts: usize) -> FetchOutcome {
    FetchEvent::completed(
        query,
        attempts,
        FetchResult::Failed(FETCH_FAILED_MESSAGE.to_owned()),
    );
    FetchOutcome::Failed(FETCH_FAILED_MESSAGE.to_owned())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    /// Replays scripted responses and counts lookups. Once the script runs
    /// out the last response is repeated.
    pub struct ScriptedSource {
        responses: Mutex<VecDeque<Result<String, Status>>>,
        last: Mutex<Option<Result<String, Status>>>,
        pub calls: AtomicUsize,
    }

    impl ScriptedSource {
        pub fn new(responses: Vec<Result<String, Status>>) -> Self {
            ScriptedSource {
                responses: Mutex::new(responses.into()),
                last: Mutex::new(None),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn always(response: Result<String, Status>) -> Self {
            ScriptedSource::new(vec![response])
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DealSource for ScriptedSource {
        fn id() -> String {
            String::from("scripted")
        }

        async fn search(&self, _title: &str) -> Result<String, Status> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.responses.lock().unwrap().pop_front();
            let mut last = self.last.lock().unwrap();
            match next {
                Some(response) => {
                    *last = Some(response.clone());
                    response
                }
                None => last
                    .clone()
                    .unwrap_or_else(|| Err(Status::internal("no scripted response"))),
            }
        }
    }

    pub fn deal_json(game_id: &str, store_id: &str, sale_price: &str) -> serde_json::Value {
        serde_json::json!({
            "gameID": game_id,
            "title": format!("Game {game_id}"),
            "storeID": store_id,
            "salePrice": sale_price,
            "normalPrice": "19.99",
            "isOnSale": "1",
            "savings": "50.0",
            "thumb": "https://example.com/thumb.jpg",
        })
    }

    pub fn body(deals: Vec<serde_json::Value>) -> String {
        serde_json::Value::Array(deals).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn unavailable() -> Result<String, Status> {
        Err(Status::unavailable("503 Service Unavailable"))
    }

    fn portal_body() -> String {
        body(vec![
            deal_json("1", "1", "1.99"),
            deal_json("2", "25", "2.99"),
            deal_json("3", "7", "3.99"),
            deal_json("4", "1", "4.99"),
            deal_json("5", "11", "5.99"),
        ])
    }

    #[tokio::test]
    async fn keeps_only_supported_stores() {
        let fetcher = DealFetcher::new(ScriptedSource::always(Ok(portal_body())));

        match fetcher.fetch("Portal", DEFAULT_RETRIES).await {
            FetchOutcome::Deals(deals) => {
                let ids: Vec<_> = deals.iter().map(|d| d.game_id.as_str()).collect();
                assert_eq!(ids, vec!["1", "3", "4"]);
            }
            outcome => panic!("unexpected outcome {outcome:?}"),
        }
        assert_eq!(fetcher.source().calls(), 1);
    }

    #[tokio::test]
    async fn empty_response_is_no_results() {
        let fetcher = DealFetcher::new(ScriptedSource::always(Ok("[]".to_owned())));

        assert_eq!(
            fetcher.fetch("Zzzznotagame", DEFAULT_RETRIES).await,
            FetchOutcome::NoResults
        );
        assert_eq!(fetcher.source().calls(), 1);
    }

    #[tokio::test]
    async fn unsupported_stores_only_is_no_results() {
        let source = ScriptedSource::always(Ok(body(vec![
            deal_json("1", "2", "1.99"),
            deal_json("2", "25", "2.99"),
        ])));
        let fetcher = DealFetcher::new(source);

        assert_eq!(fetcher.fetch("Epic", 0).await, FetchOutcome::NoResults);
    }

    #[tokio::test]
    async fn no_retries_means_single_attempt() {
        let fetcher = DealFetcher::new(ScriptedSource::always(unavailable()));

        assert_eq!(
            fetcher.fetch("Portal", 0).await,
            FetchOutcome::Failed(FETCH_FAILED_MESSAGE.to_owned())
        );
        assert_eq!(fetcher.source().calls(), 1);
    }

    #[tokio::test]
    async fn exhausts_retry_budget() {
        let fetcher = DealFetcher::new(ScriptedSource::always(unavailable()));

        assert_eq!(
            fetcher.fetch("Portal", 3).await,
            FetchOutcome::Failed(FETCH_FAILED_MESSAGE.to_owned())
        );
        assert_eq!(fetcher.source().calls(), 4);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let source = ScriptedSource::new(vec![unavailable(), unavailable(), Ok(portal_body())]);
        let fetcher = DealFetcher::new(source);

        assert!(matches!(
            fetcher.fetch("Portal", DEFAULT_RETRIES).await,
            FetchOutcome::Deals(deals) if deals.len() == 3
        ));
        assert_eq!(fetcher.source().calls(), 3);
    }

    #[tokio::test]
    async fn retry_delay_keeps_attempt_count() {
        let fetcher = DealFetcher::new(ScriptedSource::always(unavailable()))
            .with_retry_delay(Duration::from_millis(1));

        assert!(matches!(
            fetcher.fetch("Portal", 2).await,
            FetchOutcome::Failed(_)
        ));
        assert_eq!(fetcher.source().calls(), 3);
    }

    #[tokio::test]
    async fn malformed_body_fails_without_retry() {
        let fetcher = DealFetcher::new(ScriptedSource::always(Ok("<html>".to_owned())));

        assert_eq!(
            fetcher.fetch("Portal", DEFAULT_RETRIES).await,
            FetchOutcome::Failed(FETCH_FAILED_MESSAGE.to_owned())
        );
        assert_eq!(fetcher.source().calls(), 1);
    }
}
