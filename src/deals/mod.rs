pub mod currency;
mod fetcher;
pub mod pipeline;

pub use fetcher::{
    normalize, DealFetcher, FetchOutcome, DEFAULT_RETRIES, FETCH_FAILED_MESSAGE,
};

#[cfg(test)]
pub(crate) use fetcher::testing;
