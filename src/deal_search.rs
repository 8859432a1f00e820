use clap::Parser;
use game_deals::{
    api::{stores, CheapSharkApi},
    app::AppState,
    deals::{currency, DealFetcher},
    documents::{Deal, FilterState, PlatformFilter, SortOption},
    library::{Favorites, FileStore},
    util::config::Config,
    Status, Tracing,
};
use itertools::Itertools;
use std::path::PathBuf;

/// Searches Steam and GOG deals for a game title.
#[derive(Parser)]
struct Opts {
    /// Game title to search deals for.
    #[clap(short, long)]
    title: String,

    /// Ordering of the listing: price (ascending) or discount (descending).
    #[clap(long, default_value = "price")]
    sort: String,

    /// Restrict the listing to one store: all, steam or gog.
    #[clap(long, default_value = "all")]
    platform: PlatformFilter,

    /// Lowest price to list, in EUR.
    #[clap(long)]
    min_price: Option<String>,

    /// Highest price to list, in EUR.
    #[clap(long)]
    max_price: Option<String>,

    /// Retries after a failed lookup. Overrides the config file.
    #[clap(long)]
    retries: Option<u32>,

    /// Bookmark the listed deal with this game id.
    #[clap(long)]
    favorite: Option<String>,

    /// JSON config file. Defaults to ~/.game_deals/config.json.
    #[clap(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    Tracing::setup("deal_search")?;

    let opts: Opts = Opts::parse();
    let config = Config::load(opts.config.as_deref())?;

    let fetcher = DealFetcher::new(CheapSharkApi::new(&config.api_url))
        .with_retry_delay(config.retry_delay());
    let favorites = Favorites::load(FileStore::new(&config.storage_dir));

    let mut state = AppState::new(favorites);
    state.filter = FilterState {
        sort: SortOption::from(opts.sort.as_str()),
        platform: opts.platform,
        min_price: opts.min_price,
        max_price: opts.max_price,
    };

    let retries = opts.retries.unwrap_or(config.retries);
    if !state.search(&fetcher, &opts.title, retries).await {
        return Err(Status::invalid_argument("search title must not be empty"));
    }

    if let Some(error) = state.error() {
        println!("{error}");
        return Ok(());
    }
    if state.no_results() {
        println!("No deals found for '{}'.", state.query());
        return Ok(());
    }

    let deals = state.visible_deals();
    println!(
        "Found {} deals ({} listed).\n{}",
        state.results().len(),
        deals.len(),
        deals
            .iter()
            .map(|deal| render(deal, state.favorites().contains(&deal.game_id)))
            .join("\n")
    );

    if let Some(game_id) = opts.favorite {
        let favorites = state.add_favorite(&game_id)?;
        println!("Favorites: {}", favorites.len());
    }

    Ok(())
}

fn render(deal: &Deal, favorite: bool) -> String {
    format!(
        "{} [{}] {} ({}, was {}, -{}%) id={}",
        if favorite { "*" } else { " " },
        stores::name_for(&deal.store_id),
        deal.title,
        currency::format_display(currency::to_display(deal.sale_price)),
        currency::format_display(currency::to_display(deal.normal_price)),
        deal.savings.round(),
        deal.game_id,
    )
}
