use clap::{Parser, Subcommand};
use game_deals::{
    api::stores,
    deals::currency,
    library::{Favorites, FileStore},
    util::config::Config,
    Status, Tracing,
};
use std::path::PathBuf;

/// Inspects and edits bookmarked deals.
#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,

    /// JSON config file. Defaults to ~/.game_deals/config.json.
    #[clap(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print all favorites in the order they were added.
    List,

    /// Remove every favorite of a game.
    Remove {
        #[clap(long)]
        game_id: String,
    },
}

fn main() -> Result<(), Status> {
    Tracing::setup("utils/favorites")?;

    let opts: Opts = Opts::parse();
    let config = Config::load(opts.config.as_deref())?;
    let mut favorites = Favorites::load(FileStore::new(&config.storage_dir));

    let entries = match opts.command {
        Command::List => favorites.entries(),
        Command::Remove { game_id } => favorites.remove(&game_id),
    };

    println!("{} favorites", entries.len());
    for deal in entries {
        println!(
            "[{}] {} {} id={}",
            stores::name_for(&deal.store_id),
            deal.title,
            currency::format_display(currency::to_display(deal.sale_price)),
            deal.game_id,
        );
    }

    Ok(())
}
