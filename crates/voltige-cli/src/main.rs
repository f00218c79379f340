mod catalog;
mod recent;
mod suggest;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "voltige-cli")]
#[command(about = "Voltige storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the catalog through the storefront filter pipeline
    Catalog(catalog::CatalogArgs),
    /// Fetch navigation suggestions for a search term
    Suggest(suggest::SuggestArgs),
    /// Show or clear the persisted recent searches
    Recent {
        /// Forget every stored search
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = voltige_core::load_app_config()?;
    let cli = Cli::parse();
    match cli.command {
        Commands::Catalog(args) => catalog::run_catalog(&config, &args).await,
        Commands::Suggest(args) => suggest::run_suggest(&config, &args).await,
        Commands::Recent { clear } => recent::run_recent(&config, clear),
    }
}
