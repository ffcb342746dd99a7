use clap::{Parser, Subcommand};

use lyricsd::cli::{config as config_cmd, lookup, serve};
use lyricsd::config::Config;
use lyricsd::error::Result;
use lyricsd::utils;

#[derive(Parser)]
#[command(name = "lyricsd")]
#[command(about = "Caching lookup service for song lyrics, backed by LRCLIB")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP lookup service
    Serve(serve::ServeArgs),

    /// Resolve lyrics for a single track and print them
    Lookup(lookup::LookupArgs),

    /// Show or edit configuration
    Config(config_cmd::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose).map_err(lyricsd::error::LyricsdError::Internal)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => serve::execute(args, &config).await,
        Commands::Lookup(args) => lookup::execute(args, &config).await,
        Commands::Config(args) => config_cmd::execute(args, &config).await,
    }
}
