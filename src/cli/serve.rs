use clap::Args;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::core::data::store::{self, SqliteStore};
use crate::core::lookup::LookupService;
use crate::core::services::lrclib::LrclibProvider;
use crate::error::Result;
use crate::server::{self, AppState};

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the configured bind_address)
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,
}

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let pool = store::connect(&config.store_options()).await?;
    let store = SqliteStore::new(pool);

    let provider = Arc::new(LrclibProvider::new(
        &config.lrclib_instance,
        config.provider_timeout(),
    ));
    let lookup = LookupService::new(store, provider);

    info!("Database: {}", config.database_path.display());
    info!("LRCLIB instance: {}", config.lrclib_instance);

    let bind_address = args.bind.as_deref().unwrap_or(&config.bind_address);
    server::run_server(bind_address, AppState::new(lookup)).await?;

    Ok(())
}
