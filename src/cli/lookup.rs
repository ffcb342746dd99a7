use clap::Args;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::core::data::store::{self, SqliteStore};
use crate::core::lookup::LookupService;
use crate::core::lyrics::{LookupQuery, LyricsRecord};
use crate::core::services::lrclib::LrclibProvider;
use crate::error::{LyricsdError, Result};

#[derive(Args)]
pub struct LookupArgs {
    /// Artist name
    #[arg(value_name = "ARTIST")]
    artist: String,

    /// Track title
    #[arg(value_name = "TRACK")]
    track: String,

    /// Album name (improves matching)
    #[arg(short = 'l', long)]
    album: Option<String>,

    /// Track duration in seconds (improves matching)
    #[arg(short, long)]
    duration: Option<i64>,

    /// Print the full record as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: LookupArgs, config: &Config) -> Result<()> {
    let pool = store::connect(&config.store_options()).await?;
    let store = SqliteStore::new(pool);
    let provider = Arc::new(LrclibProvider::new(
        &config.lrclib_instance,
        config.provider_timeout(),
    ));
    let service = LookupService::new(store, provider);

    let query = LookupQuery {
        artist_name: args.artist,
        track_name: args.track,
        album_name: args.album,
        duration: args.duration,
    };

    match service.lookup(&query).await {
        Ok(record) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
            Ok(())
        }
        Err(LyricsdError::NotFound) => {
            info!(
                "No lyrics found for '{}' by '{}'",
                query.track_name, query.artist_name
            );
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn print_record(record: &LyricsRecord) {
    let album = record.album_name.as_deref().unwrap_or("Unknown");
    println!("🎵 {} - {} ({})", record.artist_name, record.name, album);

    if record.instrumental == Some(true) {
        println!("  Instrumental track, no lyrics");
        return;
    }

    if !record.plain_lyrics.is_empty() {
        println!();
        println!("{}", record.plain_lyrics);
    } else if let Some(synced) = &record.synced_lyrics {
        println!();
        println!("{}", synced);
    } else {
        println!("  Record has no lyrics text");
    }
}
