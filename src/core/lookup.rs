//! Read-through lookup orchestration.
//!
//! One protocol per request: check the store, on a miss fetch from the
//! remote, normalize, persist, respond. Concurrent misses on the same
//! normalized key share a single fetch through the in-flight gate below;
//! unrelated keys never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::core::data::store::SqliteStore;
use crate::core::key::NormalizedKey;
use crate::core::lyrics::{LookupQuery, LyricsInput, LyricsRecord};
use crate::core::services::lrclib::LyricsProvider;
use crate::error::{LyricsdError, Result};

type Gate = Arc<tokio::sync::Mutex<()>>;

pub struct LookupService {
    store: SqliteStore,
    provider: Arc<dyn LyricsProvider>,
    in_flight: Mutex<HashMap<NormalizedKey, Gate>>,
}

impl LookupService {
    pub fn new(store: SqliteStore, provider: Arc<dyn LyricsProvider>) -> Self {
        Self {
            store,
            provider,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// Resolve one lookup. A cache hit is returned as stored, without
    /// consulting the remote. A miss is resolved with a single remote
    /// attempt; "no data there" is [`LyricsdError::NotFound`], transport
    /// trouble propagates as a provider error.
    pub async fn lookup(&self, query: &LookupQuery) -> Result<LyricsRecord> {
        let key = query.key();

        if let Some(record) = self.store.get(&key).await? {
            debug!(
                "Cache hit for: {} - {}",
                query.artist_name, query.track_name
            );
            return Ok(record);
        }

        let gate = self.claim_gate(&key);
        let result = {
            let _leader = gate.lock().await;
            self.resolve_miss(&key, query).await
        };
        drop(gate);
        self.release_gate(&key);

        result
    }

    async fn resolve_miss(&self, key: &NormalizedKey, query: &LookupQuery) -> Result<LyricsRecord> {
        // A lookup that held the gate before us may have resolved this key
        // already; if its attempt failed instead, we make our own.
        if let Some(record) = self.store.get(key).await? {
            debug!(
                "Cache hit after in-flight lookup for: {} - {}",
                query.artist_name, query.track_name
            );
            return Ok(record);
        }

        let Some(raw) = self.provider.fetch(query).await? else {
            info!(
                "No lyrics at the remote for: {} - {}",
                query.artist_name, query.track_name
            );
            return Err(LyricsdError::NotFound);
        };

        let input = LyricsInput::from_remote(raw, query);
        let record = self.store.put(key, input).await?;
        info!(
            "Cached lyrics record {} for: {} - {}",
            record.id, query.artist_name, query.track_name
        );

        Ok(record)
    }

    fn claim_gate(&self, key: &NormalizedKey) -> Gate {
        let mut in_flight = self.in_flight.lock().unwrap();
        in_flight.entry(key.clone()).or_default().clone()
    }

    fn release_gate(&self, key: &NormalizedKey) {
        let mut in_flight = self.in_flight.lock().unwrap();
        if let Some(gate) = in_flight.get(key) {
            // Only the map itself holds the gate: nobody is waiting.
            if Arc::strong_count(gate) == 1 {
                in_flight.remove(key);
            }
        }
    }
}
