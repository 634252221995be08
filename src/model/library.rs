//! Liked and saved track sets, persisted through the key-value port
//!
//! The local sets are the source of truth for UI state. The engagement
//! store's counters drift toward them but are never read back to resolve
//! them. Writes go through the `KvStore` port in full on every mutation;
//! a failed write is logged and the in-memory state stands.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::ports::storage::KvStore;

const LIKED_TRACKS_KEY: &str = "liked_tracks";
const SAVED_TRACKS_KEY: &str = "saved_tracks";

/// Local library of liked and saved track ids.
#[derive(Clone)]
pub struct Library {
    liked: Arc<RwLock<HashSet<String>>>,
    saved: Arc<RwLock<HashSet<String>>>,
    store: Arc<dyn KvStore>,
}

impl Library {
    /// Create the library, loading both sets from the store. Missing or
    /// unreadable entries start the corresponding set empty.
    pub async fn load(store: Arc<dyn KvStore>) -> Self {
        let liked = Self::load_set(store.as_ref(), LIKED_TRACKS_KEY).await;
        let saved = Self::load_set(store.as_ref(), SAVED_TRACKS_KEY).await;
        Self {
            liked: Arc::new(RwLock::new(liked)),
            saved: Arc::new(RwLock::new(saved)),
            store,
        }
    }

    async fn load_set(store: &dyn KvStore, key: &str) -> HashSet<String> {
        match store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Stored id list is unreadable, starting empty");
                    HashSet::new()
                }
            },
            Ok(None) => HashSet::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Could not read stored id list, starting empty");
                HashSet::new()
            }
        }
    }

    async fn persist(&self, key: &str, set: &HashSet<String>) {
        let ids: Vec<&String> = set.iter().collect();
        let result: Result<()> = async {
            let raw = serde_json::to_string(&ids)?;
            self.store.set(key, &raw).await
        }
        .await;
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "Failed to persist id list");
        }
    }

    // ========================================================================
    // Liked
    // ========================================================================

    pub async fn is_liked(&self, track_id: &str) -> bool {
        self.liked.read().await.contains(track_id)
    }

    /// Returns whether the set changed.
    pub async fn like(&self, track_id: &str) -> bool {
        let changed = self.liked.write().await.insert(track_id.to_string());
        if changed {
            self.persist(LIKED_TRACKS_KEY, &*self.liked.read().await).await;
        }
        changed
    }

    pub async fn unlike(&self, track_id: &str) -> bool {
        let changed = self.liked.write().await.remove(track_id);
        if changed {
            self.persist(LIKED_TRACKS_KEY, &*self.liked.read().await).await;
        }
        changed
    }

    pub async fn liked_ids(&self) -> Vec<String> {
        self.liked.read().await.iter().cloned().collect()
    }

    // ========================================================================
    // Saved
    // ========================================================================

    pub async fn is_saved(&self, track_id: &str) -> bool {
        self.saved.read().await.contains(track_id)
    }

    pub async fn save(&self, track_id: &str) -> bool {
        let changed = self.saved.write().await.insert(track_id.to_string());
        if changed {
            self.persist(SAVED_TRACKS_KEY, &*self.saved.read().await).await;
        }
        changed
    }

    pub async fn unsave(&self, track_id: &str) -> bool {
        let changed = self.saved.write().await.remove(track_id);
        if changed {
            self.persist(SAVED_TRACKS_KEY, &*self.saved.read().await).await;
        }
        changed
    }

    pub async fn saved_ids(&self) -> Vec<String> {
        self.saved.read().await.iter().cloned().collect()
    }
}
