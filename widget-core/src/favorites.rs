//! Favorites store: the async side of the favorites state.
//!
//! `FavoritesState` (in widget-common) holds the transitions. This module
//! owns one shared state, runs the simulated round-trip for each toggle on a
//! tokio task and applies the completion when it resolves.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use widget_common::{FavoriteAction, FavoriteIntent, FavoritesState, PendingToggle};

use crate::delay::Delay;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FavoritesError {
    #[error("favorites service unavailable: {0}")]
    Unavailable(String),
}

/// Remote side of a favorite toggle.
#[async_trait]
pub trait FavoritesApi: Send + Sync {
    async fn add(&self, id: &str) -> Result<(), FavoritesError>;

    async fn remove(&self, id: &str) -> Result<(), FavoritesError>;
}

/// Stand-in for a favorites backend: waits out the injected delay and
/// always succeeds.
pub struct SimulatedFavoritesApi {
    delay: Arc<dyn Delay>,
}

impl SimulatedFavoritesApi {
    pub fn new(delay: Arc<dyn Delay>) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl FavoritesApi for SimulatedFavoritesApi {
    async fn add(&self, _id: &str) -> Result<(), FavoritesError> {
        self.delay.wait().await;
        Ok(())
    }

    async fn remove(&self, _id: &str) -> Result<(), FavoritesError> {
        self.delay.wait().await;
        Ok(())
    }
}

/// How a toggle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The API call failed; membership is as it was before the toggle
    Failed(FavoriteIntent),
    /// The store was cleared while the call was in flight; the result was dropped
    Discarded,
}

/// Shared handle to the session's favorites.
///
/// Cheap to clone. The lock is only held for synchronous transitions, never
/// across an await.
#[derive(Clone)]
pub struct FavoritesStore {
    state: Arc<Mutex<FavoritesState>>,
    api: Arc<dyn FavoritesApi>,
}

impl FavoritesStore {
    pub fn new(api: Arc<dyn FavoritesApi>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FavoritesState::new())),
            api,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FavoritesState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a toggle for `id`.
    ///
    /// The loading flag is set before this returns. Returns `None` if a
    /// toggle for the same id is already in flight; that request is dropped,
    /// not queued. Must be called from within a tokio runtime.
    pub fn toggle(&self, id: &str) -> Option<JoinHandle<ToggleOutcome>> {
        let Some(pending) = self.lock().begin_toggle(id) else {
            debug!("Toggle for favorite {id} ignored, one is already in flight");
            return None;
        };
        debug!("Favorite {id}: {:?} started", pending.intent);

        let store = self.clone();
        let id = id.to_string();
        Some(tokio::spawn(async move { store.complete(id, pending).await }))
    }

    async fn complete(&self, id: String, pending: PendingToggle) -> ToggleOutcome {
        let PendingToggle { intent, token } = pending;
        let result = match intent {
            FavoriteIntent::Add => self.api.add(&id).await,
            FavoriteIntent::Remove => self.api.remove(&id).await,
        };

        let action = match &result {
            Ok(()) => FavoriteAction::Succeeded {
                id: id.clone(),
                intent,
                token,
            },
            Err(_) => FavoriteAction::Failed {
                id: id.clone(),
                intent,
                token,
            },
        };

        // Only the toggle whose token is still recorded for this id may land
        if !self.lock().apply(&action) {
            debug!("Favorite {id}: {intent:?} superseded by clear, dropping result");
            return ToggleOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                debug!("Favorite {id}: {intent:?} succeeded");
                match intent {
                    FavoriteIntent::Add => ToggleOutcome::Added,
                    FavoriteIntent::Remove => ToggleOutcome::Removed,
                }
            }
            Err(e) => {
                warn!("Favorite {id}: {intent:?} failed: {e}");
                ToggleOutcome::Failed(intent)
            }
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.lock().is_favorite(id)
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.lock().is_loading(id)
    }

    pub fn favorite_ids(&self) -> Vec<String> {
        self.lock().favorite_ids().to_vec()
    }

    pub fn last_added(&self) -> Option<String> {
        self.lock().last_added().map(str::to_string)
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    pub fn snapshot(&self) -> FavoritesState {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().apply(&FavoriteAction::Clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::{FixedDelay, NoDelay};
    use std::time::Duration;

    struct FailingApi;

    #[async_trait]
    impl FavoritesApi for FailingApi {
        async fn add(&self, _id: &str) -> Result<(), FavoritesError> {
            Err(FavoritesError::Unavailable("offline".to_string()))
        }

        async fn remove(&self, _id: &str) -> Result<(), FavoritesError> {
            Err(FavoritesError::Unavailable("offline".to_string()))
        }
    }

    fn store_with_latency(ms: u64) -> FavoritesStore {
        let delay: Arc<dyn Delay> = Arc::new(FixedDelay::from_millis(ms));
        FavoritesStore::new(Arc::new(SimulatedFavoritesApi::new(delay)))
    }

    fn instant_store() -> FavoritesStore {
        FavoritesStore::new(Arc::new(SimulatedFavoritesApi::new(Arc::new(NoDelay))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_goes_through_loading() {
        let store = store_with_latency(600);
        let start = tokio::time::Instant::now();

        let handle = store.toggle("w1").unwrap();
        assert!(store.is_loading("w1"));
        assert!(!store.is_favorite("w1"));

        assert_eq!(handle.await.unwrap(), ToggleOutcome::Added);
        assert!(start.elapsed() >= Duration::from_millis(600));
        assert!(!store.is_loading("w1"));
        assert!(store.is_favorite("w1"));
        assert_eq!(store.last_added(), Some("w1".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_toggle_changes_state_once() {
        let store = store_with_latency(600);

        let first = store.toggle("w1").unwrap();
        assert!(store.toggle("w1").is_none());

        assert_eq!(first.await.unwrap(), ToggleOutcome::Added);
        assert!(store.is_favorite("w1"));
        assert_eq!(store.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_ids_run_concurrently() {
        let store = store_with_latency(600);
        let start = tokio::time::Instant::now();

        let a = store.toggle("a").unwrap();
        let b = store.toggle("b").unwrap();
        assert_eq!(a.await.unwrap(), ToggleOutcome::Added);
        assert_eq!(b.await.unwrap(), ToggleOutcome::Added);

        // Both waited out the same 600ms window, not one after the other
        assert!(start.elapsed() < Duration::from_millis(1200));
        assert_eq!(store.favorite_ids(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_remove_clears_last_added() {
        let store = instant_store();
        store.toggle("w1").unwrap().await.unwrap();
        assert_eq!(store.last_added(), Some("w1".to_string()));

        assert_eq!(
            store.toggle("w1").unwrap().await.unwrap(),
            ToggleOutcome::Removed
        );
        assert!(!store.is_favorite("w1"));
        assert_eq!(store.last_added(), None);
    }

    #[tokio::test]
    async fn test_failure_leaves_membership_unchanged() {
        let store = FavoritesStore::new(Arc::new(FailingApi));

        let outcome = store.toggle("w1").unwrap().await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Failed(FavoriteIntent::Add));
        assert!(!store.is_favorite("w1"));
        assert!(!store.is_loading("w1"));
        assert_eq!(store.last_added(), None);
    }

    #[tokio::test]
    async fn test_toggle_allowed_again_after_completion() {
        let store = instant_store();
        store.toggle("w1").unwrap().await.unwrap();
        assert!(store.toggle("w1").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_during_flight_discards_result() {
        let store = store_with_latency(600);
        let handle = store.toggle("w1").unwrap();
        store.clear();
        assert!(!store.is_loading("w1"));

        assert_eq!(handle.await.unwrap(), ToggleOutcome::Discarded);
        assert!(!store.is_favorite("w1"));
        assert_eq!(store.count(), 0);
        assert_eq!(store.last_added(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retoggle_after_clear_keeps_one_toggle_in_flight() {
        let store = store_with_latency(600);
        let first = store.toggle("w1").unwrap();
        store.clear();

        tokio::time::sleep(Duration::from_millis(300)).await;
        let second = store.toggle("w1").unwrap();

        // The first call resolves at 600ms, the second is still pending
        assert_eq!(first.await.unwrap(), ToggleOutcome::Discarded);
        assert!(store.is_loading("w1"));
        assert!(!store.is_favorite("w1"));
        assert!(store.toggle("w1").is_none());

        assert_eq!(second.await.unwrap(), ToggleOutcome::Added);
        assert!(!store.is_loading("w1"));
        assert!(store.is_favorite("w1"));
        assert_eq!(store.last_added(), Some("w1".to_string()));
    }
}
