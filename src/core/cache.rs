//! Category cache with single-flight loading.
//!
//! Each meta-category is loaded at most once per cache instance. Concurrent
//! requests for an id that is already loading join the pending load instead
//! of starting another one. Failed loads are not cached and may be retried.
//!
//! The underlying load runs as a spawned task, so it always completes even
//! if every caller that was waiting on it goes away.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::content::{CategorySource, ContentRegistry, LoadError};
use crate::domain::{Category, MetaCategoryId};

/// Shared, immutable category list of one meta-category
pub type Categories = Arc<Vec<Category>>;

type LoadOutcome = Result<Categories, LoadError>;

/// Cache state of one meta-category
enum Slot {
    /// Loaded; never invalidated except by `clear`
    Ready(Categories),

    /// A load is in flight; the receiver yields its outcome
    Pending(watch::Receiver<Option<LoadOutcome>>),
}

#[derive(Default)]
struct Slots {
    /// Bumped by `clear` so loads started before it cannot repopulate the cache
    generation: u64,
    entries: HashMap<MetaCategoryId, Slot>,
}

/// Lazy, memoizing loader for meta-category content
#[derive(Clone)]
pub struct CategoryCache {
    registry: ContentRegistry,
    slots: Arc<Mutex<Slots>>,
    loads_started: Arc<AtomicUsize>,
}

impl CategoryCache {
    /// Create an empty cache over the given sources
    pub fn new(registry: ContentRegistry) -> Self {
        Self {
            registry,
            slots: Arc::new(Mutex::new(Slots::default())),
            loads_started: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Registry backing this cache
    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        lock_slots(&self.slots)
    }

    /// Load a meta-category, reusing the cached or in-flight result
    ///
    /// An id without a registered source fails immediately without touching
    /// the cache.
    #[instrument(skip_all, fields(meta = %id))]
    pub async fn load(&self, id: MetaCategoryId) -> Result<Categories, LoadError> {
        let mut pending = {
            let mut slots = self.lock();

            match slots.entries.get(&id) {
                Some(Slot::Ready(categories)) => return Ok(categories.clone()),
                Some(Slot::Pending(rx)) => {
                    debug!("Joining in-flight load");
                    rx.clone()
                }
                None => {
                    let source = self.registry.source_for(id)?;
                    let (tx, rx) = watch::channel(None);
                    slots.entries.insert(id, Slot::Pending(rx.clone()));
                    self.spawn_load(id, source, slots.generation, tx);
                    rx
                }
            }
        };

        let outcome = pending
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|settled| settled.as_ref().cloned());

        outcome.unwrap_or_else(|| {
            Err(LoadError::Failed {
                id,
                cause: "load task ended without reporting a result".to_string(),
            })
        })
    }

    fn spawn_load(
        &self,
        id: MetaCategoryId,
        source: Arc<dyn CategorySource>,
        generation: u64,
        tx: watch::Sender<Option<LoadOutcome>>,
    ) {
        let slots = Arc::clone(&self.slots);
        self.loads_started.fetch_add(1, Ordering::SeqCst);

        tokio::spawn(async move {
            info!(meta = %id, source = source.name(), "Loading meta-category");

            // Inner task isolates a panicking source from the settle step below
            let joined = tokio::spawn(async move { source.load(id).await }).await;

            let outcome = match joined {
                Ok(Ok(categories)) => {
                    info!(meta = %id, categories = categories.len(), "Meta-category loaded");
                    Ok(Arc::new(categories))
                }
                Ok(Err(e)) => {
                    let cause = format!("{:#}", e);
                    warn!(meta = %id, error = %cause, "Meta-category load failed");
                    Err(LoadError::Failed { id, cause })
                }
                Err(join_error) => {
                    warn!(meta = %id, error = %join_error, "Meta-category load task aborted");
                    Err(LoadError::Failed {
                        id,
                        cause: join_error.to_string(),
                    })
                }
            };

            {
                let mut slots = lock_slots(&slots);
                if slots.generation == generation {
                    match &outcome {
                        Ok(categories) => {
                            slots.entries.insert(id, Slot::Ready(categories.clone()));
                        }
                        Err(_) => {
                            slots.entries.remove(&id);
                        }
                    }
                } else {
                    debug!(meta = %id, "Cache cleared during load; result not stored");
                }
            }

            // Receivers may all be gone; the cache entry above is what matters
            let _ = tx.send(Some(outcome));
        });
    }

    /// Load several meta-categories concurrently
    ///
    /// Results come back in the order of `ids`.
    pub async fn load_all(
        &self,
        ids: &[MetaCategoryId],
    ) -> Vec<(MetaCategoryId, Result<Categories, LoadError>)> {
        let mut set = JoinSet::new();
        for (idx, &id) in ids.iter().enumerate() {
            let cache = self.clone();
            set.spawn(async move { (idx, id, cache.load(id).await) });
        }

        let mut results = Vec::with_capacity(ids.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => warn!(error = %e, "Load task failed to join"),
            }
        }

        results.sort_by_key(|(idx, _, _)| *idx);
        results.into_iter().map(|(_, id, r)| (id, r)).collect()
    }

    /// Cached categories without triggering a load
    pub fn get_cached(&self, id: MetaCategoryId) -> Option<Categories> {
        match self.lock().entries.get(&id) {
            Some(Slot::Ready(categories)) => Some(categories.clone()),
            _ => {
                debug!(meta = %id, "Meta-category requested before it was loaded");
                None
            }
        }
    }

    /// Check if a meta-category has been loaded
    pub fn is_loaded(&self, id: MetaCategoryId) -> bool {
        matches!(self.lock().entries.get(&id), Some(Slot::Ready(_)))
    }

    /// Check if a load for the meta-category is in flight
    pub fn is_loading(&self, id: MetaCategoryId) -> bool {
        matches!(self.lock().entries.get(&id), Some(Slot::Pending(_)))
    }

    /// Ids of loaded meta-categories, in catalog order
    pub fn loaded_ids(&self) -> Vec<MetaCategoryId> {
        let slots = self.lock();
        let mut ids: Vec<_> = slots
            .entries
            .iter()
            .filter_map(|(id, slot)| matches!(slot, Slot::Ready(_)).then_some(*id))
            .collect();
        ids.sort();
        ids
    }

    /// Number of underlying source loads started by this cache
    pub fn loads_started(&self) -> usize {
        self.loads_started.load(Ordering::SeqCst)
    }

    /// Drop all cached and in-flight state
    ///
    /// Loads already running still settle their waiters but no longer
    /// populate the cache.
    pub fn clear(&self) {
        let mut slots = self.lock();
        slots.generation += 1;
        slots.entries.clear();
        debug!(generation = slots.generation, "Category cache cleared");
    }
}

impl std::fmt::Debug for CategoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryCache")
            .field("registry", &self.registry)
            .field("loads_started", &self.loads_started())
            .finish()
    }
}

fn lock_slots(slots: &Mutex<Slots>) -> MutexGuard<'_, Slots> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticSource;
    use crate::domain::{Difficulty, Topic};

    fn javascript_cache() -> CategoryCache {
        let categories = vec![Category::new("basics", "Basics")
            .with_topic(Topic::new("vars", "Variables", "let and const", Difficulty::Beginner))];
        let registry = ContentRegistry::new().with_source(
            MetaCategoryId::Javascript,
            Arc::new(StaticSource::new(categories)),
        );
        CategoryCache::new(registry)
    }

    #[tokio::test]
    async fn test_get_cached_before_and_after_load() {
        let cache = javascript_cache();

        assert!(cache.get_cached(MetaCategoryId::Javascript).is_none());
        assert!(!cache.is_loaded(MetaCategoryId::Javascript));

        let loaded = cache.load(MetaCategoryId::Javascript).await.unwrap();
        let cached = cache.get_cached(MetaCategoryId::Javascript).unwrap();

        assert!(Arc::ptr_eq(&loaded, &cached));
        assert!(cache.is_loaded(MetaCategoryId::Javascript));
        assert_eq!(cache.loads_started(), 1);
    }

    #[tokio::test]
    async fn test_unregistered_id_fails_without_caching() {
        let cache = javascript_cache();

        let err = cache.load(MetaCategoryId::Security).await.unwrap_err();
        assert_eq!(err, LoadError::UnregisteredSource(MetaCategoryId::Security));
        assert!(!cache.is_loading(MetaCategoryId::Security));
        assert_eq!(cache.loads_started(), 0);
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let cache = javascript_cache();
        cache.load(MetaCategoryId::Javascript).await.unwrap();

        cache.clear();
        assert!(!cache.is_loaded(MetaCategoryId::Javascript));

        cache.load(MetaCategoryId::Javascript).await.unwrap();
        assert_eq!(cache.loads_started(), 2);
    }

    #[tokio::test]
    async fn test_load_all_preserves_order() {
        let cache = javascript_cache();
        let results = cache
            .load_all(&[MetaCategoryId::Security, MetaCategoryId::Javascript])
            .await;

        assert_eq!(results[0].0, MetaCategoryId::Security);
        assert!(results[0].1.is_err());
        assert_eq!(results[1].0, MetaCategoryId::Javascript);
        assert!(results[1].1.is_ok());
        assert_eq!(cache.loaded_ids(), vec![MetaCategoryId::Javascript]);
    }
}
