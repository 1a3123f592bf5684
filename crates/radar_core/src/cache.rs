use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

/// Single-slot cache whose value expires `ttl` after it was fetched.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &Entry<T>) -> bool {
        entry.fetched_at.elapsed() < self.ttl
    }

    /// The cached value, if one exists and has not expired.
    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.value.clone())
    }

    pub async fn get_or_load<F, Fut>(&self, load: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(value) = self.get().await {
            tracing::debug!("cache hit");
            return value;
        }

        let mut slot = self.slot.write().await;
        // another caller may have filled the slot while we waited for the lock
        if let Some(entry) = slot.as_ref().filter(|entry| self.is_fresh(entry)) {
            return entry.value.clone();
        }

        tracing::debug!("cache miss, loading");
        let value = load().await;
        *slot = Some(Entry {
            value: value.clone(),
            fetched_at: Instant::now(),
        });
        value
    }

    pub async fn invalidate(&self) {
        self.slot.write().await.take();
    }

    pub async fn fetched_at(&self) -> Option<Instant> {
        self.slot.read().await.as_ref().map(|entry| entry.fetched_at)
    }
}
