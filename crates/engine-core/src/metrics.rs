use serde::Serialize;
use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

/// Counter name for rows handed to a flush, whatever its outcome.
pub const ROWS_SENT: &str = "rows_sent";
/// Counter name for rows the store confirmed as loaded.
pub const ROWS_IMPORTED: &str = "rows_imported";

/// Monotonic counter shared between a writer and the host's metrics reader.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    inner: Arc<AtomicU64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, count: u64) {
        self.inner.fetch_add(count, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

/// Host side of the metrics contract: named counters are handed over at open.
pub trait CounterRegistry {
    fn register_counter(&self, name: &str, counter: Counter);
}

/// In-memory registry. Reads are eventually-consistent snapshots.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counters: Mutex<BTreeMap<String, Counter>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, name: &str) -> Option<Counter> {
        self.lock().get(name).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.lock()
            .iter()
            .map(|(name, counter)| (name.clone(), counter.get()))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Counter>> {
        // Counters stay valid even if a reader panicked mid-snapshot.
        self.counters.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CounterRegistry for MetricsRegistry {
    fn register_counter(&self, name: &str, counter: Counter) {
        self.lock().insert(name.to_string(), counter);
    }
}

/// The two counters a load client maintains over a task's lifetime.
#[derive(Debug, Clone, Default)]
pub struct LoadMetrics {
    rows_sent: Counter,
    rows_imported: Counter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadMetricsSnapshot {
    pub rows_sent: u64,
    pub rows_imported: u64,
}

impl LoadMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, registry: &dyn CounterRegistry) {
        registry.register_counter(ROWS_SENT, self.rows_sent.clone());
        registry.register_counter(ROWS_IMPORTED, self.rows_imported.clone());
    }

    pub fn increment_sent(&self, count: u64) {
        self.rows_sent.add(count);
    }

    pub fn increment_imported(&self, count: u64) {
        self.rows_imported.add(count);
    }

    pub fn snapshot(&self) -> LoadMetricsSnapshot {
        LoadMetricsSnapshot {
            rows_sent: self.rows_sent.get(),
            rows_imported: self.rows_imported.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_counters_are_shared() {
        let registry = MetricsRegistry::new();
        let metrics = LoadMetrics::new();
        metrics.register(&registry);

        metrics.increment_sent(10);
        metrics.increment_imported(7);
        metrics.increment_sent(5);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.get(ROWS_SENT), Some(&15));
        assert_eq!(snapshot.get(ROWS_IMPORTED), Some(&7));
        assert_eq!(
            metrics.snapshot(),
            LoadMetricsSnapshot {
                rows_sent: 15,
                rows_imported: 7
            }
        );
    }

    #[test]
    fn test_counter_readable_from_other_thread() {
        let registry = Arc::new(MetricsRegistry::new());
        let counter = Counter::new();
        registry.register_counter("rows", counter.clone());
        counter.add(3);

        let reader = Arc::clone(&registry);
        let seen = std::thread::spawn(move || reader.counter("rows").map(|c| c.get()))
            .join()
            .unwrap();
        assert_eq!(seen, Some(3));
    }

    #[test]
    fn test_unknown_counter() {
        assert!(MetricsRegistry::new().counter("missing").is_none());
    }
}
