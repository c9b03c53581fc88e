use super::sampling::{InputGenerator, sample_sizes};
use crate::domain::errors::BenchError;
use crate::domain::measurement::{MeasurementKey, SortMeasurement};
use crate::domain::sorting::SortStrategy;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, error, info};

pub const DEFAULT_SAMPLE_COUNT: usize = 10;

/// Snapshot of cache activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    /// Measurements stored in the cache. Callers racing on the same key may
    /// each sort, but only the stored result is counted.
    pub computed: usize,
    pub hits: usize,
}

/// Memoizing store of sort timings keyed by (strategy, elements).
///
/// Entries are never evicted. Timed sorts run without the lock held, so a
/// reader is never blocked behind a slow bubble sort.
pub struct MeasurementRepo {
    measurements: Mutex<HashMap<MeasurementKey, SortMeasurement>>,
    generator: InputGenerator,
    sample_count: usize,
    computed: AtomicUsize,
    hits: AtomicUsize,
}

impl std::fmt::Debug for MeasurementRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasurementRepo")
            .field("measurements", &"<Mutex>")
            .field("sample_count", &self.sample_count)
            .field("seed", &self.generator.seed())
            .finish()
    }
}

impl MeasurementRepo {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_SAMPLE_COUNT, None)
    }

    pub fn with_settings(sample_count: usize, seed: Option<u64>) -> Self {
        Self {
            measurements: Mutex::new(HashMap::new()),
            generator: InputGenerator::new(seed),
            sample_count: sample_count.max(1),
            computed: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
        }
    }

    /// Run `function` once and return the elapsed time in seconds.
    pub fn time<F: FnOnce()>(function: F) -> f64 {
        let start = Instant::now();
        function();
        start.elapsed().as_secs_f64()
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Measure every strategy over the sampled sizes of `[lower_bound, upper_bound)`.
    ///
    /// The sorting happens on Tokio's blocking pool, never on the calling task.
    pub async fn get_measurements(
        self: Arc<Self>,
        strategies: Vec<SortStrategy>,
        lower_bound: usize,
        upper_bound: usize,
    ) -> Result<Vec<SortMeasurement>, BenchError> {
        tokio::task::spawn_blocking(move || {
            self.measure_range(&strategies, lower_bound, upper_bound)
        })
        .await
        .map_err(|e| BenchError::WorkerFailed {
            reason: e.to_string(),
        })
    }

    /// Blocking variant of [`get_measurements`](Self::get_measurements).
    ///
    /// Results are ordered by size, then by the order of `strategies`.
    pub fn measure_range(
        &self,
        strategies: &[SortStrategy],
        lower_bound: usize,
        upper_bound: usize,
    ) -> Vec<SortMeasurement> {
        let sizes = sample_sizes(lower_bound, upper_bound, self.sample_count);
        let start = Instant::now();

        let measurements: Vec<SortMeasurement> = sizes
            .iter()
            .flat_map(|&elements| self.measure_size(strategies, elements))
            .collect();

        info!(
            "Measured {} strategies over {} sizes ({}..{}) in {:?}",
            strategies.len(),
            sizes.len(),
            lower_bound,
            upper_bound,
            start.elapsed()
        );
        measurements
    }

    fn measure_size(&self, strategies: &[SortStrategy], elements: usize) -> Vec<SortMeasurement> {
        // Only generated if some strategy misses the cache.
        let mut input: Option<Vec<i64>> = None;

        strategies
            .iter()
            .map(|&strategy| {
                let key = MeasurementKey::new(strategy, elements);
                if let Some(cached) = self.cached_entry(&key) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!("Cache hit for {} @ {} elements", strategy, elements);
                    return cached;
                }

                let source = input.get_or_insert_with(|| self.generator.generate(elements));
                let mut copy = source.clone();
                let time = Self::time(|| strategy.sort(&mut copy));
                std::hint::black_box(&copy);

                self.store(SortMeasurement {
                    strategy,
                    elements,
                    time,
                })
            })
            .collect()
    }

    // First writer wins so every caller sees the same timing for a key.
    fn store(&self, measurement: SortMeasurement) -> SortMeasurement {
        let mut guard = self.lock_measurements();
        let stored = guard
            .entry(measurement.key())
            .or_insert_with(|| {
                self.computed.fetch_add(1, Ordering::Relaxed);
                measurement
            })
            .clone();
        debug!(
            "Stored {} @ {} elements: {:.6}s",
            stored.strategy, stored.elements, stored.time
        );
        stored
    }

    fn cached_entry(&self, key: &MeasurementKey) -> Option<SortMeasurement> {
        self.lock_measurements().get(key).cloned()
    }

    /// Cached measurement for a strategy and size, if one exists.
    pub fn cached(&self, strategy: SortStrategy, elements: usize) -> Option<SortMeasurement> {
        self.cached_entry(&MeasurementKey::new(strategy, elements))
    }

    pub fn len(&self) -> usize {
        self.lock_measurements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            computed: self.computed.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
        }
    }

    fn lock_measurements(&self) -> MutexGuard<'_, HashMap<MeasurementKey, SortMeasurement>> {
        match self.measurements.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                error!("MeasurementRepo: Lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl Default for MeasurementRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_reports_seconds() {
        let elapsed =
            MeasurementRepo::time(|| std::thread::sleep(std::time::Duration::from_millis(5)));
        assert!(elapsed >= 0.005);
        assert!(elapsed < 5.0);
    }

    #[test]
    fn test_measure_range_counts_and_order() {
        let repo = MeasurementRepo::with_settings(10, Some(1));
        let strategies = vec![SortStrategy::Merge, SortStrategy::Heap];
        let results = repo.measure_range(&strategies, 100, 200);

        assert_eq!(results.len(), 2 * 10);
        assert_eq!(results[0].strategy, SortStrategy::Merge);
        assert_eq!(results[1].strategy, SortStrategy::Heap);
        assert_eq!(results[0].elements, 100);
        assert_eq!(results[2].elements, 110);
        assert!(results.iter().all(|m| m.time >= 0.0));
    }

    #[test]
    fn test_second_request_is_served_from_cache() {
        let repo = MeasurementRepo::with_settings(5, Some(3));
        let strategies = vec![SortStrategy::Bubble, SortStrategy::Default];

        let first = repo.measure_range(&strategies, 50, 100);
        let after_first = repo.stats();
        assert_eq!(after_first.computed, 10);
        assert_eq!(after_first.hits, 0);

        let second = repo.measure_range(&strategies, 50, 100);
        let after_second = repo.stats();
        assert_eq!(first, second);
        assert_eq!(after_second.computed, 10);
        assert_eq!(after_second.hits, 10);
        assert_eq!(after_second.entries, 10);
    }

    #[test]
    fn test_store_keeps_first_value() {
        let repo = MeasurementRepo::new();
        let first = repo.store(SortMeasurement {
            strategy: SortStrategy::Heap,
            elements: 10,
            time: 1.0,
        });
        let second = repo.store(SortMeasurement {
            strategy: SortStrategy::Heap,
            elements: 10,
            time: 2.0,
        });
        assert_eq!(first.time, 1.0);
        assert_eq!(second.time, 1.0);
        assert_eq!(repo.stats().computed, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let repo = MeasurementRepo::new();
        assert!(repo.measure_range(&[], 100, 200).is_empty());
        assert!(repo.measure_range(&SortStrategy::ALL, 200, 100).is_empty());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_get_measurements_runs_off_task() {
        let repo = Arc::new(MeasurementRepo::with_settings(10, Some(9)));
        let results = repo
            .clone()
            .get_measurements(SortStrategy::ALL.to_vec(), 500, 1000)
            .await
            .unwrap();

        assert_eq!(results.len(), 4 * 10);
        assert_eq!(repo.len(), 40);
        assert_eq!(
            repo.cached(SortStrategy::Merge, 500).map(|m| m.time),
            results
                .iter()
                .find(|m| m.strategy == SortStrategy::Merge && m.elements == 500)
                .map(|m| m.time)
        );
    }
}
