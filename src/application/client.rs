use crate::application::benchmarking::repository::MeasurementRepo;
use crate::domain::errors::BenchError;
use crate::domain::measurement::SortMeasurement;
use crate::domain::sorting::SortStrategy;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// One request for a measurement sweep.
#[derive(Debug, Clone)]
pub struct MeasurementRequest {
    pub generation: u64,
    pub strategies: Vec<SortStrategy>,
    pub lower_bound: usize,
    pub upper_bound: usize,
}

/// Events emitted by the background worker.
#[derive(Debug, Clone)]
pub enum BenchmarkEvent {
    Started {
        generation: u64,
    },
    Completed {
        generation: u64,
        measurements: Vec<SortMeasurement>,
    },
    Failed {
        generation: u64,
        reason: String,
    },
}

impl BenchmarkEvent {
    pub fn generation(&self) -> u64 {
        match self {
            BenchmarkEvent::Started { generation }
            | BenchmarkEvent::Completed { generation, .. }
            | BenchmarkEvent::Failed { generation, .. } => *generation,
        }
    }
}

/// Handle to a benchmark worker running on its own Tokio runtime thread.
///
/// Requests are fire-and-forget; results come back through `poll_next` or
/// `recv_timeout`. Only the newest request's events are ever returned.
pub struct BenchmarkClient {
    request_tx: mpsc::UnboundedSender<MeasurementRequest>,
    event_rx: Receiver<BenchmarkEvent>,
    latest_generation: u64,
    repo: Arc<MeasurementRepo>,
}

impl BenchmarkClient {
    pub fn spawn(repo: Arc<MeasurementRepo>) -> Result<Self, BenchError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("sortbench-worker")
            .build()
            .map_err(BenchError::RuntimeStartup)?;

        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let worker_repo = repo.clone();

        std::thread::Builder::new()
            .name("sortbench-runtime".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    info!("Benchmark runtime started.");
                    run_worker(worker_repo, request_rx, event_tx).await;
                    info!("Benchmark runtime stopped.");
                });
            })
            .map_err(BenchError::RuntimeStartup)?;

        Ok(Self {
            request_tx,
            event_rx,
            latest_generation: 0,
            repo,
        })
    }

    /// Queue a measurement sweep and return its generation number.
    pub fn request(
        &mut self,
        strategies: Vec<SortStrategy>,
        lower_bound: usize,
        upper_bound: usize,
    ) -> Result<u64, BenchError> {
        let generation = self.latest_generation + 1;
        self.request_tx
            .send(MeasurementRequest {
                generation,
                strategies,
                lower_bound,
                upper_bound,
            })
            .map_err(|_| BenchError::WorkerUnavailable)?;
        self.latest_generation = generation;
        Ok(generation)
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    pub fn repo(&self) -> &Arc<MeasurementRepo> {
        &self.repo
    }

    /// Non-blocking: next event for the latest request, if any.
    pub fn poll_next(&mut self) -> Option<BenchmarkEvent> {
        while let Ok(event) = self.event_rx.try_recv() {
            if self.is_current(&event) {
                return Some(event);
            }
        }
        None
    }

    /// Wait up to `timeout` for the next event of the latest request.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<BenchmarkEvent>, BenchError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_rx.recv_timeout(remaining) {
                Ok(event) if self.is_current(&event) => return Ok(Some(event)),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(BenchError::WorkerUnavailable),
            }
        }
    }

    fn is_current(&self, event: &BenchmarkEvent) -> bool {
        if event.generation() < self.latest_generation {
            debug!("Dropping stale event for generation {}", event.generation());
            return false;
        }
        true
    }
}

async fn run_worker(
    repo: Arc<MeasurementRepo>,
    mut request_rx: mpsc::UnboundedReceiver<MeasurementRequest>,
    event_tx: Sender<BenchmarkEvent>,
) {
    while let Some(mut request) = request_rx.recv().await {
        // Only the newest queued request matters.
        while let Ok(newer) = request_rx.try_recv() {
            debug!(
                "Skipping generation {} in favour of {}",
                request.generation, newer.generation
            );
            request = newer;
        }

        let generation = request.generation;
        if event_tx.send(BenchmarkEvent::Started { generation }).is_err() {
            warn!("Benchmark client gone, stopping worker");
            return;
        }

        let event = match repo
            .clone()
            .get_measurements(request.strategies, request.lower_bound, request.upper_bound)
            .await
        {
            Ok(measurements) => BenchmarkEvent::Completed {
                generation,
                measurements,
            },
            Err(e) => {
                error!("Measurement generation {} failed: {}", generation, e);
                BenchmarkEvent::Failed {
                    generation,
                    reason: e.to_string(),
                }
            }
        };

        if event_tx.send(event).is_err() {
            warn!("Benchmark client gone, stopping worker");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_completion(client: &mut BenchmarkClient) -> BenchmarkEvent {
        loop {
            match client.recv_timeout(Duration::from_secs(30)).unwrap() {
                Some(event @ BenchmarkEvent::Completed { .. }) => return event,
                Some(event @ BenchmarkEvent::Failed { .. }) => panic!("failed: {:?}", event),
                Some(_) => continue,
                None => panic!("timed out"),
            }
        }
    }

    #[test]
    fn test_request_completes() {
        let repo = Arc::new(MeasurementRepo::with_settings(4, Some(11)));
        let mut client = BenchmarkClient::spawn(repo.clone()).unwrap();

        let generation = client
            .request(vec![SortStrategy::Heap, SortStrategy::Merge], 100, 200)
            .unwrap();
        assert_eq!(generation, 1);

        match wait_for_completion(&mut client) {
            BenchmarkEvent::Completed {
                generation,
                measurements,
            } => {
                assert_eq!(generation, 1);
                assert_eq!(measurements.len(), 2 * 4);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(repo.len(), 8);
    }

    #[test]
    fn test_only_latest_generation_surfaces() {
        let repo = Arc::new(MeasurementRepo::with_settings(2, Some(5)));
        let mut client = BenchmarkClient::spawn(repo).unwrap();

        client.request(vec![SortStrategy::Bubble], 100, 200).unwrap();
        client.request(vec![SortStrategy::Heap], 100, 200).unwrap();
        let latest = client.request(vec![SortStrategy::Merge], 100, 200).unwrap();
        assert_eq!(latest, 3);

        match wait_for_completion(&mut client) {
            BenchmarkEvent::Completed {
                generation,
                measurements,
            } => {
                assert_eq!(generation, latest);
                assert!(measurements.iter().all(|m| m.strategy == SortStrategy::Merge));
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(client.poll_next().is_none());
    }

    #[test]
    fn test_event_generation_accessor() {
        let event = BenchmarkEvent::Failed {
            generation: 4,
            reason: "boom".to_string(),
        };
        assert_eq!(event.generation(), 4);
    }
}
