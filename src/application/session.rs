//! Headless state behind the sort comparison chart.
//!
//! Every change to the chart bounds queues a fresh measurement sweep on the
//! background client. The UI thread only polls.

use crate::application::client::{BenchmarkClient, BenchmarkEvent};
use crate::domain::chart_bounds::{ChartBounds, ChartScale};
use crate::domain::errors::BenchError;
use crate::domain::measurement::SortMeasurement;
use crate::domain::sorting::SortStrategy;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct ComparisonSession {
    client: BenchmarkClient,
    scale: ChartScale,
    bounds: ChartBounds,
    measurements: Vec<SortMeasurement>,
    is_calculating: bool,
    last_error: Option<String>,
    requested_id: Option<String>,
}

impl ComparisonSession {
    /// Create a session and immediately request samples for `bounds`.
    pub fn new(
        client: BenchmarkClient,
        scale: ChartScale,
        bounds: ChartBounds,
    ) -> Result<Self, BenchError> {
        scale.validate()?;
        scale.check_slider(bounds.n)?;

        let mut session = Self {
            client,
            scale,
            bounds,
            measurements: Vec::new(),
            is_calculating: false,
            last_error: None,
            requested_id: None,
        };
        session.refresh_if_changed()?;
        Ok(session)
    }

    pub fn bounds(&self) -> &ChartBounds {
        &self.bounds
    }

    pub fn scale(&self) -> &ChartScale {
        &self.scale
    }

    pub fn measurements(&self) -> &[SortMeasurement] {
        &self.measurements
    }

    pub fn is_calculating(&self) -> bool {
        self.is_calculating
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn client(&self) -> &BenchmarkClient {
        &self.client
    }

    pub fn x_domain(&self) -> (usize, usize) {
        self.scale.x_domain(&self.bounds)
    }

    pub fn caption(&self) -> String {
        let (lower, upper) = self.x_domain();
        format!(
            "Time complexity of sort functions from {} to {} elements",
            lower, upper
        )
    }

    /// Move the slider. Out of range values are rejected.
    pub fn set_n(&mut self, n: u32) -> Result<(), BenchError> {
        self.scale.check_slider(n)?;
        self.bounds.n = n;
        self.refresh_if_changed()
    }

    /// Show or hide a strategy. Returns whether it is shown afterwards.
    pub fn toggle(&mut self, strategy: SortStrategy) -> Result<bool, BenchError> {
        let shown = self.bounds.toggle(strategy);
        info!(
            "{} {}",
            if shown { "Showing" } else { "Hiding" },
            strategy.title()
        );
        self.refresh_if_changed()?;
        Ok(shown)
    }

    fn refresh_if_changed(&mut self) -> Result<(), BenchError> {
        let id = self.bounds.id();
        if self.requested_id.as_deref() == Some(id.as_str()) {
            debug!("Bounds unchanged ({}), keeping current request", id);
            return Ok(());
        }

        let (lower, upper) = self.x_domain();
        let generation = self
            .client
            .request(self.bounds.strategies.clone(), lower, upper)?;
        debug!("Requested generation {} for bounds {}", generation, id);

        self.requested_id = Some(id);
        self.is_calculating = true;
        Ok(())
    }

    /// Apply pending worker events. Returns true when the samples changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(event) = self.client.poll_next() {
            changed |= self.apply(event);
        }
        changed
    }

    /// Block until the current request finishes or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Result<&[SortMeasurement], BenchError> {
        let start = Instant::now();
        while self.is_calculating {
            let remaining = timeout.saturating_sub(start.elapsed());
            match self.client.recv_timeout(remaining)? {
                Some(event) => {
                    self.apply(event);
                }
                None => {
                    return Err(BenchError::Timeout {
                        waited_ms: start.elapsed().as_millis() as u64,
                    });
                }
            }
        }

        match &self.last_error {
            Some(reason) => Err(BenchError::WorkerFailed {
                reason: reason.clone(),
            }),
            None => Ok(&self.measurements),
        }
    }

    fn apply(&mut self, event: BenchmarkEvent) -> bool {
        match event {
            BenchmarkEvent::Started { generation } => {
                debug!("Generation {} started", generation);
                self.is_calculating = true;
                false
            }
            BenchmarkEvent::Completed {
                generation,
                measurements,
            } => {
                debug!(
                    "Generation {} completed with {} samples",
                    generation,
                    measurements.len()
                );
                self.measurements = measurements;
                self.is_calculating = false;
                self.last_error = None;
                true
            }
            BenchmarkEvent::Failed { generation, reason } => {
                warn!("Generation {} failed: {}", generation, reason);
                self.is_calculating = false;
                self.last_error = Some(reason);
                false
            }
        }
    }
}
