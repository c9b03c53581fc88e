use crate::domain::sorting::SortStrategy;
use serde::{Deserialize, Serialize};

/// One timed observation of a strategy sorting `elements` integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortMeasurement {
    pub strategy: SortStrategy,
    pub elements: usize,
    /// Elapsed wall time in seconds.
    pub time: f64,
}

impl SortMeasurement {
    pub fn key(&self) -> MeasurementKey {
        MeasurementKey {
            strategy: self.strategy,
            elements: self.elements,
        }
    }

    /// Stable identifier for a chart point, e.g. `"Heap Sort 700"`.
    pub fn id(&self) -> String {
        format!("{} {}", self.strategy.title(), self.elements)
    }
}

/// Cache key: one measurement per strategy and input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasurementKey {
    pub strategy: SortStrategy,
    pub elements: usize,
}

impl MeasurementKey {
    pub fn new(strategy: SortStrategy, elements: usize) -> Self {
        Self { strategy, elements }
    }
}
