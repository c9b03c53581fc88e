use super::algorithms::{bubble_sort, heap_sort, merge_sort};
use crate::domain::errors::BenchError;
use serde::{Deserialize, Serialize};

/// A sorting algorithm variant benchmarked by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    Bubble,
    Heap,
    Merge,
    /// The standard library stable sort.
    Default,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 4] = [
        SortStrategy::Bubble,
        SortStrategy::Heap,
        SortStrategy::Merge,
        SortStrategy::Default,
    ];

    /// Human readable name, used as the chart series label.
    pub fn title(&self) -> &'static str {
        match self {
            SortStrategy::Bubble => "Bubble Sort",
            SortStrategy::Heap => "Heap Sort",
            SortStrategy::Merge => "Merge Sort",
            SortStrategy::Default => "Default Sort",
        }
    }

    /// Lowercase key accepted by `FromStr`.
    pub fn key(&self) -> &'static str {
        match self {
            SortStrategy::Bubble => "bubble",
            SortStrategy::Heap => "heap",
            SortStrategy::Merge => "merge",
            SortStrategy::Default => "default",
        }
    }

    /// All strategies ordered by title, the order a legend lists them in.
    pub fn legend_order() -> Vec<SortStrategy> {
        let mut strategies = Self::ALL.to_vec();
        strategies.sort_by_key(|s| s.title());
        strategies
    }

    pub fn sort<T: Ord + Clone>(&self, data: &mut [T]) {
        match self {
            SortStrategy::Bubble => bubble_sort(data),
            SortStrategy::Heap => heap_sort(data),
            SortStrategy::Merge => merge_sort(data),
            SortStrategy::Default => data.sort(),
        }
    }

    /// Parse a comma separated list such as `"bubble, merge"`.
    pub fn parse_list(s: &str) -> Result<Vec<SortStrategy>, BenchError> {
        s.split(',')
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl std::str::FromStr for SortStrategy {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bubble" => Ok(SortStrategy::Bubble),
            "heap" => Ok(SortStrategy::Heap),
            "merge" => Ok(SortStrategy::Merge),
            "default" | "std" => Ok(SortStrategy::Default),
            _ => Err(BenchError::UnknownStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
