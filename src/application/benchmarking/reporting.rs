use crate::domain::measurement::SortMeasurement;
use crate::domain::sorting::SortStrategy;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub timestamp: DateTime<Utc>,
    pub configuration: String,
    pub results: Vec<SortMeasurement>,
    pub summary: BenchmarkSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: SortStrategy,
    pub samples: usize,
    pub min_elements: usize,
    pub max_elements: usize,
    pub time_at_max: f64,
    pub mean_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub total_samples: usize,
    pub strategies: Vec<StrategySummary>,
    /// Fastest strategy at the largest size every strategy reached.
    pub fastest_at_max: Option<SortStrategy>,
}

pub struct BenchmarkReporter {
    output_dir: PathBuf,
}

impl BenchmarkReporter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let path = output_dir.as_ref().to_path_buf();
        if !path.exists() {
            fs::create_dir_all(&path).context("Failed to create benchmark output directory")?;
        }
        Ok(Self { output_dir: path })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a JSON report and return its path.
    pub fn generate_report(
        &self,
        results: &[SortMeasurement],
        config_desc: &str,
    ) -> Result<PathBuf> {
        let report = BenchmarkReport {
            timestamp: Utc::now(),
            configuration: config_desc.to_string(),
            results: results.to_vec(),
            summary: Self::summarize(results),
        };

        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        let filename = format!(
            "benchmark_report_{}.json",
            report.timestamp.format("%Y%m%d_%H%M%S%.3f")
        );
        let path = self.output_dir.join(&filename);

        // Atomic write: write to temp file then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json).context("Failed to write temp report file")?;
        fs::rename(&temp_path, &path).context("Failed to rename report file")?;

        info!("Report saved to {}", path.display());
        Ok(path)
    }

    pub fn format_table(results: &[SortMeasurement]) -> String {
        if results.is_empty() {
            return "No measurements to report.\n".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "{}", "=".repeat(48));
        let _ = writeln!(out, "{:<14} | {:>10} | {:>16}", "Strategy", "Elements", "Seconds");
        let _ = writeln!(out, "{}", "-".repeat(48));
        for m in results {
            let _ = writeln!(
                out,
                "{:<14} | {:>10} | {:>16.9}",
                m.strategy.title(),
                m.elements,
                m.time
            );
        }
        let _ = writeln!(out, "{}", "=".repeat(48));

        let summary = Self::summarize(results);
        for s in &summary.strategies {
            let _ = writeln!(
                out,
                "{:<14} | {} samples, {}..={} elements, {:.6}s at max, mean {:.6}s",
                s.strategy.title(),
                s.samples,
                s.min_elements,
                s.max_elements,
                s.time_at_max,
                s.mean_time
            );
        }
        if let Some(fastest) = summary.fastest_at_max {
            let _ = writeln!(out, "Fastest at largest size: {}", fastest.title());
        }
        out
    }

    pub fn print_summary(results: &[SortMeasurement]) {
        print!("{}", Self::format_table(results));
    }

    pub fn summarize(results: &[SortMeasurement]) -> BenchmarkSummary {
        // Keep first-seen strategy order.
        let mut order: Vec<SortStrategy> = Vec::new();
        for m in results {
            if !order.contains(&m.strategy) {
                order.push(m.strategy);
            }
        }

        let strategies: Vec<StrategySummary> = order
            .iter()
            .filter_map(|&strategy| {
                let samples: Vec<&SortMeasurement> =
                    results.iter().filter(|m| m.strategy == strategy).collect();
                let largest = samples.iter().max_by_key(|m| m.elements)?;
                let smallest = samples.iter().min_by_key(|m| m.elements)?;
                let mean_time =
                    samples.iter().map(|m| m.time).sum::<f64>() / samples.len() as f64;

                Some(StrategySummary {
                    strategy,
                    samples: samples.len(),
                    min_elements: smallest.elements,
                    max_elements: largest.elements,
                    time_at_max: largest.time,
                    mean_time,
                })
            })
            .collect();

        let common_max = strategies.iter().map(|s| s.max_elements).min();
        let fastest_at_max = common_max.and_then(|size| {
            results
                .iter()
                .filter(|m| m.elements == size)
                .min_by(|a, b| {
                    a.time
                        .partial_cmp(&b.time)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|m| m.strategy)
        });

        BenchmarkSummary {
            total_samples: results.len(),
            strategies,
            fastest_at_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(strategy: SortStrategy, elements: usize, time: f64) -> SortMeasurement {
        SortMeasurement {
            strategy,
            elements,
            time,
        }
    }

    fn fixture() -> Vec<SortMeasurement> {
        vec![
            sample(SortStrategy::Bubble, 500, 0.010),
            sample(SortStrategy::Merge, 500, 0.002),
            sample(SortStrategy::Bubble, 600, 0.020),
            sample(SortStrategy::Merge, 600, 0.003),
        ]
    }

    #[test]
    fn test_summarize() {
        let summary = BenchmarkReporter::summarize(&fixture());
        assert_eq!(summary.total_samples, 4);
        assert_eq!(summary.strategies.len(), 2);

        let bubble = &summary.strategies[0];
        assert_eq!(bubble.strategy, SortStrategy::Bubble);
        assert_eq!(bubble.samples, 2);
        assert_eq!(bubble.min_elements, 500);
        assert_eq!(bubble.max_elements, 600);
        assert!((bubble.time_at_max - 0.020).abs() < 1e-12);
        assert!((bubble.mean_time - 0.015).abs() < 1e-12);

        assert_eq!(summary.fastest_at_max, Some(SortStrategy::Merge));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = BenchmarkReporter::summarize(&[]);
        assert_eq!(summary.total_samples, 0);
        assert!(summary.strategies.is_empty());
        assert_eq!(summary.fastest_at_max, None);
    }

    #[test]
    fn test_format_table() {
        let table = BenchmarkReporter::format_table(&fixture());
        assert!(table.contains("Bubble Sort"));
        assert!(table.contains("Merge Sort"));
        assert!(table.contains("Fastest at largest size: Merge Sort"));
        assert_eq!(
            BenchmarkReporter::format_table(&[]),
            "No measurements to report.\n"
        );
    }

    #[test]
    fn test_generate_report_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = BenchmarkReporter::new(dir.path().join("reports")).unwrap();

        let path = reporter.generate_report(&fixture(), "slider 6").unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));

        let content = fs::read_to_string(&path).unwrap();
        let report: BenchmarkReport = serde_json::from_str(&content).unwrap();
        assert_eq!(report.configuration, "slider 6");
        assert_eq!(report.results.len(), 4);
        assert_eq!(report.summary.fastest_at_max, Some(SortStrategy::Merge));
    }
}
