//! Benchmark configuration parsing from environment variables.
//!
//! This module handles the slider scale, sampling and report settings.

use crate::domain::chart_bounds::ChartScale;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Benchmark environment configuration
#[derive(Debug, Clone)]
pub struct BenchmarkEnvConfig {
    // Slider
    pub slider_min: u32,
    pub slider_max: u32,
    pub initial_n: u32,

    // Bounds
    pub lower_step: u32,
    pub bound_multiplier: usize,

    // Sampling
    pub sample_count: usize,
    pub seed: Option<u64>,

    // Output
    pub report_dir: String,
}

impl Default for BenchmarkEnvConfig {
    fn default() -> Self {
        Self {
            slider_min: 10,
            slider_max: 25,
            initial_n: 10,
            lower_step: 5,
            bound_multiplier: 100,
            sample_count: 10,
            seed: None,
            report_dir: "benchmark_reports".to_string(),
        }
    }
}

impl BenchmarkEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let seed = match env::var("BENCH_SEED") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("Failed to parse BENCH_SEED - must be an unsigned integer")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            slider_min: Self::parse("SLIDER_MIN", defaults.slider_min)?,
            slider_max: Self::parse("SLIDER_MAX", defaults.slider_max)?,
            initial_n: Self::parse("INITIAL_N", defaults.initial_n)?,
            lower_step: Self::parse("LOWER_STEP", defaults.lower_step)?,
            bound_multiplier: Self::parse("BOUND_MULTIPLIER", defaults.bound_multiplier)?,
            sample_count: Self::parse("SAMPLE_COUNT", defaults.sample_count)?,
            seed,
            report_dir: env::var("REPORT_DIR").unwrap_or(defaults.report_dir),
        })
    }

    pub fn scale(&self) -> ChartScale {
        ChartScale {
            slider_min: self.slider_min,
            slider_max: self.slider_max,
            lower_step: self.lower_step,
            multiplier: self.bound_multiplier,
        }
    }

    fn parse<T>(key: &str, default: T) -> Result<T>
    where
        T: FromStr + ToString,
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .trim()
            .parse::<T>()
            .context(format!("Failed to parse {}", key))
    }
}
