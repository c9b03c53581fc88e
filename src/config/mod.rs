//! Configuration module for sortbench.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Benchmark and Observability.

mod benchmark_config;
mod observability_config;

pub use benchmark_config::BenchmarkEnvConfig;
pub use observability_config::ObservabilityEnvConfig;

use crate::domain::chart_bounds::{ChartBounds, ChartScale};
use crate::domain::errors::BenchError;
use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub benchmark: BenchmarkEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables and validate it.
    pub fn from_env() -> Result<Self> {
        let benchmark =
            BenchmarkEnvConfig::from_env().context("Failed to load benchmark config")?;
        let observability = ObservabilityEnvConfig::from_env();

        let config = Self {
            benchmark,
            observability,
        };
        config.validate().context("Invalid benchmark config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        let scale = self.scale();
        scale.validate()?;
        scale.check_slider(self.benchmark.initial_n)?;
        if self.benchmark.sample_count == 0 {
            return Err(BenchError::InvalidConfig {
                reason: "sample count must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn scale(&self) -> ChartScale {
        self.benchmark.scale()
    }

    pub fn initial_bounds(&self) -> ChartBounds {
        ChartBounds::new(self.benchmark.initial_n)
    }
}
