//! Chart state driven by the slider and the strategy legend.
//!
//! `ChartBounds` is what the user edits. `ChartScale` turns slider steps
//! into element counts.

use crate::domain::errors::BenchError;
use crate::domain::sorting::SortStrategy;
use std::ops::RangeInclusive;

/// Slider value plus the strategies currently plotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBounds {
    pub n: u32,
    pub strategies: Vec<SortStrategy>,
}

impl Default for ChartBounds {
    fn default() -> Self {
        Self {
            n: 10,
            strategies: SortStrategy::ALL.to_vec(),
        }
    }
}

impl ChartBounds {
    pub fn new(n: u32) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    /// Identity of the bounds. Samples must be recomputed whenever it changes.
    pub fn id(&self) -> String {
        let titles: Vec<&str> = self.strategies.iter().map(|s| s.title()).collect();
        format!("{}, {}", self.n, titles.join(", "))
    }

    pub fn is_shown(&self, strategy: SortStrategy) -> bool {
        self.strategies.contains(&strategy)
    }

    /// Remove `strategy` if shown, otherwise append it. Returns whether it is shown afterwards.
    pub fn toggle(&mut self, strategy: SortStrategy) -> bool {
        if let Some(index) = self.strategies.iter().position(|s| *s == strategy) {
            self.strategies.remove(index);
            false
        } else {
            self.strategies.push(strategy);
            true
        }
    }
}

/// Maps slider steps to element counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartScale {
    pub slider_min: u32,
    pub slider_max: u32,
    pub lower_step: u32,
    pub multiplier: usize,
}

impl Default for ChartScale {
    fn default() -> Self {
        Self {
            slider_min: 10,
            slider_max: 25,
            lower_step: 5,
            multiplier: 100,
        }
    }
}

impl ChartScale {
    pub fn slider_range(&self) -> RangeInclusive<u32> {
        self.slider_min..=self.slider_max
    }

    pub fn bound(&self, step: u32) -> usize {
        step as usize * self.multiplier
    }

    pub fn lower_bound(&self) -> usize {
        self.bound(self.lower_step)
    }

    pub fn upper_bound(&self, bounds: &ChartBounds) -> usize {
        self.bound(bounds.n)
    }

    /// X axis domain `[lower, upper]` for the given bounds.
    pub fn x_domain(&self, bounds: &ChartBounds) -> (usize, usize) {
        (self.lower_bound(), self.upper_bound(bounds))
    }

    pub fn check_slider(&self, n: u32) -> Result<(), BenchError> {
        if self.slider_range().contains(&n) {
            Ok(())
        } else {
            Err(BenchError::SliderOutOfRange {
                value: n,
                min: self.slider_min,
                max: self.slider_max,
            })
        }
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.slider_min > self.slider_max {
            return Err(BenchError::InvalidConfig {
                reason: format!(
                    "slider min {} is greater than slider max {}",
                    self.slider_min, self.slider_max
                ),
            });
        }
        if self.lower_step >= self.slider_min {
            return Err(BenchError::InvalidConfig {
                reason: format!(
                    "lower step {} must be below slider min {}",
                    self.lower_step, self.slider_min
                ),
            });
        }
        if self.multiplier == 0 {
            return Err(BenchError::InvalidConfig {
                reason: "bound multiplier must be positive".to_string(),
            });
        }
        if (self.slider_max as usize)
            .checked_mul(self.multiplier)
            .is_none()
        {
            return Err(BenchError::InvalidConfig {
                reason: format!(
                    "slider max {} times bound multiplier {} overflows",
                    self.slider_max, self.multiplier
                ),
            });
        }
        Ok(())
    }
}
