// Chart bounds and slider scale
pub mod chart_bounds;

// Timed observations and cache keys
pub mod measurement;

// Sort strategies and algorithms
pub mod sorting;

// Domain-specific error types
pub mod errors;
