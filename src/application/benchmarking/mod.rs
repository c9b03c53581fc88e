pub mod reporting;
pub mod repository;
pub mod sampling;

pub use reporting::BenchmarkReporter;
pub use repository::{CacheStats, MeasurementRepo};
