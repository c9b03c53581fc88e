use thiserror::Error;

/// Errors raised while configuring or running sort benchmarks
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Unknown sort strategy: {0}. Valid: bubble, heap, merge, default")]
    UnknownStrategy(String),

    #[error("Slider value {value} outside range {min}..={max}")]
    SliderOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Benchmark worker is not running")]
    WorkerUnavailable,

    #[error("Benchmark worker failed: {reason}")]
    WorkerFailed { reason: String },

    #[error("Failed to start benchmark runtime: {0}")]
    RuntimeStartup(#[source] std::io::Error),

    #[error("Timed out after {waited_ms}ms waiting for measurements")]
    Timeout { waited_ms: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_error_formatting() {
        let error = BenchError::SliderOutOfRange {
            value: 30,
            min: 10,
            max: 25,
        };

        let msg = error.to_string();
        assert!(msg.contains("30"));
        assert!(msg.contains("10..=25"));
    }

    #[test]
    fn test_timeout_formatting() {
        let error = BenchError::Timeout { waited_ms: 1500 };
        assert!(error.to_string().contains("1500ms"));
    }
}
