// Measurement cache, sampling and reporting
pub mod benchmarking;

// Background worker handle
pub mod client;

// Chart session state
pub mod session;
