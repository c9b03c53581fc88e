pub mod algorithms;
pub mod strategy;

pub use strategy::SortStrategy;
