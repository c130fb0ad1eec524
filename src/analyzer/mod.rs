//! Analyzer module - conversation quality analysis engine

pub mod engine;
pub mod features;
pub mod metrics;
pub mod normalizer;
pub mod report;
pub mod scoring;

pub use engine::AnalysisEngine;
pub use features::FeatureSet;
pub use scoring::{Aggregator, Weights};
