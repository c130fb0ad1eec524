//! Metric scorers - one independent heuristic per report slot

pub mod accuracy;
pub mod clarity;
pub mod completeness;
pub mod empathy;
pub mod escalation;
pub mod fallback;
pub mod relevance;
pub mod resolution;
pub mod response_time;
pub mod sentiment;

pub use accuracy::AccuracyScorer;
pub use clarity::ClarityScorer;
pub use completeness::CompletenessScorer;
pub use empathy::EmpathyScorer;
pub use escalation::EscalationScorer;
pub use fallback::FallbackScorer;
pub use relevance::RelevanceScorer;
pub use resolution::ResolutionScorer;
pub use response_time::ResponseTimeScorer;
pub use sentiment::SentimentScorer;

use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue};

/// Trait for metric scorers.
///
/// Every scorer is a pure function of the normalized conversation and the
/// shared feature set. Scorers never depend on each other, so the engine is
/// free to evaluate them in any order or concurrently.
pub trait MetricScorer: Sync {
    /// Report slot this scorer fills
    fn name(&self) -> MetricName;

    /// Compute the metric. Sparse input degrades to a minimum or neutral
    /// value; only the normalizer rejects a conversation outright.
    fn score(&self, messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue;
}
