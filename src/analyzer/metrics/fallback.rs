//! Fallback frequency: how often the agent admitted it could not answer

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue};

/// Counts agent turns containing a fallback phrase ("I don't understand",
/// "I'm not sure", ...) and reports the count alongside its share of all
/// agent turns.
pub struct FallbackScorer;

impl FallbackScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FallbackScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for FallbackScorer {
    fn name(&self) -> MetricName {
        MetricName::FallbackFrequency
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        let count = features.fallback_turns();
        let ratio = if features.agent_turns.is_empty() {
            0.0
        } else {
            count as f64 / features.agent_turn_count() as f64
        };
        MetricValue::Frequency { count, ratio }
    }
}
