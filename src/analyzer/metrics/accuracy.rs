//! Accuracy: confidence of the agent's replies, approximated by the absence
//! of hedging language

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue};

const BASELINE: f64 = 100.0;
const HEDGE_PENALTY: f64 = 15.0;

/// Starts every agent turn at full score and subtracts a fixed penalty per
/// uncertainty marker ("i think", "maybe", ...), then averages across turns.
pub struct AccuracyScorer;

impl AccuracyScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AccuracyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for AccuracyScorer {
    fn name(&self) -> MetricName {
        MetricName::Accuracy
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        if features.agent_turns.is_empty() {
            return MetricValue::Numeric(0.0);
        }

        let total: f64 = features
            .agent_turns
            .iter()
            .map(|turn| (BASELINE - turn.uncertainty_hits as f64 * HEDGE_PENALTY).max(0.0))
            .sum();
        MetricValue::Numeric(total / features.agent_turns.len() as f64)
    }
}
