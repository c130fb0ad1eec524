//! Empathy: how often the agent acknowledges the user's situation

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue};

/// Proportion of agent turns containing an empathy marker ("sorry",
/// "i understand", ...), scaled to 0-100.
pub struct EmpathyScorer;

impl EmpathyScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmpathyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for EmpathyScorer {
    fn name(&self) -> MetricName {
        MetricName::Empathy
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        if features.agent_turns.is_empty() {
            return MetricValue::Numeric(0.0);
        }
        let ratio = features.empathy_turns() as f64 / features.agent_turn_count() as f64;
        MetricValue::Numeric(ratio * 100.0)
    }
}
