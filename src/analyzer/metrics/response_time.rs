//! Response time: how quickly the agent followed up on user turns

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue};

/// Mean of the user->agent response deltas in seconds. A conversation with
/// no valid pair is unmeasured, never zero.
pub struct ResponseTimeScorer;

impl ResponseTimeScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResponseTimeScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for ResponseTimeScorer {
    fn name(&self) -> MetricName {
        MetricName::ResponseTime
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        if features.response_deltas.is_empty() {
            return MetricValue::Unmeasured;
        }
        let mean =
            features.response_deltas.iter().sum::<f64>() / features.response_deltas.len() as f64;
        MetricValue::Numeric(mean)
    }
}
