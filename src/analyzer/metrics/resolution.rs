//! Resolution: did the agent close the conversation out

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue, Resolution};

/// Resolved only when the final agent turn carries a closing/confirmation
/// phrase. Earlier closings don't count; a conversation the agent never
/// wrapped up is unresolved.
pub struct ResolutionScorer;

impl ResolutionScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResolutionScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for ResolutionScorer {
    fn name(&self) -> MetricName {
        MetricName::Resolution
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        let resolution = if features.final_agent_closing {
            Resolution::Resolved
        } else {
            Resolution::Unresolved
        };
        MetricValue::Category(resolution.label())
    }
}
