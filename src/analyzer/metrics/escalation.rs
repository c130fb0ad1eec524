//! Escalation need: should a human take this conversation over

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{EscalationNeed, MetricName, MetricValue};

/// Repeated negative user turns flag escalation even when nobody asked for
/// a human outright.
const PRESSURE_THRESHOLD: usize = 2;

/// Flags escalation on any explicit escalation phrase anywhere in the
/// conversation, or on sustained negative user sentiment.
pub struct EscalationScorer;

impl EscalationScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EscalationScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for EscalationScorer {
    fn name(&self) -> MetricName {
        MetricName::EscalationNeed
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        let needed = features.escalation_hits > 0
            || features.negative_user_turns >= PRESSURE_THRESHOLD;
        let need = if needed {
            EscalationNeed::Needed
        } else {
            EscalationNeed::NotNeeded
        };
        MetricValue::Category(need.label())
    }
}
