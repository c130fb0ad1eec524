//! Completeness: whether the user's turns were answered and the exchange was
//! brought to a close

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue};

const ANSWERED_WEIGHT: f64 = 80.0;
const CLOSING_BONUS: f64 = 20.0;
/// An agent-only conversation has nothing to answer; treat it as mostly
/// complete rather than penalizing the missing questions.
const NO_USER_TURNS_SCORE: f64 = 70.0;

/// Weighs the ratio of answered user turns, with a bonus when any agent turn
/// carries a closing signal.
pub struct CompletenessScorer;

impl CompletenessScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompletenessScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for CompletenessScorer {
    fn name(&self) -> MetricName {
        MetricName::Completeness
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        if features.agent_turns.is_empty() {
            return MetricValue::Numeric(0.0);
        }
        if features.user_turns == 0 {
            return MetricValue::Numeric(NO_USER_TURNS_SCORE);
        }

        let answered_ratio = features.answered_user_turns as f64 / features.user_turns as f64;
        let mut score = ANSWERED_WEIGHT * answered_ratio;
        if features.any_agent_closing() {
            score += CLOSING_BONUS;
        }
        MetricValue::Numeric(score)
    }
}
