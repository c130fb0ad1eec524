//! Clarity: how readable and well-formed the agent's replies are

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue};

const BASE: f64 = 50.0;
const OPTIMAL_LENGTH_BONUS: f64 = 20.0;
const PUNCTUATION_BONUS: f64 = 10.0;
const NO_FILLER_BONUS: f64 = 10.0;
const DETAIL_BONUS: f64 = 10.0;

/// Replies in the 20-200 character window read as focused answers; shorter
/// ones tend to be fragments, longer ones ramble.
const OPTIMAL_CHARS: std::ops::RangeInclusive<usize> = 20..=200;
const MIN_DETAIL_WORDS: usize = 5;

/// Scores each agent turn for length, punctuation, and filler words, then
/// averages across turns.
pub struct ClarityScorer;

impl ClarityScorer {
    pub fn new() -> Self {
        Self
    }

    fn turn_score(turn: &crate::analyzer::features::AgentTurn) -> f64 {
        let mut score = BASE;
        if OPTIMAL_CHARS.contains(&turn.chars) {
            score += OPTIMAL_LENGTH_BONUS;
        }
        if turn.has_sentence_punct {
            score += PUNCTUATION_BONUS;
        }
        if turn.filler_hits == 0 {
            score += NO_FILLER_BONUS;
        }
        if turn.words >= MIN_DETAIL_WORDS {
            score += DETAIL_BONUS;
        }
        score.min(100.0)
    }
}

impl Default for ClarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for ClarityScorer {
    fn name(&self) -> MetricName {
        MetricName::Clarity
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        if features.agent_turns.is_empty() {
            return MetricValue::Numeric(0.0);
        }

        let total: f64 = features.agent_turns.iter().map(Self::turn_score).sum();
        MetricValue::Numeric(total / features.agent_turns.len() as f64)
    }
}
