//! Sentiment: majority polarity of the user's turns

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue, Sentiment};

/// Counts user turns containing positive vs negative keywords and reports
/// the majority. Ties and keyword-free conversations are neutral.
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for SentimentScorer {
    fn name(&self) -> MetricName {
        MetricName::Sentiment
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        let sentiment = if features.positive_user_turns > features.negative_user_turns {
            Sentiment::Positive
        } else if features.negative_user_turns > features.positive_user_turns {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        MetricValue::Category(sentiment.label())
    }
}
