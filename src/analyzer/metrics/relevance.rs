//! Relevance: whether agent replies stay on the user's topic

use super::MetricScorer;
use crate::analyzer::features::FeatureSet;
use crate::analyzer::normalizer::NormalizedMessage;
use crate::{MetricName, MetricValue};

/// Score when agent turns exist but there is no topic overlap to measure
/// (the user never named a topic, or no agent reply carried keywords).
const NEUTRAL: f64 = 50.0;

/// Compares the topic keywords of each agent turn against the keywords the
/// user used anywhere in the conversation, then averages the overlap.
pub struct RelevanceScorer;

impl RelevanceScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricScorer for RelevanceScorer {
    fn name(&self) -> MetricName {
        MetricName::Relevance
    }

    fn score(&self, _messages: &[NormalizedMessage], features: &FeatureSet) -> MetricValue {
        if features.agent_turns.is_empty() {
            return MetricValue::Numeric(0.0);
        }

        let overlaps: Vec<f64> = features
            .agent_turns
            .iter()
            .filter(|turn| !turn.keywords.is_empty())
            .map(|turn| {
                let shared = turn
                    .keywords
                    .iter()
                    .filter(|kw| features.user_keywords.contains(*kw))
                    .count();
                shared as f64 / turn.keywords.len() as f64
            })
            .collect();

        if overlaps.is_empty() || features.user_keywords.is_empty() {
            return MetricValue::Numeric(NEUTRAL);
        }

        let mean = overlaps.iter().sum::<f64>() / overlaps.len() as f64;
        MetricValue::Numeric(mean * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::normalizer::normalize;
    use crate::config::Lexicons;
    use crate::{Message, Sender};
    use chrono::{TimeZone, Utc};

    fn score_of(messages: Vec<Message>) -> MetricValue {
        let normalized = normalize(&messages).unwrap();
        let features = FeatureSet::extract(&normalized, &Lexicons::default());
        RelevanceScorer::new().score(&normalized, &features)
    }

    fn msg(sender: Sender, text: &str) -> Message {
        Message::new(sender, text, Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    }

    #[test]
    fn test_on_topic_reply_scores_high() {
        let value = score_of(vec![
            msg(Sender::User, "My invoice shows a double charge"),
            msg(Sender::Agent, "That invoice charge looks wrong"),
        ]);
        // agent keywords: that, invoice, charge, looks, wrong; shared: invoice, charge
        assert_eq!(value, MetricValue::Numeric(40.0));
    }

    #[test]
    fn test_off_topic_reply_scores_zero() {
        let value = score_of(vec![
            msg(Sender::User, "My invoice shows a double charge"),
            msg(Sender::Agent, "Have you tried restarting your router today?"),
        ]);
        assert_eq!(value, MetricValue::Numeric(0.0));
    }

    #[test]
    fn test_no_agent_turns_scores_zero() {
        let value = score_of(vec![msg(Sender::User, "My invoice shows a double charge")]);
        assert_eq!(value, MetricValue::Numeric(0.0));
    }

    #[test]
    fn test_no_user_keywords_is_neutral() {
        // "hi" and "ok" are under four letters, so there is no topic to match
        let value = score_of(vec![
            msg(Sender::User, "hi"),
            msg(Sender::Agent, "Hello, how can I help you today?"),
        ]);
        assert_eq!(value, MetricValue::Numeric(NEUTRAL));
    }

    #[test]
    fn test_keywordless_agent_turns_skipped() {
        let value = score_of(vec![
            msg(Sender::User, "My invoice shows a double charge"),
            msg(Sender::Agent, "ok"),
            msg(Sender::Agent, "That invoice charge looks wrong"),
        ]);
        // only the second agent turn is measurable
        assert_eq!(value, MetricValue::Numeric(40.0));
    }
}
