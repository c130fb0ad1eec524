//! Analysis engine - one conversation in, one complete report out

use crate::analyzer::features::FeatureSet;
use crate::analyzer::metrics::{
    AccuracyScorer, ClarityScorer, CompletenessScorer, EmpathyScorer, EscalationScorer,
    FallbackScorer, MetricScorer, RelevanceScorer, ResolutionScorer, ResponseTimeScorer,
    SentimentScorer,
};
use crate::analyzer::scoring::{Aggregator, Weights};
use crate::analyzer::{normalizer, report};
use crate::config::{Config, Lexicons};
use crate::transcript;
use crate::{
    AnalysisError, AnalysisReport, Conversation, EscalationNeed, MetricName, MetricValue,
    Resolution,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main analysis engine. Normalizes the conversation, extracts the shared
/// feature set, fans out over the scorers, joins in the aggregator, and
/// assembles the report.
///
/// The scorers have no dependency on each other, so the fan-out runs them in
/// any order; only the aggregator waits for all ten slots.
pub struct AnalysisEngine {
    scorers: Vec<Box<dyn MetricScorer>>,
    aggregator: Aggregator,
    lexicons: Lexicons,
}

fn default_scorers() -> Vec<Box<dyn MetricScorer>> {
    vec![
        Box::new(ClarityScorer::new()),
        Box::new(RelevanceScorer::new()),
        Box::new(AccuracyScorer::new()),
        Box::new(CompletenessScorer::new()),
        Box::new(SentimentScorer::new()),
        Box::new(EmpathyScorer::new()),
        Box::new(ResponseTimeScorer::new()),
        Box::new(ResolutionScorer::new()),
        Box::new(EscalationScorer::new()),
        Box::new(FallbackScorer::new()),
    ]
}

impl AnalysisEngine {
    /// Engine with default weights and lexicons
    pub fn new() -> Self {
        Self {
            scorers: default_scorers(),
            aggregator: Aggregator::new(),
            lexicons: Lexicons::default(),
        }
    }

    /// Engine configured from a loaded config file. A bad weight table is a
    /// configuration error here, before any conversation is analyzed.
    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        let aggregator = Aggregator::with_weights(config.weights())?;
        Ok(Self {
            scorers: default_scorers(),
            aggregator,
            lexicons: config.lexicons(),
        })
    }

    /// Engine with a custom weight table
    pub fn with_weights(weights: Weights) -> Result<Self, AnalysisError> {
        let aggregator = Aggregator::with_weights(weights)?;
        Ok(Self {
            scorers: default_scorers(),
            aggregator,
            lexicons: Lexicons::default(),
        })
    }

    /// Replace the phrase lists (e.g. for a domain-specific lexicon)
    pub fn with_lexicons(mut self, lexicons: Lexicons) -> Self {
        self.lexicons = lexicons;
        self
    }

    /// Analyze one conversation and produce the complete report.
    ///
    /// Fails with `InvalidConversation` on an empty message list; sparse
    /// input (no agent turns, no valid response pairs) degrades individual
    /// scores instead.
    pub fn analyze(&self, conversation: &Conversation) -> Result<AnalysisReport, AnalysisError> {
        let normalized = normalizer::normalize(&conversation.messages)?;
        let features = FeatureSet::extract(&normalized, &self.lexicons);

        let slots: BTreeMap<MetricName, MetricValue> = self
            .scorers
            .par_iter()
            .map(|scorer| (scorer.name(), scorer.score(&normalized, &features)))
            .collect();

        let overall_score = self.aggregator.overall_score(&slots)?;
        report::assemble(conversation, &slots, overall_score)
    }

    /// Analyze one transcript file
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisReport> {
        let conversation = transcript::from_file(path)?;
        self.analyze(&conversation)
            .with_context(|| format!("Failed to analyze {}", path.display()))
    }

    /// Analyze multiple transcript files sequentially
    pub fn analyze_many(&self, paths: &[PathBuf]) -> Vec<Result<AnalysisReport>> {
        paths.iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Analyze multiple transcript files in parallel using rayon
    pub fn analyze_parallel(&self, paths: &[PathBuf]) -> Vec<Result<AnalysisReport>> {
        paths.par_iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Get aggregate stats from multiple reports
    pub fn aggregate_stats(reports: &[AnalysisReport]) -> AggregateStats {
        if reports.is_empty() {
            return AggregateStats::default();
        }

        let total: f64 = reports.iter().map(|r| r.overall_score).sum();
        let unresolved = reports
            .iter()
            .filter(|r| r.resolution == Resolution::Unresolved)
            .count();
        let escalations = reports
            .iter()
            .filter(|r| r.escalation_need == EscalationNeed::Needed)
            .count();

        AggregateStats {
            conversations_analyzed: reports.len(),
            average_overall: total / reports.len() as f64,
            unresolved,
            escalations,
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Batch summary across multiple reports
#[derive(Debug, Clone, Default)]
pub struct AggregateStats {
    pub conversations_analyzed: usize,
    pub average_overall: f64,
    pub unresolved: usize,
    pub escalations: usize,
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::{Message, Sender};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    /// Strategy for message text that mixes plain words with phrases the
    /// lexicons react to.
    fn arbitrary_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::sample::select(vec![
                "hello",
                "order",
                "refund",
                "thanks",
                "this is broken",
                "i'm not sure",
                "i understand",
                "maybe",
                "speak to a human",
                "all done",
                "?",
                "!",
                "um",
                "",
            ]),
            0..8,
        )
        .prop_map(|words| words.join(" "))
    }

    fn arbitrary_conversation() -> impl Strategy<Value = Conversation> {
        prop::collection::vec((any::<bool>(), arbitrary_text(), 0i64..600), 1..30).prop_map(
            |turns| {
                let messages = turns
                    .into_iter()
                    .enumerate()
                    .map(|(i, (is_agent, text, offset))| {
                        let sender = if is_agent { Sender::Agent } else { Sender::User };
                        let timestamp = Utc
                            .timestamp_opt(1_700_000_000 + i as i64 * 600 + offset, 0)
                            .unwrap();
                        Message::new(sender, text, timestamp)
                    })
                    .collect();
                Conversation::new("prop-conv", "generated", messages)
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn analysis_always_completes_in_range(conversation in arbitrary_conversation()) {
            let report = AnalysisEngine::new().analyze(&conversation).unwrap();

            for score in [
                report.clarity_score,
                report.relevance_score,
                report.accuracy_score,
                report.completeness_score,
                report.empathy_score,
                report.overall_score,
            ] {
                prop_assert!((0.0..=100.0).contains(&score), "score out of range: {}", score);
            }
            if let Some(avg) = report.response_time_avg {
                prop_assert!(avg > 0.0);
            }
            prop_assert!((0.0..=1.0).contains(&report.fallback_ratio));
        }

        #[test]
        fn analysis_is_deterministic(conversation in arbitrary_conversation()) {
            let engine = AnalysisEngine::new();
            let first = engine.analyze(&conversation).unwrap();
            let second = engine.analyze(&conversation).unwrap();

            prop_assert_eq!(first.clarity_score, second.clarity_score);
            prop_assert_eq!(first.relevance_score, second.relevance_score);
            prop_assert_eq!(first.accuracy_score, second.accuracy_score);
            prop_assert_eq!(first.completeness_score, second.completeness_score);
            prop_assert_eq!(first.empathy_score, second.empathy_score);
            prop_assert_eq!(first.response_time_avg, second.response_time_avg);
            prop_assert_eq!(first.overall_score, second.overall_score);
        }
    }
}
