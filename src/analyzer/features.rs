//! Lexical feature extraction - per-run signals shared by all scorers

use crate::analyzer::normalizer::NormalizedMessage;
use crate::config::Lexicons;
use crate::Sender;
use regex::Regex;
use std::collections::HashSet;

/// Signals derived from one agent turn, used by the clarity and accuracy
/// scorers.
#[derive(Debug, Clone, Default)]
pub struct AgentTurn {
    pub chars: usize,
    pub words: usize,
    pub has_sentence_punct: bool,
    pub filler_hits: usize,
    pub uncertainty_hits: usize,
    pub keywords: HashSet<String>,
    pub has_fallback: bool,
    pub has_empathy: bool,
    pub has_closing: bool,
}

/// Signals derived once per analysis run and shared read-only across the
/// metric scorers. Owned by the run; dropped when the report is assembled.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    pub message_count: usize,
    pub user_turns: usize,
    pub user_words: usize,
    pub agent_words: usize,
    /// One entry per agent turn, in conversation order
    pub agent_turns: Vec<AgentTurn>,
    /// Topic keywords (words of four or more letters) across all user turns
    pub user_keywords: HashSet<String>,
    pub positive_user_turns: usize,
    pub negative_user_turns: usize,
    /// User turns with at least one agent turn somewhere after them
    pub answered_user_turns: usize,
    /// Escalation-phrase matches across the whole conversation
    pub escalation_hits: usize,
    /// Whether the last agent turn carries a closing/confirmation phrase
    pub final_agent_closing: bool,
    /// Seconds between each user turn and a directly following agent turn.
    /// A user turn with no adjacent agent reply contributes nothing here.
    pub response_deltas: Vec<f64>,
}

impl FeatureSet {
    /// Derive all signals from the normalized conversation. The lexicons are
    /// injected so alternate phrase lists are a configuration change.
    pub fn extract(messages: &[NormalizedMessage], lexicons: &Lexicons) -> Self {
        let word_re = Regex::new(r"\b[a-z]{4,}\b").unwrap();

        let mut features = FeatureSet {
            message_count: messages.len(),
            ..FeatureSet::default()
        };

        for (i, msg) in messages.iter().enumerate() {
            features.escalation_hits += count_matches(&msg.matchable, &lexicons.escalation);

            match msg.sender {
                Sender::User => {
                    features.user_turns += 1;
                    features.user_words += msg.word_count();

                    for m in word_re.find_iter(&msg.matchable) {
                        features.user_keywords.insert(m.as_str().to_string());
                    }
                    if contains_any(&msg.matchable, &lexicons.positive) {
                        features.positive_user_turns += 1;
                    }
                    if contains_any(&msg.matchable, &lexicons.negative) {
                        features.negative_user_turns += 1;
                    }
                    if messages[i + 1..].iter().any(|m| m.sender == Sender::Agent) {
                        features.answered_user_turns += 1;
                    }
                    if let Some(next) = messages.get(i + 1) {
                        if next.sender == Sender::Agent {
                            let delta =
                                (next.timestamp - msg.timestamp).num_milliseconds() as f64 / 1000.0;
                            // A non-positive delta means the timestamps are out
                            // of order; not a valid response pair.
                            if delta > 0.0 {
                                features.response_deltas.push(delta);
                            }
                        }
                    }
                }
                Sender::Agent => {
                    let words = msg.word_count();
                    features.agent_words += words;
                    features.agent_turns.push(AgentTurn {
                        chars: msg.text.chars().count(),
                        words,
                        has_sentence_punct: msg.matchable.contains(['.', '!', '?']),
                        filler_hits: lexicons
                            .filler
                            .iter()
                            .filter(|w| contains_word(&msg.matchable, w))
                            .count(),
                        uncertainty_hits: count_matches(&msg.matchable, &lexicons.uncertainty),
                        keywords: word_re
                            .find_iter(&msg.matchable)
                            .map(|m| m.as_str().to_string())
                            .collect(),
                        has_fallback: contains_any(&msg.matchable, &lexicons.fallback),
                        has_empathy: contains_any(&msg.matchable, &lexicons.empathy),
                        has_closing: contains_any(&msg.matchable, &lexicons.closing),
                    });
                }
            }
        }

        features.final_agent_closing = features
            .agent_turns
            .last()
            .map(|turn| turn.has_closing)
            .unwrap_or(false);

        features
    }

    pub fn agent_turn_count(&self) -> usize {
        self.agent_turns.len()
    }

    /// Agent turns containing at least one fallback phrase
    pub fn fallback_turns(&self) -> usize {
        self.agent_turns.iter().filter(|t| t.has_fallback).count()
    }

    /// Agent turns containing at least one empathy marker
    pub fn empathy_turns(&self) -> usize {
        self.agent_turns.iter().filter(|t| t.has_empathy).count()
    }

    /// Whether any agent turn carries a closing signal
    pub fn any_agent_closing(&self) -> bool {
        self.agent_turns.iter().any(|t| t.has_closing)
    }
}

/// Substring phrase match, the same policy for multi-word phrases the
/// original keyword lists were written for.
fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| text.contains(p.as_str()))
}

fn count_matches(text: &str, phrases: &[String]) -> usize {
    phrases.iter().filter(|p| text.contains(p.as_str())).count()
}

/// Whole-token match for single-word entries (fillers like "er" would hit
/// inside ordinary words as substrings).
fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .any(|token| token == word)
}
