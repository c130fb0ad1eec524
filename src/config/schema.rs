//! Config schema and deserialization

use crate::analyzer::scoring::Weights;
use serde::Deserialize;

/// The phrase lists driving all keyword matching. Injected configuration:
/// swapping a list changes scoring behavior without touching any scorer.
///
/// Matching is case-insensitive substring matching against the normalized
/// message text, except `filler`, which is matched as whole words.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Lexicons {
    /// Positive user-mood keywords
    pub positive: Vec<String>,
    /// Negative user-mood keywords
    pub negative: Vec<String>,
    /// Empathy markers looked for in agent turns
    pub empathy: Vec<String>,
    /// Stock can't-answer phrases
    pub fallback: Vec<String>,
    /// Requests for a human takeover
    pub escalation: Vec<String>,
    /// Closing/confirmation signals
    pub closing: Vec<String>,
    /// Hedging markers penalized by the accuracy scorer
    pub uncertainty: Vec<String>,
    /// Filler words penalized by the clarity scorer
    pub filler: Vec<String>,
}

fn phrases(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

impl Default for Lexicons {
    fn default() -> Self {
        Self {
            positive: phrases(&[
                "thanks",
                "thank you",
                "great",
                "excellent",
                "perfect",
                "awesome",
                "helpful",
                "appreciate",
                "good",
                "nice",
                "solved",
                "resolved",
            ]),
            negative: phrases(&[
                "bad",
                "terrible",
                "awful",
                "horrible",
                "frustrated",
                "angry",
                "disappointed",
                "unsatisfied",
                "wrong",
                "error",
                "broken",
                "issue",
            ]),
            empathy: phrases(&[
                "sorry",
                "understand",
                "apologize",
                "feel",
                "concern",
                "worry",
                "help",
                "support",
                "assist",
                "glad",
                "happy to",
            ]),
            fallback: phrases(&[
                "i don't know",
                "i'm not sure",
                "i can't help",
                "i don't understand",
                "i'm unable to",
                "i cannot",
                "i don't have",
                "i'm sorry, i don't",
            ]),
            escalation: phrases(&[
                "manager",
                "supervisor",
                "human",
                "representative",
                "escalate",
                "transfer",
                "speak to someone",
                "talk to a person",
            ]),
            closing: phrases(&[
                "resolved",
                "solved",
                "fixed",
                "completed",
                "done",
                "finished",
                "taken care of",
                "handled",
                "sorted",
                "addressed",
                "thanks",
                "thank you",
            ]),
            uncertainty: phrases(&[
                "maybe",
                "probably",
                "might",
                "possibly",
                "i think",
                "i believe",
                "not sure",
            ]),
            filler: phrases(&["um", "uh", "er", "ah"]),
        }
    }
}

/// Root config structure for .tenorrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    pub extends: Option<String>,

    /// Minimum overall score (exit 1 if a run lands below it)
    pub threshold: Option<f64>,

    /// Aggregator weight table; must sum to 1.0
    pub weights: Option<Weights>,

    /// Phrase lists; a configured category replaces the built-in one wholesale
    pub lexicons: Option<Lexicons>,

    /// Glob patterns for transcripts to exclude from directory walks
    pub ignore: Vec<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<f64>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        self
    }

    /// The effective weight table
    pub fn weights(&self) -> Weights {
        self.weights.unwrap_or_default()
    }

    /// The effective phrase lists
    pub fn lexicons(&self) -> Lexicons {
        self.lexicons.clone().unwrap_or_default()
    }

    /// Merge another config into this one (for extends). Base values are
    /// overridden by this config's values; ignore lists concatenate.
    pub fn merge_from(&mut self, base: Config) {
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.weights.is_none() {
            self.weights = base.weights;
        }
        if self.lexicons.is_none() {
            self.lexicons = base.lexicons;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;
    }
}
