//! Message normalization - first stage of an analysis run

use crate::{AnalysisError, Message, Sender};
use chrono::{DateTime, Utc};

/// A message prepared for scoring: original text trimmed for display, plus a
/// lowercased copy for lexicon matching.
#[derive(Debug, Clone)]
pub struct NormalizedMessage {
    pub sender: Sender,
    pub text: String,
    pub matchable: String,
    pub timestamp: DateTime<Utc>,
}

impl NormalizedMessage {
    pub fn word_count(&self) -> usize {
        self.matchable.split_whitespace().count()
    }
}

/// Normalize raw messages for scoring. Pure transform; the input list is
/// left untouched. An empty conversation is the one fatal input condition.
pub fn normalize(messages: &[Message]) -> Result<Vec<NormalizedMessage>, AnalysisError> {
    if messages.is_empty() {
        return Err(AnalysisError::InvalidConversation(
            "conversation has no messages".to_string(),
        ));
    }

    Ok(messages
        .iter()
        .map(|msg| {
            let text = msg.text.trim().to_string();
            NormalizedMessage {
                sender: msg.sender,
                matchable: text.to_lowercase(),
                text,
                timestamp: msg.timestamp,
            }
        })
        .collect())
}
