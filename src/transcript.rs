//! Transcript loading - JSON conversations from files or memory
//!
//! Two input forms are accepted: an object carrying identity and title, or a
//! bare message array.
//!
//! ```json
//! {"id": "conv-7", "title": "Order inquiry", "messages": [...]}
//! [{"sender": "user", "text": "...", "timestamp": "..."}, ...]
//! ```
//!
//! Message fields take the legacy spellings too: `sender` accepts "ai" for
//! the agent side, and `message` is an alias for `text`.

use crate::{AnalysisError, Conversation, Message};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptDoc {
    Object {
        #[serde(default)]
        id: String,
        #[serde(default)]
        title: String,
        messages: Vec<Message>,
    },
    Messages(Vec<Message>),
}

/// Parse a conversation from JSON text. `fallback_id` fills the identity
/// when the document carries none (e.g. the source file stem).
pub fn from_json(json: &str, fallback_id: Option<&str>) -> Result<Conversation, AnalysisError> {
    let doc: TranscriptDoc = serde_json::from_str(json).map_err(|e| {
        AnalysisError::InvalidConversation(format!("transcript does not decode: {}", e))
    })?;

    let (id, title, messages) = match doc {
        TranscriptDoc::Object {
            id,
            title,
            messages,
        } => (id, title, messages),
        TranscriptDoc::Messages(messages) => (String::new(), String::new(), messages),
    };

    let id = if id.is_empty() {
        fallback_id.unwrap_or_default().to_string()
    } else {
        id
    };

    Ok(Conversation::new(id, title, messages))
}

/// Load a conversation from a transcript file. The file stem becomes the
/// conversation identity when the JSON carries none.
pub fn from_file(path: &Path) -> Result<Conversation> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
    let stem = path.file_stem().and_then(|s| s.to_str());
    let conversation = from_json(&content, stem)
        .with_context(|| format!("Failed to parse transcript: {}", path.display()))?;
    Ok(conversation)
}
