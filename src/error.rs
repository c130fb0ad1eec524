//! Error taxonomy for the analysis engine

use thiserror::Error;

/// Errors surfaced by the analysis engine.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The conversation cannot be analyzed at all: no messages, or input
    /// that fails to decode into messages. The run aborts with no partial
    /// report.
    #[error("invalid conversation: {0}")]
    InvalidConversation(String),

    /// Aggregator weights (or other engine configuration) are invalid.
    /// Raised when the engine is constructed, never during a run.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A report slot was left empty or filled with the wrong shape. This is
    /// an engine defect, not bad input.
    #[error("incomplete analysis: {0}")]
    IncompleteAnalysis(String),
}
