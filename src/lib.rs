//! Tenor: Conversation Quality Analyzer
//!
//! This library analyzes finished conversations between a human user and an
//! automated agent, producing a quality report of eleven heuristic metrics
//! plus a weighted overall score.

pub mod analyzer;
pub mod config;
pub mod reporter;
pub mod transcript;

mod error;

pub use error::AnalysisError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    /// The automated side of the conversation ("agent", or "ai" in the
    /// legacy wire format)
    Agent,
}

impl<'de> Deserialize<'de> for Sender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "agent" | "ai" => Ok(Sender::Agent),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["user", "agent", "ai"],
            )),
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Agent => write!(f, "agent"),
        }
    }
}

/// One message in a conversation. Immutable once ingested; conversation
/// order is the array index, not the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    /// Message body ("message" in the legacy wire format)
    #[serde(alias = "message")]
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp,
        }
    }
}

/// An ordered exchange of messages with an identity and a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages,
        }
    }
}

/// Overall user mood across the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether the final agent turn closed the conversation out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Resolved,
    Unresolved,
}

impl Resolution {
    pub fn label(self) -> &'static str {
        match self {
            Resolution::Resolved => "resolved",
            Resolution::Unresolved => "unresolved",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "resolved" => Some(Resolution::Resolved),
            "unresolved" => Some(Resolution::Unresolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether the conversation should be handed to a human
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscalationNeed {
    #[serde(rename = "needed")]
    Needed,
    #[serde(rename = "not-needed")]
    NotNeeded,
}

impl EscalationNeed {
    pub fn label(self) -> &'static str {
        match self {
            EscalationNeed::Needed => "needed",
            EscalationNeed::NotNeeded => "not-needed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "needed" => Some(EscalationNeed::Needed),
            "not-needed" => Some(EscalationNeed::NotNeeded),
            _ => None,
        }
    }
}

impl std::fmt::Display for EscalationNeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The eleven report slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricName {
    Clarity,
    Relevance,
    Accuracy,
    Completeness,
    Sentiment,
    Empathy,
    ResponseTime,
    Resolution,
    EscalationNeed,
    FallbackFrequency,
    OverallScore,
}

impl MetricName {
    /// The slots scorers fill (everything except the aggregate)
    pub const SCORED: [MetricName; 10] = [
        MetricName::Clarity,
        MetricName::Relevance,
        MetricName::Accuracy,
        MetricName::Completeness,
        MetricName::Sentiment,
        MetricName::Empathy,
        MetricName::ResponseTime,
        MetricName::Resolution,
        MetricName::EscalationNeed,
        MetricName::FallbackFrequency,
    ];
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricName::Clarity => write!(f, "clarity_score"),
            MetricName::Relevance => write!(f, "relevance_score"),
            MetricName::Accuracy => write!(f, "accuracy_score"),
            MetricName::Completeness => write!(f, "completeness_score"),
            MetricName::Sentiment => write!(f, "sentiment"),
            MetricName::Empathy => write!(f, "empathy_score"),
            MetricName::ResponseTime => write!(f, "response_time_avg"),
            MetricName::Resolution => write!(f, "resolution"),
            MetricName::EscalationNeed => write!(f, "escalation_need"),
            MetricName::FallbackFrequency => write!(f, "fallback_frequency"),
            MetricName::OverallScore => write!(f, "overall_score"),
        }
    }
}

/// A single scored metric. Numeric scores are 0-100 except response time,
/// which is in seconds. The tagged shape lets the report assembler verify
/// every slot by kind alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Numeric(f64),
    Category(&'static str),
    Frequency { count: usize, ratio: f64 },
    /// No measurable signal (e.g. response time in a conversation with no
    /// user->agent pair). Distinct from zero.
    Unmeasured,
}

impl MetricValue {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            MetricValue::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<&'static str> {
        match self {
            MetricValue::Category(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_frequency(&self) -> Option<(usize, f64)> {
        match self {
            MetricValue::Frequency { count, ratio } => Some((*count, *ratio)),
            _ => None,
        }
    }

    pub fn is_unmeasured(&self) -> bool {
        matches!(self, MetricValue::Unmeasured)
    }

    /// Shape name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            MetricValue::Numeric(_) => "numeric",
            MetricValue::Category(_) => "category",
            MetricValue::Frequency { .. } => "frequency",
            MetricValue::Unmeasured => "unmeasured",
        }
    }
}

/// The complete quality report for one conversation at one point in time.
///
/// Field names are the persistence contract: collaborators serialize this
/// record as-is, so the metric fields keep their established names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub conversation_id: String,
    pub title: String,
    pub clarity_score: f64,
    pub relevance_score: f64,
    pub accuracy_score: f64,
    pub completeness_score: f64,
    pub sentiment: Sentiment,
    pub empathy_score: f64,
    /// Mean user->agent response delta in seconds; None when the
    /// conversation contains no valid pair
    pub response_time_avg: Option<f64>,
    pub resolution: Resolution,
    pub escalation_need: EscalationNeed,
    pub fallback_frequency: usize,
    pub fallback_ratio: f64,
    pub overall_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Public API: analyze a single transcript file. Used by the CLI and other
/// programmatic consumers.
///
/// * `path` - path to a JSON transcript (object or bare-array form)
/// * `config` - optional loaded configuration (weights, lexicons, threshold)
pub fn analyze_file(
    path: &std::path::Path,
    config: Option<&config::Config>,
) -> anyhow::Result<AnalysisReport> {
    let conversation = transcript::from_file(path)?;
    let engine = match config {
        Some(cfg) => analyzer::AnalysisEngine::from_config(cfg)?,
        None => analyzer::AnalysisEngine::new(),
    };
    Ok(engine.analyze(&conversation)?)
}

/// Public API: analyze a transcript held in memory (e.g. stdin content).
pub fn analyze_transcript(
    json: &str,
    config: Option<&config::Config>,
) -> Result<AnalysisReport, AnalysisError> {
    let conversation = transcript::from_json(json, None)?;
    let engine = match config {
        Some(cfg) => analyzer::AnalysisEngine::from_config(cfg)?,
        None => analyzer::AnalysisEngine::new(),
    };
    engine.analyze(&conversation)
}
