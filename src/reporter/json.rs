//! JSON reporter for machine-readable output
//!
//! The serialized report keeps the established metric field names
//! (`clarity_score`, `response_time_avg`, ...) so downstream consumers can
//! store it as-is.

use crate::analyzer::engine::AggregateStats;
use crate::AnalysisReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single analysis as JSON
    pub fn report(&self, report: &AnalysisReport) -> String {
        if self.pretty {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Report multiple analyses as JSON array
    pub fn report_many(&self, reports: &[AnalysisReport]) -> String {
        if self.pretty {
            serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(reports).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Report with summary
    pub fn report_with_summary(
        &self,
        reports: &[AnalysisReport],
        stats: &AggregateStats,
    ) -> String {
        let output = JsonOutput {
            results: reports,
            summary: JsonSummary {
                conversations_analyzed: stats.conversations_analyzed,
                average_overall_score: stats.average_overall,
                unresolved: stats.unresolved,
                escalations_flagged: stats.escalations,
            },
        };

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [AnalysisReport],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    conversations_analyzed: usize,
    average_overall_score: f64,
    unresolved: usize,
    escalations_flagged: usize,
}
