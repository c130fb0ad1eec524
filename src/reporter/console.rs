//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::{AnalysisReport, EscalationNeed, Resolution, Sentiment};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single conversation analysis
    pub fn report(&self, report: &AnalysisReport) {
        self.print_header(report);
        self.print_overall(report);
        self.print_scores(report);
        self.print_flags(report);
        println!();
    }

    /// Report multiple results with summary
    pub fn report_many(&self, reports: &[AnalysisReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (one line per conversation)
    pub fn report_quiet(&self, report: &AnalysisReport) {
        println!(
            "{}: {:.1} ({})",
            self.conversation_label(report),
            report.overall_score,
            self.colorize_resolution(report.resolution)
        );
    }

    fn conversation_label(&self, report: &AnalysisReport) -> String {
        if report.title.is_empty() {
            report.conversation_id.clone()
        } else {
            report.title.clone()
        }
    }

    fn print_header(&self, report: &AnalysisReport) {
        println!();
        println!(
            "{}",
            format!(
                "Conversation Quality Analysis: {}",
                self.conversation_label(report)
            )
            .bold()
        );
        if !report.title.is_empty() && !report.conversation_id.is_empty() {
            println!("   Conversation: {}", report.conversation_id);
        }
        println!();
    }

    fn print_overall(&self, report: &AnalysisReport) {
        let bar = self.create_score_bar(report.overall_score);
        println!("   Overall: {}", bar);
        println!();
    }

    fn print_scores(&self, report: &AnalysisReport) {
        println!("   {}", "Scores:".bold());

        let rows = [
            ("Clarity", report.clarity_score),
            ("Relevance", report.relevance_score),
            ("Accuracy", report.accuracy_score),
            ("Completeness", report.completeness_score),
            ("Empathy", report.empathy_score),
        ];
        for (name, score) in rows {
            let bar = self.create_mini_bar(score);
            let score_str = format!("{:>5.1}", score);
            let colored_score = if !self.use_colors {
                score_str.normal()
            } else if score >= 80.0 {
                score_str.green()
            } else if score >= 60.0 {
                score_str.yellow()
            } else {
                score_str.red()
            };
            println!("   {} {} {}", bar, colored_score, name);
        }

        match report.response_time_avg {
            Some(avg) => println!("   Avg response time: {:.1}s", avg),
            None => println!("   Avg response time: {}", "n/a".dimmed()),
        }
        println!();
    }

    fn print_flags(&self, report: &AnalysisReport) {
        println!(
            "   Sentiment: {} | Resolution: {} | Escalation: {}",
            self.colorize_sentiment(report.sentiment),
            self.colorize_resolution(report.resolution),
            self.colorize_escalation(report.escalation_need)
        );
        println!(
            "   Fallback responses: {}{}",
            report.fallback_frequency,
            if self.verbose {
                format!(" ({:.0}% of agent turns)", report.fallback_ratio * 100.0)
            } else {
                String::new()
            }
        );
        if self.verbose {
            println!("   Analyzed at: {}", report.created_at.to_rfc3339().dimmed());
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Conversations analyzed: {}",
            stats.conversations_analyzed.to_string().bold()
        );
        println!(
            "   Average overall score:  {}",
            format!("{:.1}", stats.average_overall).bold()
        );
        println!("   Unresolved:             {}", stats.unresolved);
        println!("   Escalations flagged:    {}", stats.escalations);
        println!();
    }

    fn colorize_sentiment(&self, sentiment: Sentiment) -> colored::ColoredString {
        let s = sentiment.label();
        if !self.use_colors {
            return s.normal();
        }
        match sentiment {
            Sentiment::Positive => s.green(),
            Sentiment::Neutral => s.normal(),
            Sentiment::Negative => s.red(),
        }
    }

    fn colorize_resolution(&self, resolution: Resolution) -> colored::ColoredString {
        let s = resolution.label();
        if !self.use_colors {
            return s.normal();
        }
        match resolution {
            Resolution::Resolved => s.green(),
            Resolution::Unresolved => s.red(),
        }
    }

    fn colorize_escalation(&self, need: EscalationNeed) -> colored::ColoredString {
        let s = need.label();
        if !self.use_colors {
            return s.normal();
        }
        match need {
            EscalationNeed::Needed => s.red().bold(),
            EscalationNeed::NotNeeded => s.green(),
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score / 100.0) * 20.0).round() as usize;
        let filled = filled.min(20);
        let empty = 20 - filled;

        let bar = format!(
            "[{}{}] {:>5.1}",
            "█".repeat(filled),
            "░".repeat(empty),
            score
        );

        if self.use_colors {
            if score >= 80.0 {
                bar.green().to_string()
            } else if score >= 60.0 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, score: f64) -> String {
        let filled = ((score / 100.0) * 10.0).round() as usize;
        let filled = filled.min(10);
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
