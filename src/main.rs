//! Tenor: Conversation Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tenor::analyzer::AnalysisEngine;
use tenor::config::{build_ignore_set, is_ignored, load_config, CONFIG_FILENAME};
use tenor::reporter::{ConsoleReporter, JsonReporter};
use walkdir::WalkDir;

/// Tenor: Conversation Quality Analyzer for user/agent transcripts
#[derive(Parser, Debug)]
#[command(name = "tenor")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript file or directory of *.json transcripts (omit when using a subcommand)
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Minimum overall score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Quiet mode (one line per conversation)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .tenorrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Analyze transcripts in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .tenorrc.json with sensible defaults
    Init {
        /// Minimum overall score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(Commands::Init { threshold, dir }) = args.command {
        return run_init(threshold, dir.as_deref());
    }

    let Some(path) = args.path.clone() else {
        let mut cmd = Args::command();
        cmd.error(
            clap::error::ErrorKind::MissingRequiredArgument,
            "the following required arguments were not provided:\n  <path>\n\n\
             Transcript file or directory of *.json transcripts (omit when using a subcommand)",
        )
        .exit();
    };

    // Resolve work directory for config search
    let work_dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path.as_path()
    };

    // Load config (CLI flags override config file)
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(args.threshold);

    let engine = AnalysisEngine::from_config(&config)?;

    // Build ignore set from config
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let transcripts = collect_transcripts(&path, ignore_set.as_ref())?;
    if transcripts.is_empty() {
        eprintln!("{}: No transcripts found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let use_parallel = args.parallel || transcripts.len() > 10;
    let outcomes = if use_parallel {
        engine.analyze_parallel(&transcripts)
    } else {
        engine.analyze_many(&transcripts)
    };

    // Report failures per transcript and continue with the rest
    let mut reports = Vec::with_capacity(outcomes.len());
    let mut had_errors = false;
    for (path, outcome) in transcripts.iter().zip(outcomes) {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                had_errors = true;
                if !args.quiet {
                    eprintln!("{}: {}: {:#}", "Error".red(), path.display(), e);
                }
            }
        }
    }

    if reports.is_empty() {
        eprintln!("{}: All transcripts failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&reports);

    if args.json {
        let mut reporter = JsonReporter::new();
        if args.pretty {
            reporter = reporter.pretty();
        }
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(&reports, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in &reports {
            reporter.report_quiet(report);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            reporter.report_many(&reports, &stats);
        }
    }

    // Check threshold (config or CLI)
    if let Some(threshold) = args.threshold.or(config.threshold) {
        let score = if reports.len() == 1 {
            reports[0].overall_score
        } else {
            stats.average_overall
        };

        if score < threshold {
            if !args.quiet && !args.json {
                eprintln!(
                    "\n{}: Score {:.1} is below threshold {}",
                    "Failed".red().bold(),
                    score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(70.0);

    let json = format!(
        r#"{{
  "threshold": {},
  "weights": {{
    "clarity": 0.15,
    "relevance": 0.15,
    "accuracy": 0.20,
    "completeness": 0.20,
    "empathy": 0.15,
    "resolution": 0.15
  }},
  "ignore": [
    "**/archive/**"
  ]
}}
"#,
        threshold_value
    );
    // Note: a "lexicons" section can override any phrase list, e.g.
    // "lexicons": { "escalation": ["talk to billing", ...] }

    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

fn collect_transcripts(
    path: &PathBuf,
    ignore_set: Option<&globset::GlobSet>,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.clone()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if is_transcript_file(file_path) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

/// A transcript is a *.json file; dotfiles (like .tenorrc.json) are skipped.
fn is_transcript_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !name.starts_with('.') && name.ends_with(".json") && path.is_file()
}
