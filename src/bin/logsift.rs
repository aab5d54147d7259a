use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "logsift",
    version,
    about = "Batch log triage: bucketed error dedup and success-sample classification"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deduplicate ERROR events into 60-second buckets and write a report
    Errors {
        /// Directory of extracted plain-text log files
        log_dir: PathBuf,
        /// Report destination
        #[arg(short = 'o', long = "output", default_value = "error_report.txt")]
        output: PathBuf,
    },
    /// Collect EVENT/INFO lines as reference success samples
    Collect {
        /// Directory of extracted plain-text log files
        log_dir: PathBuf,
        /// Sample set destination (JSON array of strings)
        #[arg(short = 'o', long = "output", default_value = "success_samples.json")]
        output: PathBuf,
    },
    /// Classify log lines against stored success samples
    Classify {
        /// Directory of extracted plain-text log files
        log_dir: PathBuf,
        /// Previously collected success samples
        #[arg(long = "samples", default_value = "success_samples.json")]
        samples: PathBuf,
        /// Minimum cosine similarity for a MATCH
        #[arg(long = "threshold", default_value_t = logsift::classify::DEFAULT_THRESHOLD)]
        threshold: f64,
        /// Report destination (lines mentioning "success", with verdicts)
        #[arg(short = 'o', long = "output", default_value = "success_report.txt")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Errors { log_dir, output } => run_errors(&log_dir, &output),
        Command::Collect { log_dir, output } => run_collect(&log_dir, &output),
        Command::Classify {
            log_dir,
            samples,
            threshold,
            output,
        } => run_classify(&log_dir, &samples, threshold, &output),
    }
}

fn read_dir(log_dir: &Path) -> anyhow::Result<Vec<logsift::ingest::LogFile>> {
    logsift::ingest::read_log_dir(log_dir)
        .with_context(|| format!("reading log directory {}", log_dir.display()))
}

fn run_errors(log_dir: &Path, output: &Path) -> anyhow::Result<()> {
    let files = read_dir(log_dir)?;
    let events = logsift::parser::collect_error_events(&files);
    let buckets = logsift::dedup::bucket_events(&events);
    fs::write(output, logsift::report::render_error_report(&buckets))
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        events = events.len(),
        buckets = buckets.len(),
        "error report written to {}",
        output.display()
    );
    Ok(())
}

fn run_collect(log_dir: &Path, output: &Path) -> anyhow::Result<()> {
    let files = read_dir(log_dir)?;
    let samples: Vec<String> = logsift::corpus::extract_success_samples(&files)
        .into_iter()
        .collect();
    logsift::ingest::save_reference_samples(output, &samples)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        samples = samples.len(),
        "success samples written to {}",
        output.display()
    );
    Ok(())
}

fn run_classify(
    log_dir: &Path,
    samples: &Path,
    threshold: f64,
    output: &Path,
) -> anyhow::Result<()> {
    // Missing samples are fatal here: the classifier has nothing to compare
    // against without them.
    let reference = logsift::ingest::load_reference_samples(samples)
        .with_context(|| format!("loading reference samples from {}", samples.display()))?;
    let files = read_dir(log_dir)?;
    let candidates: Vec<String> = files
        .iter()
        .flat_map(|f| f.lines.iter())
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    let results = logsift::classify::classify(&reference, &candidates, threshold);
    fs::write(output, logsift::report::render_success_report(&results))
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        candidates = results.len(),
        reported = logsift::report::success_results(&results).len(),
        "success report written to {}",
        output.display()
    );
    Ok(())
}
