use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use sched_metrics::analysis::extract_timeline;
use sched_metrics::config::{BatchConfig, SchedulerSpec};
use sched_metrics::models::AggregateMetrics;
use sched_metrics::parsing::{load_process_registry_file, parse_trace};
use sched_metrics::runner::{discover_cases, Batch, CommandTraceSource};
use sched_metrics::validation::validate_run;

/// sched-metrics: replay CPU-scheduler execution traces and compare
/// throughput, wait, turnaround and response times across schedulers.
#[derive(Debug, Parser)]
#[command(version)]
struct Opts {
    /// JSON batch configuration. Missing fields take their defaults.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Directory of test-case files.
    #[clap(long)]
    test_dir: Option<PathBuf>,

    /// Directory for per-run metrics and trace copies.
    #[clap(long)]
    output_dir: Option<PathBuf>,

    /// Directory for Gantt and comparison chart data.
    #[clap(long)]
    chart_dir: Option<PathBuf>,

    /// File each scheduler writes its execution trace to.
    #[clap(long)]
    trace_path: Option<PathBuf>,

    /// Scheduler to evaluate as NAME=PATH. Repeat to evaluate several;
    /// replaces the configured list.
    #[clap(short, long = "scheduler", value_parser = SchedulerSpec::parse)]
    schedulers: Vec<SchedulerSpec>,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every scheduler on every test case, then compare.
    Run,
    /// Compute metrics for one trace and one test case; print JSON.
    Metrics {
        /// Execution trace file.
        trace: PathBuf,
        /// Test-case file with the process definitions.
        case: PathBuf,
        /// Also print the RUNNING timeline.
        #[clap(long)]
        timeline: bool,
    },
    /// Rebuild comparison chart data from already persisted metrics.
    Compare,
}

impl Opts {
    fn batch_config(&self) -> Result<BatchConfig> {
        let mut config = match &self.config {
            Some(path) => BatchConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => BatchConfig::default(),
        };
        if let Some(dir) = &self.test_dir {
            config.test_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.chart_dir {
            config.chart_dir = dir.clone();
        }
        if let Some(path) = &self.trace_path {
            config.trace_path = path.clone();
        }
        if !self.schedulers.is_empty() {
            config.schedulers = self.schedulers.clone();
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let llv = match verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn run_batch(config: &BatchConfig) -> Result<bool> {
    let source = CommandTraceSource::new(&config.trace_path);
    let report = Batch::new(config, source).run().context("batch setup failed")?;

    info!(
        "{} runs succeeded, {} failed",
        report.outcomes.len(),
        report.failures.len()
    );
    for f in &report.failures {
        warn!("FAILED {} on {}: {}", f.scheduler, f.case, f.error);
    }
    info!("chart data written to {}", config.chart_dir.display());
    Ok(report.is_success())
}

fn run_metrics(trace: &Path, case: &Path, timeline: bool) -> Result<()> {
    let text = match fs::read_to_string(trace) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e).with_context(|| format!("reading {}", trace.display())),
    };
    let transitions =
        parse_trace(text.as_deref()).with_context(|| format!("no trace at {}", trace.display()))?;
    let registry = load_process_registry_file(case)?;

    for w in validate_run(&transitions, &registry) {
        warn!("{}", w.message);
    }

    let metrics = AggregateMetrics::calculate(&transitions, &registry);
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    if timeline {
        let intervals = extract_timeline(&transitions);
        println!("{}", serde_json::to_string_pretty(&intervals)?);
    }
    Ok(())
}

fn run_compare(config: &BatchConfig) -> Result<()> {
    let cases = discover_cases(&config.test_dir)?;
    let batch = Batch::new(config, CommandTraceSource::new(&config.trace_path));
    batch.store().ensure_dirs()?;
    let table = batch.compare(cases.as_slice())?;
    if table.is_empty() {
        bail!(
            "no persisted metrics found in {}",
            config.output_dir.display()
        );
    }
    info!("chart data written to {}", config.chart_dir.display());
    Ok(())
}

fn main() -> Result<ExitCode> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;

    match &opts.command {
        Command::Run => {
            let config = opts.batch_config()?;
            if run_batch(&config)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Metrics {
            trace,
            case,
            timeline,
        } => {
            run_metrics(trace, case, *timeline)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare => {
            run_compare(&opts.batch_config()?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
