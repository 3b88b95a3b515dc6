//! Trains a feed-forward network to sort fixed-digit numbers, reports its
//! accuracy on a training and a held-out set, then answers sort queries
//! typed on stdin.
//!
//! Run with:
//!   cargo run --release -- --iterations 2000
//! Then type e.g. `321,145` and press enter.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use sort_nn::data::{format, generate};
use sort_nn::{EvaluationReport, Evaluator, Learner, NetworkLearner, Result, SortConfig};

#[derive(Parser, Debug)]
#[command(name = "sort-nn")]
#[command(about = "Teach a neural network to sort numbers, one digit per input")]
struct Args {
    /// JSON run configuration; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows in the training set.
    #[arg(long)]
    train_rows: Option<usize>,

    /// Rows in the held-out test set.
    #[arg(long)]
    test_rows: Option<usize>,

    /// Numbers to sort per row.
    #[arg(long)]
    count_per_row: Option<usize>,

    /// Digits per number.
    #[arg(long)]
    digits: Option<u32>,

    /// Maximum training epochs.
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for data generation and weight initialization.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the trained network to this JSON file.
    #[arg(long)]
    save_model: Option<PathBuf>,

    /// Load a previously saved network instead of training.
    #[arg(long)]
    load_model: Option<PathBuf>,

    /// Write the test-set report (per-row records) to this JSON file.
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Exit after evaluation instead of reading queries from stdin.
    #[arg(long)]
    no_interactive: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<SortConfig> {
        let mut config = match &self.config {
            Some(path) => SortConfig::load_json(path)?,
            None => SortConfig::default(),
        };
        if let Some(v) = self.train_rows { config.train_rows = v; }
        if let Some(v) = self.test_rows { config.test_rows = v; }
        if let Some(v) = self.count_per_row { config.count_per_row = v; }
        if let Some(v) = self.digits { config.digits = v; }
        if let Some(v) = self.iterations { config.train.iterations = v; }
        if let Some(v) = self.seed {
            config.seed = v;
            config.train.seed = v;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.resolve_config()?;
    info!(?config, "starting");

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let training_rows = generate(config.train_rows, config.count_per_row, config.digits, &mut rng)?;
    let test_rows = generate(config.test_rows, config.count_per_row, config.digits, &mut rng)?;
    let training = format(&training_rows);
    let test = format(&test_rows);

    let (mut learner, trained) = match &args.load_model {
        Some(path) => {
            info!(path = %path.display(), "loading network");
            (NetworkLearner::load_json(path)?, true)
        }
        None => {
            let learner = NetworkLearner::new(config.hidden_layers.clone())
                .with_activation(config.hidden_activation);
            (learner, false)
        }
    };

    let mut evaluator = Evaluator::new(&mut learner, config.train.clone());
    if trained {
        println!("Training set: {}", evaluator.evaluate(&training)?);
    } else {
        println!("Training set: {}", evaluator.train(&training)?);
    }
    let test_report = evaluator.evaluate(&test)?;
    println!("Test set: {test_report}");

    if let Some(path) = &args.report_json {
        write_report(&test_report, path)?;
    }
    if let Some(path) = &args.save_model {
        evaluator.learner().save_json(path)?;
        info!(path = %path.display(), "saved network");
    }

    if !args.no_interactive {
        let example = training_rows
            .first()
            .map(|row| row.input.iter().map(u64::to_string).collect::<Vec<_>>().join(","))
            .unwrap_or_else(|| "321,145".to_string());
        println!(
            "Enter {} {}-digit numbers (example {example}):",
            config.count_per_row, config.digits
        );
        query_loop(&mut evaluator, io::stdin().lock(), io::stdout().lock())?;
    }
    Ok(())
}

fn write_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(io::BufWriter::new(file), report)?;
    info!(path = %path.display(), "wrote report");
    Ok(())
}

/// Answers one query per input line until EOF. Bad lines are reported and skipped.
fn query_loop<L, R, W>(evaluator: &mut Evaluator<L>, input: R, mut out: W) -> Result<()>
where
    L: Learner,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match evaluator.query(&line) {
            Ok(record) => {
                writeln!(out, "Output: {}", record.actual_string())?;
                writeln!(out)?;
                debug!(?record, "query result");
            }
            Err(e) => writeln!(out, "error: {e}")?,
        }
        out.flush()?;
    }
    Ok(())
}
