use anyhow::Context;
use clap::Parser;
use common::config::Config;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::{
    classifier::ClassifierAdapter,
    combiner::ScoreCombiner,
    error::ScoringError,
    model::{CombinedVerdict, TransactionInput},
    scorers::Scorer,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "target/debug/config/total_config.yaml")]
    pub config: PathBuf,

    /// JSON file holding an array of transaction records
    #[arg(short, long)]
    pub input: PathBuf,

    /// Print Prometheus metrics to stderr once the batch is done
    #[arg(long)]
    pub metrics: bool,
}

/// Loads `.env`, parses arguments, reads the config and sets up tracing.
pub fn initialize_executable() -> anyhow::Result<(Args, Config)> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = Config::load_with_includes(&args.config)
        .with_context(|| format!("loading config from {:?}", args.config))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.evaluator.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        project = %config.common.project_name,
        config = ?args.config,
        workers = config.evaluator.workers,
        "executable initialized"
    );

    Ok((args, config))
}

/// Spreads a batch over `workers` blocking tasks and returns results in input order.
pub async fn run_batch_evaluation<S, C>(
    engine: Arc<ScoreCombiner<S, C>>,
    inputs: Vec<TransactionInput>,
    workers: usize,
) -> anyhow::Result<Vec<Result<CombinedVerdict, ScoringError>>>
where
    S: Scorer + 'static,
    C: ClassifierAdapter + 'static,
{
    if inputs.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = inputs.len().div_ceil(workers.max(1));
    let mut handles = Vec::new();
    for chunk in inputs.chunks(chunk_size) {
        let engine = engine.clone();
        let chunk = chunk.to_vec();
        handles.push(tokio::task::spawn_blocking(move || {
            engine.evaluate_batch(&chunk)
        }));
    }

    tracing::debug!(tasks = handles.len(), chunk_size, "batch dispatched");

    let mut results = Vec::with_capacity(inputs.len());
    for handle in handles {
        results.extend(handle.await.context("evaluation task panicked")?);
    }
    Ok(results)
}
