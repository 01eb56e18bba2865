use anyhow::Context;
use std::sync::Arc;

use fraud_finder::{
    EvaluationOutcome, PreparedTransaction, engine_from_config, install_prometheus_recorder,
    read_records,
};
use scoring::executable_utils::{initialize_executable, run_batch_evaluation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (args, config) = initialize_executable()?;

    let prometheus = if args.metrics {
        Some(install_prometheus_recorder()?)
    } else {
        None
    };

    let engine = Arc::new(engine_from_config(&config).context("building scoring engine")?);

    let prepared: Vec<PreparedTransaction> = read_records(&args.input)?
        .into_iter()
        .map(|record| record.prepare())
        .collect();
    tracing::info!(count = prepared.len(), input = ?args.input, "transactions loaded");

    let inputs = prepared.iter().map(|p| p.input.clone()).collect();
    let results = run_batch_evaluation(engine, inputs, config.evaluator.workers).await?;

    let outcomes: Vec<EvaluationOutcome> = prepared
        .iter()
        .zip(results.iter())
        .map(|(p, result)| EvaluationOutcome::new(&p.attributes, result))
        .collect();

    let flagged = results
        .iter()
        .filter(|r| matches!(r, Ok(v) if v.is_fraud()))
        .count();
    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::info!(total = results.len(), flagged, failed, "batch evaluated");

    println!("{}", serde_json::to_string_pretty(&outcomes)?);

    if let Some(handle) = prometheus {
        eprintln!("{}", handle.render());
    }

    Ok(())
}
