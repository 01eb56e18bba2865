pub mod engine;
pub mod record;
pub mod report;

pub use engine::{FraudEngine, engine_from_config};
pub use record::{PreparedTransaction, TransactionRecord, read_records};
pub use report::{AnalysisReport, EvaluationOutcome};

/// Installs the Prometheus recorder the engine's metrics are reported to.
pub fn install_prometheus_recorder()
-> anyhow::Result<metrics_exporter_prometheus::PrometheusHandle> {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {e}"))?;
    Ok(handle)
}
