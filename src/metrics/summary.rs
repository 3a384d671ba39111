use std::time::Duration;

use serde::Serialize;

use super::types::Snapshot;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Final statistics for one run, derived from the last snapshot.
///
/// Every series statistic defaults to 0 when its series is empty, so an
/// all-failure run produces a well-defined summary instead of NaN.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub elapsed_secs: f64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub total_bytes: u64,
    pub total_mb: f64,
    pub avg_mb_per_sec: f64,
    pub avg_latency_ms: f64,
    pub min_latency_ms: f64,
    pub max_latency_ms: f64,
    pub avg_throughput_kbs: f64,
    pub min_throughput_kbs: f64,
    pub max_throughput_kbs: f64,
}

impl RunSummary {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, elapsed: Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let total_mb = snapshot.total_bytes as f64 / BYTES_PER_MB;
        let avg_mb_per_sec = if elapsed_secs > 0.0 {
            total_mb / elapsed_secs
        } else {
            0.0
        };

        Self {
            elapsed_secs,
            successful_requests: snapshot.success_count,
            failed_requests: snapshot.failure_count,
            total_bytes: snapshot.total_bytes,
            total_mb,
            avg_mb_per_sec,
            avg_latency_ms: mean(&snapshot.latencies_ms),
            min_latency_ms: series_min(&snapshot.latencies_ms),
            max_latency_ms: series_max(&snapshot.latencies_ms),
            avg_throughput_kbs: mean(&snapshot.throughputs_kbs),
            min_throughput_kbs: series_min(&snapshot.throughputs_kbs),
            max_throughput_kbs: series_max(&snapshot.throughputs_kbs),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn series_min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn series_max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
