use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// The record of one request attempt. Produced exactly once per attempt by
/// the executor; ownership moves into the store on `record`.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    pub outcome: Outcome,
    pub latency_ms: f64,
    pub throughput_kbs: f64,
    pub bytes_received: u64,
    pub timestamp: DateTime<Utc>,
}

impl Measurement {
    #[must_use]
    pub fn success(latency_ms: f64, throughput_kbs: f64, bytes_received: u64) -> Self {
        Self {
            outcome: Outcome::Success,
            latency_ms,
            throughput_kbs,
            bytes_received,
            timestamp: Utc::now(),
        }
    }

    /// A failed attempt contributes to the failure counter only, never to
    /// the latency or throughput series.
    #[must_use]
    pub fn failure() -> Self {
        Self {
            outcome: Outcome::Failure,
            latency_ms: 0.0,
            throughput_kbs: 0.0,
            bytes_received: 0,
            timestamp: Utc::now(),
        }
    }
}

/// A consistent, point-in-time copy of the aggregate state.
///
/// The two series are ordered by arrival in the store. Arrival order across
/// workers is non-deterministic; only each worker's own requests land in
/// submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub success_count: u64,
    pub failure_count: u64,
    pub total_bytes: u64,
    pub latencies_ms: Vec<f64>,
    pub throughputs_kbs: Vec<f64>,
}

impl Snapshot {
    /// Requests attempted so far, successful or not.
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.success_count.saturating_add(self.failure_count)
    }
}
