use std::sync::{Mutex, PoisonError};

use super::types::{Measurement, Outcome, Snapshot};

/// The single shared mutable resource of a run.
///
/// Every worker writes through `record`; readers only ever see the aggregate
/// through `snapshot`. All operations take the one mutex, so concurrent
/// records never lose updates and a snapshot never observes a torn state.
#[derive(Debug, Default)]
pub struct MeasurementStore {
    inner: Mutex<Snapshot>,
}

impl MeasurementStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all counters and series. Only called between runs.
    pub fn reset(&self) {
        *self.lock() = Snapshot::default();
    }

    pub fn record(&self, measurement: Measurement) {
        let mut aggregate = self.lock();
        match measurement.outcome {
            Outcome::Success => {
                aggregate.success_count = aggregate.success_count.saturating_add(1);
                aggregate.total_bytes = aggregate
                    .total_bytes
                    .saturating_add(measurement.bytes_received);
                aggregate.latencies_ms.push(measurement.latency_ms);
                aggregate.throughputs_kbs.push(measurement.throughput_kbs);
            }
            Outcome::Failure => {
                aggregate.failure_count = aggregate.failure_count.saturating_add(1);
            }
        }
    }

    /// Point-in-time copy for progress reporting; the critical section is a
    /// single clone.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    /// Monotonically increasing count of attempted requests.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.lock().completed()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Snapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
