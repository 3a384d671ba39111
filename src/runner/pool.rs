use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Client;
use tracing::{debug, warn};

use crate::http::{AttemptOutcome, execute_once, payload_url};
use crate::metrics::MeasurementStore;

use super::params::RunParameters;

/// Splits the total request budget across the workers as evenly as possible:
/// the first `total % workers` shares take one extra request, the rest take
/// the floor. The shares always sum to the exact total, and the allocation is
/// deterministic.
#[must_use]
pub fn partition(total_requests: u64, worker_count: u64) -> Vec<u64> {
    let Some(base) = total_requests.checked_div(worker_count) else {
        return Vec::new();
    };
    let remainder = total_requests % worker_count;
    (0..worker_count)
        .map(|index| if index < remainder { base + 1 } else { base })
        .collect()
}

/// Runs the full worker pool and blocks until every worker has exited.
///
/// Each worker owns a contiguous share and issues its requests strictly
/// sequentially, so per-worker latency is never contaminated by concurrent
/// I/O inside the same worker. The cancellation flag is consulted once per
/// loop iteration only; an in-flight request is never interrupted.
pub(crate) async fn run_pool(
    client: Client,
    params: RunParameters,
    store: Arc<MeasurementStore>,
    cancel: Arc<AtomicBool>,
) {
    let url = payload_url(&params);
    let shares = partition(params.total_requests(), params.worker_count());

    let mut handles = Vec::with_capacity(shares.len());
    for (worker_id, share) in shares.into_iter().enumerate() {
        let client = client.clone();
        let store = Arc::clone(&store);
        let cancel = Arc::clone(&cancel);
        let url = url.clone();

        handles.push(tokio::spawn(async move {
            for _ in 0..share {
                if cancel.load(Ordering::SeqCst) {
                    debug!(worker_id, "Worker stopping before next request");
                    break;
                }
                match execute_once(&client, &url, &store).await {
                    AttemptOutcome::Success {
                        latency_ms,
                        throughput_kbs,
                    } => {
                        debug!(
                            worker_id,
                            "Request successful - Latency: {:.2} ms, Throughput: {:.2} KB/s",
                            latency_ms,
                            throughput_kbs
                        );
                    }
                    AttemptOutcome::BadStatus { status } => {
                        warn!(worker_id, "Request failed with status code {}", status);
                    }
                    AttemptOutcome::Transport { detail } => {
                        warn!(worker_id, "Request failed: {}", detail);
                    }
                }
            }
        }));
    }

    for handle in handles {
        if handle.await.is_err() {
            warn!("A worker task terminated abnormally");
        }
    }
}
