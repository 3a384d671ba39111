use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::time::Instant;

use crate::metrics::{Measurement, MeasurementStore};
use crate::runner::RunParameters;

/// What one attempt looked like from the caller's side. The measurement
/// itself is already in the store by the time this is returned; failures are
/// data, never errors, so the run continues regardless.
#[derive(Debug)]
pub(crate) enum AttemptOutcome {
    Success { latency_ms: f64, throughput_kbs: f64 },
    BadStatus { status: u16 },
    Transport { detail: String },
}

/// Target URL for a run, built once per worker outside the timed section.
#[must_use]
pub(crate) fn payload_url(params: &RunParameters) -> String {
    format!(
        "{}/size/{}",
        params.server_address().as_str().trim_end_matches('/'),
        params.payload_size()
    )
}

/// Issues one GET and records exactly one measurement.
///
/// The monotonic clock runs from just before the request is sent until the
/// body is fully drained; the client-side elapsed time is the benchmark's
/// documented latency definition.
pub(crate) async fn execute_once(
    client: &Client,
    url: &str,
    store: &MeasurementStore,
) -> AttemptOutcome {
    let start = Instant::now();
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            store.record(Measurement::failure());
            return AttemptOutcome::Transport {
                detail: err.to_string(),
            };
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        store.record(Measurement::failure());
        return AttemptOutcome::BadStatus {
            status: status.as_u16(),
        };
    }

    match drain_response_body(response).await {
        Ok(bytes) => {
            let elapsed = start.elapsed();
            let latency_ms = elapsed.as_secs_f64() * 1000.0;
            let throughput_kbs = compute_throughput_kbs(bytes, elapsed);
            store.record(Measurement::success(latency_ms, throughput_kbs, bytes));
            AttemptOutcome::Success {
                latency_ms,
                throughput_kbs,
            }
        }
        Err(err) => {
            store.record(Measurement::failure());
            AttemptOutcome::Transport {
                detail: err.to_string(),
            }
        }
    }
}

pub(crate) fn compute_throughput_kbs(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        bytes as f64 / secs / 1024.0
    } else {
        0.0
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
