mod executor;

#[cfg(test)]
mod tests;

use std::time::Duration;

use reqwest::Client;

use crate::error::HttpError;

pub(crate) use executor::{AttemptOutcome, execute_once, payload_url};

/// Fixed per-request network timeout. There is no run-level timeout; a run
/// ends when every worker finishes its share or stops on cancellation.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shared HTTP client used by every worker.
///
/// # Errors
///
/// Returns an error if the underlying client cannot be constructed.
pub fn build_client() -> Result<Client, HttpError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|err| HttpError::BuildClient { source: err })
}
