use url::Url;

use crate::error::ValidationError;

/// Validated, immutable parameters for one run.
///
/// Captured once at start and passed by value into the pool; nothing re-reads
/// live configuration mid-run.
#[derive(Debug, Clone)]
pub struct RunParameters {
    server_address: Url,
    payload_size: u64,
    total_requests: u64,
    worker_count: u64,
}

impl RunParameters {
    /// Validates and normalizes the raw collaborator-supplied values.
    ///
    /// The address gains an explicit `http://` scheme when none is given,
    /// matching how the client pairs with the payload server by default.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any numeric field is zero or the
    /// address is empty, malformed, or has no host.
    pub fn new(
        server_address: &str,
        payload_size: u64,
        total_requests: u64,
        worker_count: u64,
    ) -> Result<Self, ValidationError> {
        if payload_size == 0 {
            return Err(ValidationError::PayloadSizeZero);
        }
        if total_requests == 0 {
            return Err(ValidationError::RequestCountZero);
        }
        if worker_count == 0 {
            return Err(ValidationError::WorkerCountZero);
        }

        let trimmed = server_address.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::ServerAddressEmpty);
        }
        let normalized = normalize_server_address(trimmed);
        let server_address =
            Url::parse(&normalized).map_err(|err| ValidationError::InvalidServerAddress {
                address: trimmed.to_owned(),
                source: err,
            })?;
        if server_address.host_str().is_none() {
            return Err(ValidationError::ServerAddressMissingHost {
                address: trimmed.to_owned(),
            });
        }

        Ok(Self {
            server_address,
            payload_size,
            total_requests,
            worker_count,
        })
    }

    #[must_use]
    pub const fn server_address(&self) -> &Url {
        &self.server_address
    }

    #[must_use]
    pub const fn payload_size(&self) -> u64 {
        self.payload_size
    }

    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }

    #[must_use]
    pub const fn worker_count(&self) -> u64 {
        self.worker_count
    }
}

fn normalize_server_address(address: &str) -> String {
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_owned()
    } else {
        format!("http://{}", address)
    }
}
