use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Payload size must be > 0.")]
    PayloadSizeZero,
    #[error("Request count must be > 0.")]
    RequestCountZero,
    #[error("Worker count must be > 0.")]
    WorkerCountZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Server address must not be empty.")]
    ServerAddressEmpty,
    #[error("Invalid server address '{address}': {source}")]
    InvalidServerAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Server address '{address}' has no host.")]
    ServerAddressMissingHost { address: String },
    #[error("Missing server URL (set --url).")]
    MissingUrl,
    #[error("A run is already in progress.")]
    RunInProgress,
    #[error("No run has been started.")]
    NoActiveRun,
    #[error("Invalid bind address '{address}': {source}")]
    InvalidBindAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
