//! The payload half of the benchmark pair: a minimal HTTP responder that
//! returns exactly `n` bytes of filler on `GET /size/{n}`, or the configured
//! default size on a bare `GET /size`.
//!
//! Every response carries `Cache-Control: no-store, must-revalidate` and
//! `Expires: 0` so no caching layer can shortcut the measurement.

#[cfg(test)]
mod tests;

use std::net::SocketAddr;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::args::ServeArgs;
use crate::error::{AppResult, ValidationError};

const FILLER_BYTE: u8 = b'X';

/// Largest payload a single request may ask for (64 MiB). Anything above
/// this would let one request exhaust the server's memory.
const MAX_PAYLOAD_SIZE: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
struct ServerConfig {
    default_size: u64,
}

#[must_use]
pub fn router(default_size: u64) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/size", get(default_payload))
        .route("/size/{size}", get(payload))
        .with_state(ServerConfig { default_size })
}

/// Binds the listener and serves until ctrl-c.
///
/// # Errors
///
/// Returns an error if the bind address is invalid, the listener cannot be
/// created, or the server fails while running.
pub async fn serve(args: &ServeArgs) -> AppResult<()> {
    let address = format!("{}:{}", args.bind, args.port);
    let bind_addr: SocketAddr =
        address
            .parse()
            .map_err(|err| ValidationError::InvalidBindAddress {
                address: address.clone(),
                source: err,
            })?;

    let listener = TcpListener::bind(bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(
        "Payload server listening on http://{} (default payload {} bytes)",
        local_addr,
        args.default_size.get()
    );

    axum::serve(listener, router(args.default_size.get()))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down payload server");
        })
        .await?;
    Ok(())
}

async fn landing(State(config): State<ServerConfig>) -> Response {
    let body = format!(
        "netload payload server\n\n\
         GET /size/{{n}} returns n bytes of filler.\n\
         GET /size returns the default of {} bytes.\n",
        config.default_size
    );
    let response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        body,
    )
        .into_response();
    with_no_store(response)
}

async fn default_payload(State(config): State<ServerConfig>) -> Response {
    with_no_store(filler_response(config.default_size))
}

async fn payload(Path(size): Path<String>) -> Response {
    let response = match size.parse::<u64>() {
        Ok(size) if size > MAX_PAYLOAD_SIZE => {
            debug!(size, "Rejecting oversized payload request");
            (StatusCode::PAYLOAD_TOO_LARGE, "Packet size too large").into_response()
        }
        Ok(size) if size > 0 => filler_response(size),
        _ => {
            debug!(segment = %size, "Rejecting malformed payload size");
            (StatusCode::BAD_REQUEST, "Invalid packet size").into_response()
        }
    };
    with_no_store(response)
}

fn filler_response(size: u64) -> Response {
    debug!(size, "Serving payload request");
    let body = vec![FILLER_BYTE; usize::try_from(size).unwrap_or(usize::MAX)];
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        body,
    )
        .into_response()
}

/// Disables client and proxy caching on every response.
fn with_no_store(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, must-revalidate"),
    );
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}
