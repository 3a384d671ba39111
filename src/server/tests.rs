use axum::body::to_bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use super::{MAX_PAYLOAD_SIZE, ServerConfig, default_payload, landing, payload};

async fn body_len(response: Response) -> Result<usize, String> {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|err| format!("read body failed: {}", err))?;
    Ok(bytes.len())
}

fn has_no_store_headers(response: &Response) -> bool {
    let cache = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|value| value.to_str().ok());
    let expires = response
        .headers()
        .get(header::EXPIRES)
        .and_then(|value| value.to_str().ok());
    cache == Some("no-store, must-revalidate") && expires == Some("0")
}

#[tokio::test]
async fn payload_returns_exactly_n_bytes() -> Result<(), String> {
    let response = payload(Path("1000".to_owned())).await;
    if response.status() != StatusCode::OK {
        return Err(format!("status: {}", response.status()));
    }
    if !has_no_store_headers(&response) {
        return Err("missing no-store headers".to_owned());
    }
    let len = body_len(response).await?;
    if len == 1000 {
        Ok(())
    } else {
        Err(format!("body length: {}", len))
    }
}

#[tokio::test]
async fn payload_rejects_non_numeric_size() -> Result<(), String> {
    let response = payload(Path("abc".to_owned())).await;
    if response.status() == StatusCode::BAD_REQUEST && has_no_store_headers(&response) {
        Ok(())
    } else {
        Err(format!("status: {}", response.status()))
    }
}

#[tokio::test]
async fn payload_rejects_zero_size() -> Result<(), String> {
    let response = payload(Path("0".to_owned())).await;
    if response.status() == StatusCode::BAD_REQUEST {
        Ok(())
    } else {
        Err(format!("status: {}", response.status()))
    }
}

#[tokio::test]
async fn bare_size_path_serves_the_configured_default() -> Result<(), String> {
    let response = default_payload(State(ServerConfig { default_size: 1000 })).await;
    if response.status() != StatusCode::OK {
        return Err(format!("status: {}", response.status()));
    }
    if !has_no_store_headers(&response) {
        return Err("missing no-store headers".to_owned());
    }
    let len = body_len(response).await?;
    if len == 1000 {
        Ok(())
    } else {
        Err(format!("body length: {}", len))
    }
}

#[tokio::test]
async fn payload_rejects_sizes_beyond_the_cap() -> Result<(), String> {
    let oversized = MAX_PAYLOAD_SIZE.saturating_add(1).to_string();
    for segment in [oversized.as_str(), "18446744073709551615"] {
        let response = payload(Path(segment.to_owned())).await;
        if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
            return Err(format!("status for {}: {}", segment, response.status()));
        }
    }
    Ok(())
}

#[tokio::test]
async fn landing_is_plain_text_with_no_store() -> Result<(), String> {
    let response = landing(State(ServerConfig { default_size: 1000 })).await;
    if response.status() != StatusCode::OK {
        return Err(format!("status: {}", response.status()));
    }
    if has_no_store_headers(&response) {
        Ok(())
    } else {
        Err("missing no-store headers".to_owned())
    }
}
