use std::time::Duration;

use super::executor::{compute_throughput_kbs, payload_url};
use crate::runner::RunParameters;

const EPS: f64 = 1e-9;

#[test]
fn one_kib_in_one_second_is_one_kb_per_sec() -> Result<(), String> {
    let throughput = compute_throughput_kbs(1024, Duration::from_secs(1));
    if (throughput - 1.0).abs() < EPS {
        Ok(())
    } else {
        Err(format!("throughput: {}", throughput))
    }
}

#[test]
fn zero_elapsed_throughput_is_zero() -> Result<(), String> {
    let throughput = compute_throughput_kbs(1024, Duration::ZERO);
    if (throughput - 0.0).abs() < EPS && throughput.is_finite() {
        Ok(())
    } else {
        Err(format!("throughput: {}", throughput))
    }
}

#[test]
fn payload_url_has_no_double_slash() -> Result<(), String> {
    let params = RunParameters::new("http://localhost:8686", 1000, 10, 1)
        .map_err(|err| err.to_string())?;
    // Url normalization appends a trailing slash to the path.
    let url = payload_url(&params);
    if url == "http://localhost:8686/size/1000" {
        Ok(())
    } else {
        Err(format!("url: {}", url))
    }
}

#[test]
fn payload_url_assumes_http_scheme() -> Result<(), String> {
    let params =
        RunParameters::new("localhost:8686", 500, 10, 1).map_err(|err| err.to_string())?;
    let url = payload_url(&params);
    if url == "http://localhost:8686/size/500" {
        Ok(())
    } else {
        Err(format!("url: {}", url))
    }
}
