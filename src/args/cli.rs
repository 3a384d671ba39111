use clap::{Args, Parser, Subcommand};

use super::parsers::parse_positive_u64;
use super::types::PositiveU64;

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the payload server side of the benchmark pair
    Serve(ServeArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Address to bind the listener to
    #[arg(long = "bind", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(long = "port", short = 'P', default_value_t = 8686)]
    pub port: u16,

    /// Payload size served when `GET /size` carries no size segment (bytes)
    #[arg(
        long = "default-size",
        default_value = "1000",
        value_parser = parse_positive_u64
    )]
    pub default_size: PositiveU64,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP throughput/latency benchmark pair - a worker-pool load client with aggregated per-request stats and a matching payload server."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the payload server (http:// is assumed when the scheme is omitted)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Payload size to request per response (bytes)
    #[arg(
        long = "payload-size",
        short = 'p',
        default_value = "1000",
        value_parser = parse_positive_u64
    )]
    pub payload_size: PositiveU64,

    /// Total number of requests to issue
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "10",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Number of concurrent workers sharing the request budget
    #[arg(
        long = "workers",
        short = 'w',
        default_value = "1",
        value_parser = parse_positive_u64
    )]
    pub workers: PositiveU64,

    /// Print the final summary as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
