//! Core library for the `netload` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, the measurement store, request execution, the worker pool
//! and run controller, and the paired payload server. The primary user-facing
//! interface is the `netload` command-line application; library APIs may
//! evolve as the CLI grows.
pub mod args;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod runner;
pub mod server;
