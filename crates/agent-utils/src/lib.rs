//! Shared utilities for agent-rs
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and environment lookup helpers for configuration.

pub mod config;
pub mod logging;

pub use config::{env_var, lookup_parsed, lookup_var};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
