//! Core types shared across the workspace
//!
//! This crate defines the error type and the uniform [`ToolOutput`] result
//! shape used by every tool.

pub mod error;
pub mod output;

pub use error::{Error, Result};
pub use output::ToolOutput;
