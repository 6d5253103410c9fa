//! Tool management and execution framework for agent-rs
//!
//! This crate provides a framework for defining, describing and executing
//! tools (functions) that an orchestration layer can invoke.

pub mod definition;
pub mod registry;
pub mod tool;

pub use definition::{ToolDefinition, schema};
pub use registry::ToolRegistry;
pub use tool::Tool;
