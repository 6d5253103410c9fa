//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by tools and their callers
#[derive(Error, Debug)]
pub enum Error {
    /// Tool input did not match the declared schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Tool ran but could not produce its result
    #[error("{0}")]
    ToolFailed(String),

    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameters("missing field `ticker`".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: missing field `ticker`");

        let err = Error::ToolFailed("FMP API error: 500".to_string());
        assert_eq!(err.to_string(), "FMP API error: 500");

        let err = Error::UnknownTool("fetch_news".to_string());
        assert_eq!(err.to_string(), "Unknown tool: fetch_news");
    }
}
