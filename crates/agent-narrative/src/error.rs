//! Error types for financial narrative operations

use crate::store::CacheEntry;
use thiserror::Error;

/// Financial narrative specific errors
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// Upstream answered with a non-success HTTP status
    #[error("FMP API error: {status}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
    },

    /// Upstream answered with an error payload
    #[error("FMP API error: {0}")]
    UpstreamMessage(String),

    /// Upstream payload did not have the expected shape
    #[error("Unexpected response format from FMP ({0}).")]
    UnexpectedShape(String),

    /// Ticker symbol missing or blank
    #[error("Ticker symbol must not be empty")]
    InvalidTicker,

    /// One or more cache entries required by the assembler are absent
    #[error("Required data files not found: {}. Make sure to run {} first.",
        describe_entries(.0), describe_producers(.0))]
    MissingPrerequisites(Vec<CacheEntry>),

    /// A cache entry exists but cannot be deserialized
    #[error("Cached {entry} is malformed: {source}")]
    MalformedCache {
        entry: CacheEntry,
        #[source]
        source: serde_json::Error,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Cache store error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Report template error
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn describe_entries(entries: &[CacheEntry]) -> String {
    entries
        .iter()
        .map(|e| e.file_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_producers(entries: &[CacheEntry]) -> String {
    entries
        .iter()
        .map(|e| e.producer())
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Result type alias for narrative operations
pub type Result<T> = std::result::Result<T, NarrativeError>;

/// Convert NarrativeError to agent_core::Error
impl From<NarrativeError> for agent_core::Error {
    fn from(err: NarrativeError) -> Self {
        agent_core::Error::ToolFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NarrativeError::UpstreamStatus {
            status: reqwest::StatusCode::FORBIDDEN,
        };
        assert_eq!(err.to_string(), "FMP API error: 403 Forbidden");

        let err = NarrativeError::UnexpectedShape("not a list".to_string());
        assert_eq!(err.to_string(), "Unexpected response format from FMP (not a list).");
    }

    #[test]
    fn test_missing_prerequisites_display() {
        let err = NarrativeError::MissingPrerequisites(vec![CacheEntry::EnterpriseValue]);
        assert_eq!(
            err.to_string(),
            "Required data files not found: ev_data.json. Make sure to run fetch_ev_fmp first."
        );

        let err =
            NarrativeError::MissingPrerequisites(vec![CacheEntry::Income, CacheEntry::EnterpriseValue]);
        let message = err.to_string();
        assert!(message.contains("income_data.json, ev_data.json"));
        assert!(message.contains("fetch_income_statement_fmp and fetch_ev_fmp"));
    }

    #[test]
    fn test_error_conversion() {
        let err = NarrativeError::InvalidTicker;
        let agent_err: agent_core::Error = err.into();

        match agent_err {
            agent_core::Error::ToolFailed(msg) => {
                assert_eq!(msg, "Ticker symbol must not be empty");
            }
            _ => panic!("Expected ToolFailed variant"),
        }
    }
}
