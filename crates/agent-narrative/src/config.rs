//! Configuration for financial narrative operations

use crate::error::{NarrativeError, Result};
use agent_utils::{env_var, lookup_parsed, lookup_var};
use std::path::PathBuf;
use std::time::Duration;

/// Default FMP API base URL
pub const DEFAULT_FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Most recent periods requested from upstream and kept per record set
pub const MAX_PERIODS: usize = 5;

/// Configuration for financial narrative operations
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    /// FMP API key, required by the fetching tools
    pub fmp_api_key: Option<String>,

    /// FMP API base URL
    pub fmp_base_url: String,

    /// Number of periods requested and kept (1..=5)
    pub period_limit: usize,

    /// Directory holding the cache files
    pub workspace_dir: PathBuf,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// External report template, built-in template when unset
    pub template_path: Option<PathBuf>,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            fmp_api_key: None,
            fmp_base_url: DEFAULT_FMP_BASE_URL.to_string(),
            period_limit: MAX_PERIODS,
            workspace_dir: PathBuf::from("workspace"),
            request_timeout: Duration::from_secs(30),
            template_path: None,
        }
    }
}

impl NarrativeConfig {
    /// Create a new configuration builder
    pub fn builder() -> NarrativeConfigBuilder {
        NarrativeConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Reads `FMP_API_KEY`, `FMP_BASE_URL`, `NARRATIVE_WORKSPACE_DIR`,
    /// `NARRATIVE_TEMPLATE_PATH` and `NARRATIVE_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PERIODS).contains(&self.period_limit) {
            return Err(NarrativeError::ConfigError(format!(
                "period_limit must be between 1 and {MAX_PERIODS}, got {}",
                self.period_limit
            )));
        }

        if self.fmp_base_url.trim().is_empty() {
            return Err(NarrativeError::ConfigError(
                "fmp_base_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// API key for the fetching tools
    pub fn require_api_key(&self) -> Result<&str> {
        self.fmp_api_key.as_deref().ok_or_else(|| {
            NarrativeError::ConfigError("FMP_API_KEY environment variable not set".to_string())
        })
    }
}

/// Builder for NarrativeConfig
#[derive(Debug, Default)]
pub struct NarrativeConfigBuilder {
    fmp_api_key: Option<String>,
    fmp_base_url: Option<String>,
    period_limit: Option<usize>,
    workspace_dir: Option<PathBuf>,
    request_timeout: Option<Duration>,
    template_path: Option<PathBuf>,
    env_error: Option<String>,
}

impl NarrativeConfigBuilder {
    /// Set the FMP API key
    pub fn fmp_api_key(mut self, key: impl Into<String>) -> Self {
        self.fmp_api_key = Some(key.into());
        self
    }

    /// Set the FMP API base URL
    pub fn fmp_base_url(mut self, url: impl Into<String>) -> Self {
        self.fmp_base_url = Some(url.into());
        self
    }

    /// Set the number of periods requested and kept
    pub fn period_limit(mut self, limit: usize) -> Self {
        self.period_limit = Some(limit);
        self
    }

    /// Set the directory holding the cache files
    pub fn workspace_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace_dir = Some(dir.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set an external report template file
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Fill unset fields from the process environment
    pub fn with_env(self) -> Self {
        self.with_lookup(env_var)
    }

    /// Fill unset fields through an arbitrary key lookup
    ///
    /// Values already set on the builder take precedence.
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.fmp_api_key.is_none() {
            self.fmp_api_key = lookup_var(&lookup, "FMP_API_KEY");
        }
        if self.fmp_base_url.is_none() {
            self.fmp_base_url = lookup_var(&lookup, "FMP_BASE_URL");
        }
        if self.workspace_dir.is_none() {
            self.workspace_dir = lookup_var(&lookup, "NARRATIVE_WORKSPACE_DIR").map(PathBuf::from);
        }
        if self.template_path.is_none() {
            self.template_path = lookup_var(&lookup, "NARRATIVE_TEMPLATE_PATH").map(PathBuf::from);
        }
        if self.request_timeout.is_none() {
            match lookup_parsed::<_, u64>(&lookup, "NARRATIVE_REQUEST_TIMEOUT_SECS") {
                Ok(secs) => self.request_timeout = secs.map(Duration::from_secs),
                Err(e) => self.env_error = Some(e),
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<NarrativeConfig> {
        if let Some(e) = self.env_error {
            return Err(NarrativeError::ConfigError(e));
        }

        let defaults = NarrativeConfig::default();

        let config = NarrativeConfig {
            fmp_api_key: self.fmp_api_key,
            fmp_base_url: self
                .fmp_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.fmp_base_url),
            period_limit: self.period_limit.unwrap_or(defaults.period_limit),
            workspace_dir: self.workspace_dir.unwrap_or(defaults.workspace_dir),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            template_path: self.template_path,
        };

        config.validate()?;
        Ok(config)
    }
}
