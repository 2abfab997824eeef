use crate::error::{ExplorerError, Result};
use crate::pagination::{API_MAX_PAGES, PAGE_SIZE};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "GitHub Repo Explorer/0.1.0";

/// Runtime settings shared by the client and the orchestrator.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub api_base_url: String,
    pub user_agent: String,
    pub page_size: u32,
    pub api_max_pages: u32,
    /// Applies to each search request; a hung request counts as a failure.
    pub request_timeout: Duration,
    /// Preferences file; `None` selects the per-user default.
    pub preferences_path: Option<PathBuf>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: PAGE_SIZE,
            api_max_pages: API_MAX_PAGES,
            request_timeout: Duration::from_secs(15),
            preferences_path: None,
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_base_url)
            .map_err(|e| ExplorerError::Config(format!("invalid API URL '{}': {}", self.api_base_url, e)))?;

        if self.page_size == 0 || self.page_size > 100 {
            return Err(ExplorerError::Config(format!(
                "page size must be between 1 and 100, got {}",
                self.page_size
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ExplorerError::Config("request timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
