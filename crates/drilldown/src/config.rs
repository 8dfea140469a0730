//! Column stack configuration.
//!
//! ```
//! use drilldown::ColumnStackConfig;
//! use std::time::Duration;
//!
//! let config = ColumnStackConfig::from_toml_str("scroll_delay_ms = 250").unwrap();
//! assert_eq!(config.scroll_delay(), Duration::from_millis(250));
//! assert!(config.coalesce_scroll_requests);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

/// Delay before the strip scrolls to a newly appended column.
pub const DEFAULT_SCROLL_DELAY_MS: u64 = 100;

/// Tunables for a [`ColumnStack`](crate::ColumnStack) and its deferred scroll.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnStackConfig {
    /// How long to wait after a scroll request before scrolling, in milliseconds.
    pub scroll_delay_ms: u64,
    /// Fold scroll requests made while one is pending into that one.
    pub coalesce_scroll_requests: bool,
}

impl Default for ColumnStackConfig {
    fn default() -> Self {
        Self {
            scroll_delay_ms: DEFAULT_SCROLL_DELAY_MS,
            coalesce_scroll_requests: true,
        }
    }
}

impl ColumnStackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_scroll_delay(mut self, delay: Duration) -> Self {
        self.scroll_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_coalesce_scroll_requests(mut self, coalesce: bool) -> Self {
        self.coalesce_scroll_requests = coalesce;
        self
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}
