//! Timing configuration shared by every page controller.

use std::time::Duration;

use serde::Deserialize;

/// Interval and delay settings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between two polls of the dashboard or detail view.
    pub poll_interval_ms: u64,
    /// How long an alert stays visible before it expires.
    pub alert_timeout_ms: u64,
    /// Delay before reloading the page after a successful change.
    pub reload_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10_000,
            alert_timeout_ms: 5_000,
            reload_delay_ms: 1_000,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn alert_timeout(&self) -> Duration {
        Duration::from_millis(self.alert_timeout_ms)
    }

    #[must_use]
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    /// Check that the configured intervals are usable.
    ///
    /// # Errors
    ///
    /// Returns the first field that cannot drive a timer.
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.poll_interval_ms == 0 {
            return Err(TimingError::ZeroPollInterval);
        }
        if self.alert_timeout_ms == 0 {
            return Err(TimingError::ZeroAlertTimeout);
        }
        Ok(())
    }
}

/// Unusable timing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    #[error("poll_interval_ms must be non-zero")]
    ZeroPollInterval,
    #[error("alert_timeout_ms must be non-zero")]
    ZeroAlertTimeout,
}
