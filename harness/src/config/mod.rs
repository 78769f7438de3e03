//! Configuration presets for the concurrent driver
//!
//! The driver bounds how long a collaboration test may run. Presets cover the
//! common cases; `DriverConfig::from_env` lets CI stretch the bound without
//! touching test code.

use std::time::Duration;

/// Environment variable overriding the driver timeout, in milliseconds
pub const TIMEOUT_ENV_VAR: &str = "FLOWLINK_DRIVER_TIMEOUT_MS";

/// Configuration for the concurrent execution driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Upper bound on the whole driven run
    pub timeout: Duration,
    /// How long remaining participants may keep running once one has failed
    pub failure_grace: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DriverConfig {
    /// Default configuration suitable for most collaboration tests
    pub const DEFAULT: Self = Self {
        timeout: Duration::from_secs(10),
        failure_grace: Duration::from_secs(1),
    };

    /// Short bound for tests that expect a deadlock or failure
    pub const FAST: Self = Self {
        timeout: Duration::from_secs(1),
        failure_grace: Duration::from_millis(100),
    };

    /// Generous bound for slow CI machines
    pub const PATIENT: Self = Self {
        timeout: Duration::from_secs(60),
        failure_grace: Duration::from_secs(5),
    };

    /// Create a new configuration with validation
    pub fn new(timeout: Duration, failure_grace: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "timeout must be positive".to_string(),
            ));
        }
        if failure_grace > timeout {
            return Err(ConfigError::InvalidValue(
                "failure_grace must not exceed timeout".to_string(),
            ));
        }

        Ok(Self {
            timeout,
            failure_grace,
        })
    }

    /// Default configuration, with the timeout taken from
    /// `FLOWLINK_DRIVER_TIMEOUT_MS` when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::DEFAULT.with_timeout_override(std::env::var(TIMEOUT_ENV_VAR).ok().as_deref())
    }

    /// Set the overall timeout, validated like [`DriverConfig::new`]
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, ConfigError> {
        Self::new(timeout, self.failure_grace)
    }

    /// Set the failure grace period, validated like [`DriverConfig::new`]
    pub fn with_failure_grace(self, failure_grace: Duration) -> Result<Self, ConfigError> {
        Self::new(self.timeout, failure_grace)
    }

    fn with_timeout_override(self, raw_millis: Option<&str>) -> Result<Self, ConfigError> {
        let Some(raw) = raw_millis else {
            return Ok(self);
        };
        let millis: u64 = raw.trim().parse().map_err(|_| {
            ConfigError::InvalidValue(format!(
                "{} must be a number of milliseconds, got '{}'",
                TIMEOUT_ENV_VAR, raw
            ))
        })?;
        let timeout = Duration::from_millis(millis);
        Self::new(timeout, self.failure_grace.min(timeout))
    }
}

/// Configuration error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
