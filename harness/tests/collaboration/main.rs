//! Collaboration tests for flowlink-harness
//!
//! Each test wires two participants (an initiating and a responding flow)
//! through a mock message link and drives both flows concurrently.
//!
//! # Running
//!
//! ```bash
//! RUST_LOG=flowlink_harness=debug cargo test --test collaboration -p flowlink-harness
//! ```

mod chat_tests;
mod failure_tests;

use flowlink_harness::DriverConfig;
use std::time::Duration;

/// Driver bound for tests that are expected to complete.
///
/// Honours `FLOWLINK_DRIVER_TIMEOUT_MS` so slow machines can stretch it.
pub fn test_config() -> DriverConfig {
    DriverConfig::from_env().expect("FLOWLINK_DRIVER_TIMEOUT_MS must be a positive number")
}

/// Short bound for tests that are expected to stall
pub fn stall_config() -> DriverConfig {
    DriverConfig::FAST
        .with_timeout(Duration::from_millis(250))
        .expect("stall bound is valid")
}

/// Initialize tracing once for all tests
static TRACING_INITIALIZED: std::sync::Once = std::sync::Once::new();

pub fn init_tracing() {
    TRACING_INITIALIZED.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_test_writer()
            .init();
    });
}
