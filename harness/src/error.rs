//! Error types for the flowlink harness

use std::time::Duration;

/// Main error type for the harness.
///
/// Every variant is a hard test failure. Nothing in the harness retries.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A capability was looked up on a registry that never registered it
    #[error("Capability not registered for participant '{participant}': {capability}")]
    CapabilityNotRegistered {
        participant: String,
        capability: &'static str,
    },

    /// A flow declared a dependency that its registry cannot satisfy
    #[error(
        "Unsatisfied dependency for flow '{flow}': {capability} is not registered for participant '{participant}'"
    )]
    UnsatisfiedDependency {
        flow: &'static str,
        participant: String,
        capability: &'static str,
    },

    /// A flow asked the injector for a capability it never declared
    #[error("Flow '{flow}' requested undeclared capability: {capability}")]
    UndeclaredDependency {
        flow: &'static str,
        capability: &'static str,
    },

    /// New capabilities cannot be added once a flow was built from the registry
    #[error("Registry for participant '{participant}' is sealed, cannot register {capability}")]
    RegistrySealed {
        participant: String,
        capability: &'static str,
    },

    /// A received payload does not have the type the receiver asked for
    #[error("Unexpected message type: expected {expected}, received {actual}")]
    UnexpectedMessageType {
        expected: &'static str,
        actual: &'static str,
    },

    /// Messages were sent on a link but never received
    #[error("{count} message(s) were sent but never received")]
    UnconsumedMessages { count: usize },

    /// A driven participant returned an error or panicked
    #[error("Participant '{participant}' failed: {source}")]
    ParticipantFailed {
        participant: String,
        #[source]
        source: Box<HarnessError>,
    },

    /// Participants were still running when the driver's deadline passed
    #[error("Participants {participants:?} did not complete within {timeout:?}")]
    ParticipantDeadlock {
        participants: Vec<String>,
        timeout: Duration,
    },

    /// A participant task panicked
    #[error("Panicked: {0}")]
    Panicked(String),

    /// `initiate_flow` was called for a member no link was created for
    #[error("No session registered for counterparty: {0}")]
    NoSessionForCounterparty(String),

    /// A mock method was called without canned behaviour
    #[error("Unstubbed call: {capability}::{method}")]
    UnstubbedCall {
        capability: &'static str,
        method: &'static str,
    },

    /// Member name could not be parsed
    #[error("Invalid member name '{name}': {reason}")]
    InvalidMemberName { name: String, reason: String },

    /// Invalid configuration or harness usage
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure raised by flow code under test
    #[error("Flow failed: {0}")]
    FlowFailed(String),
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

impl From<crate::config::ConfigError> for HarnessError {
    fn from(err: crate::config::ConfigError) -> Self {
        HarnessError::InvalidConfiguration(err.to_string())
    }
}
