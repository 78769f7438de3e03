//! Flowlink test harness
//!
//! In-process harness for testing pairs of collaborating flows. Each
//! participant gets a registry of mock platform services, flows are built with
//! those mocks injected, a bidirectional in-memory message link connects the
//! two sides, and a concurrent driver runs both flows to completion under a
//! timeout.

#![allow(clippy::result_large_err)]

pub mod assertions;
pub mod capability;
pub mod config;
pub mod driver;
pub mod error;
pub mod flow;
pub mod link;
pub mod member;
pub mod services;

// Re-export commonly used types
pub use capability::{Capability, CapabilityKey, MockServiceRegistry, MockServiceRegistryBuilder};
pub use config::{ConfigError, DriverConfig};
pub use driver::{execute_concurrently, ConcurrentDriver, ParticipantFuture};
pub use error::{HarnessError, Result};
pub use flow::{instantiate, Flow, InjectableFlow, RequestData, ServiceInjector};
pub use link::{
    Envelope, FlowSession, FlowSessionExt, MockFlowSession, MockMessageLink, Payload, PayloadType,
};
pub use member::MemberName;
pub use services::{
    MockFlowEngine, MockFlowMessaging, MockJsonMarshalling, MockPersistence, SubFlowCall,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assertions::{
        assert_deadlocked, assert_no_pending_messages, assert_participant_failed_with,
        assert_participants_completed,
    };
    pub use crate::capability::{Capability, CapabilityKey, MockServiceRegistry};
    pub use crate::config::DriverConfig;
    pub use crate::driver::{execute_concurrently, ConcurrentDriver, ParticipantFuture};
    pub use crate::error::{HarnessError, Result};
    pub use crate::flow::{Flow, InjectableFlow, RequestData, ServiceInjector};
    pub use crate::link::{FlowSession, FlowSessionExt, MockFlowSession, MockMessageLink};
    pub use crate::member::MemberName;
    pub use crate::services::{
        MockFlowEngine, MockFlowMessaging, MockJsonMarshalling, MockPersistence,
    };
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Value};
}
