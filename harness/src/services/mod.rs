//! Capability mocks for the services a flow can depend on.
//!
//! Each mock offers canned behaviour set up by the test (stubs) and records
//! what the flow did with it, in the style of a mock workflow context.
//!
//! - [`MockFlowEngine`] - virtual node identity and sub-flow invocation
//! - [`MockFlowMessaging`] - opens sessions to counterparties through links
//! - [`MockJsonMarshalling`] - JSON formatting and parsing
//! - [`MockPersistence`] - in-memory entity store

mod engine;
mod marshalling;
mod messaging;
mod persistence;

pub use engine::*;
pub use marshalling::*;
pub use messaging::*;
pub use persistence::*;
