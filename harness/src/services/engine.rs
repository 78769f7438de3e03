//! Mock flow engine capability.

use crate::capability::Capability;
use crate::error::{HarnessError, Result};
use crate::member::MemberName;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Mock of the engine service: who am I, and run a sub-flow.
#[derive(Debug, Default)]
pub struct MockFlowEngine {
    virtual_node_name: RwLock<Option<MemberName>>,
    sub_flow_results: RwLock<HashMap<String, Value>>,
    sub_flow_calls: RwLock<Vec<SubFlowCall>>,
}

/// A recorded sub-flow invocation
#[derive(Debug, Clone, PartialEq)]
pub struct SubFlowCall {
    pub flow: String,
    pub input: Value,
}

impl Capability for MockFlowEngine {
    const NAME: &'static str = "FlowEngine";
}

impl MockFlowEngine {
    /// Stub the name returned by `virtual_node_name`.
    pub fn set_virtual_node_name(&self, name: MemberName) {
        *self.virtual_node_name.write() = Some(name);
    }

    /// Name of the member the flow is running as.
    pub fn virtual_node_name(&self) -> Result<MemberName> {
        self.virtual_node_name
            .read()
            .clone()
            .ok_or(HarnessError::UnstubbedCall {
                capability: Self::NAME,
                method: "virtual_node_name",
            })
    }

    /// Stub the result of a sub-flow.
    pub fn set_sub_flow_result(&self, flow: &str, result: Value) {
        self.sub_flow_results
            .write()
            .insert(flow.to_string(), result);
    }

    /// Run a sub-flow. Records the call and returns its stubbed result.
    pub fn sub_flow(&self, flow: &str, input: Value) -> Result<Value> {
        self.sub_flow_calls.write().push(SubFlowCall {
            flow: flow.to_string(),
            input,
        });
        self.sub_flow_results
            .read()
            .get(flow)
            .cloned()
            .ok_or(HarnessError::UnstubbedCall {
                capability: Self::NAME,
                method: "sub_flow",
            })
    }

    /// Get all recorded sub-flow calls.
    pub fn sub_flow_calls(&self) -> Vec<SubFlowCall> {
        self.sub_flow_calls.read().clone()
    }
}
