//! Request data passed to RPC-started flows.

use crate::error::Result;
use crate::services::MockJsonMarshalling;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON request body handed to a flow started over RPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestData {
    body: String,
}

impl RequestData {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Build request data by serializing `body`.
    pub fn from_body<T: Serialize>(body: &T) -> Result<Self> {
        Ok(Self::new(serde_json::to_string(body)?))
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse the body with the flow's marshalling service.
    pub fn body_as<T: DeserializeOwned>(&self, marshalling: &MockJsonMarshalling) -> Result<T> {
        marshalling.parse(&self.body)
    }
}
