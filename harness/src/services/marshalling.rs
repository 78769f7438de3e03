//! Mock JSON marshalling capability.

use crate::capability::Capability;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// JSON marshalling backed by `serde_json`, counting every call.
#[derive(Debug, Default)]
pub struct MockJsonMarshalling {
    format_calls: AtomicUsize,
    parse_calls: AtomicUsize,
}

impl Capability for MockJsonMarshalling {
    const NAME: &'static str = "JsonMarshalling";
}

impl MockJsonMarshalling {
    pub fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        self.format_calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::to_string(value)?)
    }

    pub fn parse<T: DeserializeOwned>(&self, input: &str) -> Result<T> {
        self.parse_calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_str(input)?)
    }

    pub fn format_calls(&self) -> usize {
        self.format_calls.load(Ordering::SeqCst)
    }

    pub fn parse_calls(&self) -> usize {
        self.parse_calls.load(Ordering::SeqCst)
    }
}
