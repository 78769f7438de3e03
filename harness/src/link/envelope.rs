//! Typed payloads and the envelopes that carry them through a link.

use crate::error::{HarnessError, Result};
use crate::member::MemberName;
use chrono::{DateTime, Utc};
use std::any::{type_name, Any, TypeId};
use std::fmt;

/// Runtime identity of a payload type.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PayloadType {
    id: TypeId,
    name: &'static str,
}

impl PayloadType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An already-typed value moving between two flows. Never serialized.
pub struct Payload {
    payload_type: PayloadType,
    value: Box<dyn Any + Send>,
}

impl Payload {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            payload_type: PayloadType::of::<T>(),
            value: Box::new(value),
        }
    }

    pub fn payload_type(&self) -> PayloadType {
        self.payload_type
    }

    /// Check that the payload is a `expected` value.
    pub fn expect_type(&self, expected: PayloadType) -> Result<()> {
        if self.payload_type == expected {
            Ok(())
        } else {
            Err(HarnessError::UnexpectedMessageType {
                expected: expected.name,
                actual: self.payload_type.name,
            })
        }
    }

    /// Take the value out as a `T`.
    pub fn downcast<T: Any>(self) -> Result<T> {
        let actual = self.payload_type.name;
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| HarnessError::UnexpectedMessageType {
                expected: type_name::<T>(),
                actual,
            })
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type", &self.payload_type)
            .finish_non_exhaustive()
    }
}

/// One queued message: the payload plus where it sits in its queue.
#[derive(Debug)]
pub struct Envelope {
    pub sequence: u64,
    pub sender: MemberName,
    pub sent_at: DateTime<Utc>,
    pub payload: Payload,
}
