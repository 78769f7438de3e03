//! Capabilities: the service dependencies a flow can ask to have injected.

mod registry;

pub use registry::{MockServiceRegistry, MockServiceRegistryBuilder};

use std::any::{Any, TypeId};
use std::fmt;

/// A service a flow may depend on, identified by its Rust type.
///
/// Every mock in [`crate::services`] implements this. Test code can add its own
/// capabilities by implementing it for any `Default` type.
pub trait Capability: Any + Send + Sync {
    /// Human-readable name used in errors and logs
    const NAME: &'static str;
}

/// Identity of a capability type inside a registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityKey {
    type_id: TypeId,
    name: &'static str,
}

impl CapabilityKey {
    /// Key for capability type `C`
    pub fn of<C: Capability>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: C::NAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityKey").field(&self.name).finish()
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
