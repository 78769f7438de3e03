//! Flow instantiation with capabilities injected from a registry.

use crate::capability::{Capability, CapabilityKey, MockServiceRegistry};
use crate::error::{HarnessError, Result};
use crate::flow::InjectableFlow;
use std::any::type_name;
use std::sync::Arc;
use tracing::debug;

/// Hands a flow's constructor the capabilities it declared.
pub struct ServiceInjector<'a> {
    flow: &'static str,
    declared: &'a [CapabilityKey],
    registry: &'a MockServiceRegistry,
}

impl<'a> ServiceInjector<'a> {
    /// Get the mock for a declared capability.
    pub fn inject<C: Capability>(&self) -> Result<Arc<C>> {
        let key = CapabilityKey::of::<C>();
        if !self.declared.contains(&key) {
            return Err(HarnessError::UndeclaredDependency {
                flow: self.flow,
                capability: key.name(),
            });
        }
        self.registry.get::<C>().map_err(|e| match e {
            HarnessError::CapabilityNotRegistered { participant, .. } => {
                HarnessError::UnsatisfiedDependency {
                    flow: self.flow,
                    participant,
                    capability: key.name(),
                }
            }
            other => other,
        })
    }

    /// Participant the flow is being built for
    pub fn participant(&self) -> &str {
        self.registry.participant()
    }
}

/// Build flow `F` with every declared dependency satisfied from `registry`.
///
/// Fails with [`HarnessError::UnsatisfiedDependency`] naming the first
/// declared capability the registry lacks. Nothing in the flow runs here. On
/// success the registry is sealed against new capability types.
pub fn instantiate<F: InjectableFlow>(registry: &MockServiceRegistry) -> Result<F> {
    let flow = type_name::<F>();
    let declared = F::dependencies();

    if let Some(missing) = declared.iter().find(|key| !registry.contains(key)) {
        return Err(HarnessError::UnsatisfiedDependency {
            flow,
            participant: registry.participant().to_string(),
            capability: missing.name(),
        });
    }

    let injector = ServiceInjector {
        flow,
        declared: &declared,
        registry,
    };
    let instance = F::inject(&injector)?;
    registry.seal();

    debug!(
        flow,
        participant = registry.participant(),
        dependencies = declared.len(),
        "Instantiated flow"
    );
    Ok(instance)
}
