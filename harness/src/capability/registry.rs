//! MockServiceRegistry - per-participant table of capability mocks

use crate::capability::{Capability, CapabilityKey};
use crate::error::{HarnessError, Result};
use crate::flow::{instantiate, InjectableFlow};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

type SharedService = Arc<dyn Any + Send + Sync>;

/// Registry of capability mocks for one test participant.
///
/// `register` is idempotent: the first call for a capability type creates the
/// mock, later calls return the same instance. `get` never creates anything and
/// fails with [`HarnessError::CapabilityNotRegistered`] for unknown types, so a
/// test that forgets to mock a dependency fails loudly.
///
/// Once a flow has been instantiated from the registry its key set is sealed:
/// existing mocks can still be fetched and stubbed, new types cannot be added.
///
/// # Example
///
/// ```ignore
/// use flowlink_harness::prelude::*;
///
/// let outgoing = MockServiceRegistry::builder("outgoing")
///     .capability::<MockFlowMessaging>()
///     .capability::<MockFlowEngine>()
///     .build();
///
/// let engine = outgoing.get::<MockFlowEngine>()?;
/// engine.set_virtual_node_name(MemberName::parse("CN=Alice, O=R3, L=London, C=GB")?);
/// ```
pub struct MockServiceRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    participant: String,
    services: RwLock<HashMap<CapabilityKey, SharedService>>,
    sealed: AtomicBool,
}

impl Clone for MockServiceRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for MockServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockServiceRegistry")
            .field("participant", &self.inner.participant)
            .field("capabilities", &self.registered_capabilities())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}

impl MockServiceRegistry {
    /// Create an empty registry for the named participant.
    pub fn new(participant: impl Into<String>) -> Self {
        Self::from_services(participant.into(), HashMap::new())
    }

    /// Create a builder for a registry with a fixed set of capabilities.
    pub fn builder(participant: impl Into<String>) -> MockServiceRegistryBuilder {
        MockServiceRegistryBuilder {
            participant: participant.into(),
            services: HashMap::new(),
        }
    }

    fn from_services(
        participant: String,
        services: HashMap<CapabilityKey, SharedService>,
    ) -> Self {
        debug!(
            participant = %participant,
            capabilities = services.len(),
            "Created mock service registry"
        );
        Self {
            inner: Arc::new(RegistryInner {
                participant,
                services: RwLock::new(services),
                sealed: AtomicBool::new(false),
            }),
        }
    }

    /// Label of the participant this registry belongs to.
    pub fn participant(&self) -> &str {
        &self.inner.participant
    }

    /// Create the mock for `C`, or return the one already registered.
    pub fn register<C: Capability + Default>(&self) -> Result<Arc<C>> {
        let key = CapabilityKey::of::<C>();
        let mut services = self.inner.services.write();

        if let Some(existing) = services.get(&key) {
            return self.downcast::<C>(existing.clone());
        }
        if self.is_sealed() {
            return Err(HarnessError::RegistrySealed {
                participant: self.inner.participant.clone(),
                capability: key.name(),
            });
        }

        let mock = Arc::new(C::default());
        services.insert(key, mock.clone());
        debug!(
            participant = %self.inner.participant,
            capability = key.name(),
            "Registered capability mock"
        );
        Ok(mock)
    }

    /// Get the mock registered for `C`.
    pub fn get<C: Capability>(&self) -> Result<Arc<C>> {
        let key = CapabilityKey::of::<C>();
        let service = self.inner.services.read().get(&key).cloned();
        match service {
            Some(service) => self.downcast::<C>(service),
            None => Err(HarnessError::CapabilityNotRegistered {
                participant: self.inner.participant.clone(),
                capability: key.name(),
            }),
        }
    }

    /// Check if a capability is registered
    pub fn contains(&self, key: &CapabilityKey) -> bool {
        self.inner.services.read().contains_key(key)
    }

    /// Names of all registered capabilities, sorted.
    pub fn registered_capabilities(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .inner
            .services
            .read()
            .keys()
            .map(|k| k.name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Whether a flow has been instantiated from this registry.
    pub fn is_sealed(&self) -> bool {
        self.inner.sealed.load(Ordering::SeqCst)
    }

    pub(crate) fn seal(&self) {
        if !self.inner.sealed.swap(true, Ordering::SeqCst) {
            debug!(participant = %self.inner.participant, "Sealed mock service registry");
        }
    }

    /// Build a flow whose dependencies are satisfied from this registry.
    ///
    /// Shorthand for [`crate::flow::instantiate`].
    pub fn create_flow<F: InjectableFlow>(&self) -> Result<F> {
        instantiate::<F>(self)
    }

    fn downcast<C: Capability>(&self, service: SharedService) -> Result<Arc<C>> {
        service
            .downcast::<C>()
            .map_err(|_| HarnessError::CapabilityNotRegistered {
                participant: self.inner.participant.clone(),
                capability: C::NAME,
            })
    }
}

/// Builder for [`MockServiceRegistry`].
pub struct MockServiceRegistryBuilder {
    participant: String,
    services: HashMap<CapabilityKey, SharedService>,
}

impl MockServiceRegistryBuilder {
    /// Add a fresh mock for capability `C` (no-op if already added).
    pub fn capability<C: Capability + Default>(mut self) -> Self {
        self.services
            .entry(CapabilityKey::of::<C>())
            .or_insert_with(|| Arc::new(C::default()) as SharedService);
        self
    }

    /// Build the registry.
    pub fn build(self) -> MockServiceRegistry {
        MockServiceRegistry::from_services(self.participant, self.services)
    }
}
