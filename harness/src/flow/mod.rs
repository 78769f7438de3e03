//! Flow contract and dependency-injecting instantiation.

mod instantiator;
mod request;

pub use instantiator::{instantiate, ServiceInjector};
pub use request::RequestData;

use crate::capability::CapabilityKey;
use crate::error::Result;
use async_trait::async_trait;

/// A unit of business logic under test, with a single entry point.
#[async_trait]
pub trait Flow: Send + Sync {
    /// Input passed to `call` (request data, a session, ...)
    type Input: Send;
    /// Output returned by `call`
    type Output: Send;

    /// Run the flow
    async fn call(&self, input: Self::Input) -> Result<Self::Output>;
}

/// A flow that can be built from a [`crate::capability::MockServiceRegistry`].
///
/// `dependencies` lists every capability the flow needs; `inject` is the
/// constructor and may only ask the injector for capabilities from that list.
///
/// # Example
///
/// ```ignore
/// struct IncomingFlow {
///     persistence: Arc<MockPersistence>,
/// }
///
/// impl InjectableFlow for IncomingFlow {
///     fn dependencies() -> Vec<CapabilityKey> {
///         vec![CapabilityKey::of::<MockPersistence>()]
///     }
///
///     fn inject(services: &ServiceInjector<'_>) -> Result<Self> {
///         Ok(Self {
///             persistence: services.inject()?,
///         })
///     }
/// }
/// ```
pub trait InjectableFlow: Flow + Sized {
    /// Capabilities the flow needs
    fn dependencies() -> Vec<CapabilityKey>;

    /// Construct the flow from injected capabilities
    fn inject(services: &ServiceInjector<'_>) -> Result<Self>;
}
