//! Flow session trait and the queue-backed mock session.

use crate::error::Result;
use crate::link::envelope::{Payload, PayloadType};
use crate::link::queue::MessageQueue;
use crate::member::MemberName;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// One side of an asynchronous message exchange between two flows.
///
/// This trait moves type-erased [`Payload`]s for object-safety. For typed
/// sends and receives, use the extension trait [`FlowSessionExt`].
#[async_trait]
pub trait FlowSession: Send + Sync {
    /// The member on the other side of the session
    fn counterparty(&self) -> &MemberName;

    /// Queue a payload for the counterparty. Never blocks.
    fn send_payload(&self, payload: Payload) -> Result<()>;

    /// Wait for the next payload from the counterparty and check it is an
    /// `expected` value.
    async fn receive_payload(&self, expected: PayloadType) -> Result<Payload>;
}

/// Extension trait for typed session operations.
#[async_trait]
pub trait FlowSessionExt: FlowSession {
    /// Send a typed payload
    fn send<T: Any + Send>(&self, payload: T) -> Result<()> {
        self.send_payload(Payload::new(payload))
    }

    /// Receive the next payload as a `T`
    async fn receive<T: Any + Send>(&self) -> Result<T> {
        self.receive_payload(PayloadType::of::<T>())
            .await?
            .downcast::<T>()
    }
}

impl<S: FlowSession + ?Sized> FlowSessionExt for S {}

/// Session handle handed out by a [`crate::link::MockMessageLink`].
///
/// Sends go to the counterparty's inbound queue; receives pop this side's
/// inbound queue and suspend while it is empty. Clones share the same queues.
#[derive(Clone)]
pub struct MockFlowSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    owner: MemberName,
    counterparty: MemberName,
    outbound: Arc<MessageQueue>,
    inbound: Arc<MessageQueue>,
}

impl MockFlowSession {
    pub(crate) fn new(
        owner: MemberName,
        counterparty: MemberName,
        outbound: Arc<MessageQueue>,
        inbound: Arc<MessageQueue>,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                owner,
                counterparty,
                outbound,
                inbound,
            }),
        }
    }

    /// The member this session belongs to
    pub fn owner(&self) -> &MemberName {
        &self.inner.owner
    }

    /// Number of payloads waiting to be received on this side
    pub fn pending_inbound(&self) -> usize {
        self.inner.inbound.len()
    }
}

impl std::fmt::Debug for MockFlowSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFlowSession")
            .field("owner", &self.inner.owner.to_string())
            .field("counterparty", &self.inner.counterparty.to_string())
            .field("pending_inbound", &self.inner.inbound.len())
            .finish()
    }
}

#[async_trait]
impl FlowSession for MockFlowSession {
    fn counterparty(&self) -> &MemberName {
        &self.inner.counterparty
    }

    fn send_payload(&self, payload: Payload) -> Result<()> {
        let payload_type = payload.payload_type();
        let sequence = self.inner.outbound.push(&self.inner.owner, payload);
        debug!(
            from = %self.inner.owner,
            to = %self.inner.counterparty,
            sequence,
            payload_type = payload_type.name(),
            "Sent message"
        );
        Ok(())
    }

    async fn receive_payload(&self, expected: PayloadType) -> Result<Payload> {
        if self.inner.inbound.is_empty() {
            debug!(
                owner = %self.inner.owner,
                expected = expected.name(),
                "Waiting for message"
            );
        }
        let envelope = self.inner.inbound.pop().await;
        debug!(
            owner = %self.inner.owner,
            from = %envelope.sender,
            sequence = envelope.sequence,
            payload_type = envelope.payload.payload_type().name(),
            "Received message"
        );
        envelope.payload.expect_type(expected)?;
        Ok(envelope.payload)
    }
}
