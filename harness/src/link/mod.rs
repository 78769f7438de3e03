//! Mock message link: a simulated session between two participants.

mod envelope;
mod queue;
mod session;

pub use envelope::{Envelope, Payload, PayloadType};
pub use session::{FlowSession, FlowSessionExt, MockFlowSession};

use crate::capability::MockServiceRegistry;
use crate::error::{HarnessError, Result};
use crate::member::MemberName;
use crate::services::{MockFlowEngine, MockFlowMessaging};
use queue::MessageQueue;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Links two participants through a pair of in-memory FIFO queues.
///
/// Each participant gets a [`MockFlowSession`]. Whatever one side sends, the
/// other side receives in the same order; a receive on an empty queue suspends
/// until the peer sends. After the driven flows finish, call
/// [`fail_if_pending_messages`](Self::fail_if_pending_messages) to prove every
/// sent message was consumed.
///
/// # Example
///
/// ```ignore
/// let link = MockMessageLink::new(&outgoing, &incoming)?;
/// let to_session = link.session_b();
///
/// ConcurrentDriver::default()
///     .participant("outgoing", async move { outgoing_flow.call(request).await.map(drop) })
///     .participant("incoming", async move { incoming_flow.call(to_session).await })
///     .run()
///     .await?;
///
/// link.fail_if_pending_messages()?;
/// ```
pub struct MockMessageLink {
    id: Uuid,
    session_a: MockFlowSession,
    session_b: MockFlowSession,
    a_to_b: Arc<MessageQueue>,
    b_to_a: Arc<MessageQueue>,
}

impl MockMessageLink {
    /// Link the participants behind two registries.
    ///
    /// Member names come from each registry's [`MockFlowEngine`], which must be
    /// registered and stubbed with a virtual node name. Where a registry also
    /// holds [`MockFlowMessaging`], that side's session is attached to it so the
    /// flow can reach it through `initiate_flow(counterparty)`.
    pub fn new(a: &MockServiceRegistry, b: &MockServiceRegistry) -> Result<Self> {
        let a_name = a.get::<MockFlowEngine>()?.virtual_node_name()?;
        let b_name = b.get::<MockFlowEngine>()?.virtual_node_name()?;
        let link = Self::between(a_name, b_name);

        attach_session(a, &link.session_a)?;
        attach_session(b, &link.session_b)?;
        Ok(link)
    }

    /// Link two members directly, without registries.
    pub fn between(a: MemberName, b: MemberName) -> Self {
        let a_to_b = Arc::new(MessageQueue::new());
        let b_to_a = Arc::new(MessageQueue::new());
        let id = Uuid::new_v4();
        debug!(link_id = %id, a = %a, b = %b, "Created mock message link");

        Self {
            id,
            session_a: MockFlowSession::new(
                a.clone(),
                b.clone(),
                a_to_b.clone(),
                b_to_a.clone(),
            ),
            session_b: MockFlowSession::new(b, a, b_to_a.clone(), a_to_b.clone()),
            a_to_b,
            b_to_a,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Session used by the first participant
    pub fn session_a(&self) -> MockFlowSession {
        self.session_a.clone()
    }

    /// Session used by the second participant
    pub fn session_b(&self) -> MockFlowSession {
        self.session_b.clone()
    }

    /// Both sessions, in participant order
    pub fn sessions(&self) -> (MockFlowSession, MockFlowSession) {
        (self.session_a(), self.session_b())
    }

    /// Number of sent but not yet received messages, both directions.
    pub fn pending_messages(&self) -> usize {
        self.a_to_b.len() + self.b_to_a.len()
    }

    /// Type names of all queued payloads, a-to-b first.
    pub fn pending_types(&self) -> Vec<&'static str> {
        self.a_to_b
            .pending_types()
            .into_iter()
            .chain(self.b_to_a.pending_types())
            .map(|t| t.name())
            .collect()
    }

    /// Fail with [`HarnessError::UnconsumedMessages`] unless every sent
    /// message has been received.
    pub fn fail_if_pending_messages(&self) -> Result<()> {
        let count = self.pending_messages();
        if count == 0 {
            return Ok(());
        }
        warn!(
            link_id = %self.id,
            pending = count,
            payload_types = ?self.pending_types(),
            "Link still holds unconsumed messages"
        );
        Err(HarnessError::UnconsumedMessages { count })
    }
}

impl std::fmt::Debug for MockMessageLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockMessageLink")
            .field("id", &self.id)
            .field("session_a", &self.session_a)
            .field("session_b", &self.session_b)
            .finish()
    }
}

fn attach_session(registry: &MockServiceRegistry, session: &MockFlowSession) -> Result<()> {
    match registry.get::<MockFlowMessaging>() {
        Ok(messaging) => {
            messaging.attach_session(session.clone());
            Ok(())
        }
        Err(HarnessError::CapabilityNotRegistered { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}
