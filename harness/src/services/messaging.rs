//! Mock flow messaging capability.

use crate::capability::Capability;
use crate::error::{HarnessError, Result};
use crate::link::{FlowSession, MockFlowSession};
use crate::member::MemberName;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Mock of the messaging service a flow uses to open sessions.
///
/// Sessions are attached by [`crate::link::MockMessageLink::new`]; a flow then
/// reaches its side of the link with `initiate_flow(counterparty)`.
#[derive(Debug, Default)]
pub struct MockFlowMessaging {
    sessions: RwLock<HashMap<MemberName, MockFlowSession>>,
    initiated: RwLock<Vec<MemberName>>,
}

impl Capability for MockFlowMessaging {
    const NAME: &'static str = "FlowMessaging";
}

impl MockFlowMessaging {
    /// Attach `session`, returning the one it replaced for the same counterparty.
    pub(crate) fn attach_session(&self, session: MockFlowSession) -> Option<MockFlowSession> {
        let counterparty = session.counterparty().clone();
        let replaced = self.sessions.write().insert(counterparty.clone(), session);
        if replaced.is_some() {
            warn!(
                counterparty = %counterparty,
                "Replaced session attached by an earlier link"
            );
        } else {
            debug!(counterparty = %counterparty, "Attached session to flow messaging");
        }
        replaced
    }

    /// Open a session with `counterparty`.
    pub fn initiate_flow(&self, counterparty: &MemberName) -> Result<MockFlowSession> {
        self.initiated.write().push(counterparty.clone());
        self.sessions
            .read()
            .get(counterparty)
            .cloned()
            .ok_or_else(|| HarnessError::NoSessionForCounterparty(counterparty.to_string()))
    }

    /// Counterparties the flow tried to open sessions with, in call order.
    pub fn initiated_flows(&self) -> Vec<MemberName> {
        self.initiated.read().clone()
    }

    /// Check if the flow opened a session with `counterparty`.
    pub fn was_flow_initiated(&self, counterparty: &MemberName) -> bool {
        self.initiated.read().contains(counterparty)
    }
}
