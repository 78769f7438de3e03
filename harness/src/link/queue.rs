//! Condition-guarded FIFO queue backing one direction of a link.

use crate::link::envelope::{Envelope, Payload, PayloadType};
use crate::member::MemberName;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::Notify;

/// FIFO of envelopes with an async wait for "not empty".
///
/// Push and pop each hold the mutex for the whole operation, so a waiter never
/// sees a half-written envelope. `Notify` stores a permit when nobody is
/// waiting, which closes the gap between an empty check and the wait.
#[derive(Debug, Default)]
pub(crate) struct MessageQueue {
    state: Mutex<QueueState>,
    not_empty: Notify,
}

#[derive(Debug, Default)]
struct QueueState {
    envelopes: VecDeque<Envelope>,
    next_sequence: u64,
}

impl MessageQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a payload. Never blocks.
    pub(crate) fn push(&self, sender: &MemberName, payload: Payload) -> u64 {
        let sequence = {
            let mut state = self.state.lock();
            let sequence = state.next_sequence;
            state.next_sequence += 1;
            state.envelopes.push_back(Envelope {
                sequence,
                sender: sender.clone(),
                sent_at: Utc::now(),
                payload,
            });
            sequence
        };
        self.not_empty.notify_one();
        sequence
    }

    /// Pop the oldest envelope, waiting until one is available.
    pub(crate) async fn pop(&self) -> Envelope {
        loop {
            if let Some(envelope) = self.try_pop() {
                return envelope;
            }
            self.not_empty.notified().await;
        }
    }

    pub(crate) fn try_pop(&self) -> Option<Envelope> {
        self.state.lock().envelopes.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().envelopes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.state.lock().envelopes.is_empty()
    }

    pub(crate) fn pending_types(&self) -> Vec<PayloadType> {
        self.state
            .lock()
            .envelopes
            .iter()
            .map(|e| e.payload.payload_type())
            .collect()
    }
}
