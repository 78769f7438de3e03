//! Failure reporting: dependency errors, stalls, type mismatches and leftovers.

use crate::fixtures::*;
use crate::{init_tracing, stall_config, test_config};
use flowlink_harness::prelude::*;
use std::time::{Duration, Instant};

#[test]
fn test_missing_dependency_fails_before_anything_runs() {
    let bob = MockServiceRegistry::builder(BOB)
        .capability::<MockFlowEngine>()
        .build();

    match bob.create_flow::<ChatIncomingFlow>() {
        Err(HarnessError::UnsatisfiedDependency {
            participant,
            capability,
            ..
        }) => {
            assert_eq!(participant, BOB);
            assert_eq!(capability, "Persistence");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("flow was built without persistence"),
    }
    assert!(!bob.is_sealed());
}

#[test]
fn test_link_requires_stubbed_node_names() {
    let alice = full_participant(ALICE);
    let unnamed = MockServiceRegistry::builder("unnamed")
        .capability::<MockFlowEngine>()
        .build();

    let err = MockMessageLink::new(&alice, &unnamed).unwrap_err();
    assert!(matches!(err, HarnessError::UnstubbedCall { .. }));
}

/// A responder that never hears from anyone is reported, not hung.
#[tokio::test]
async fn test_responder_without_sender_deadlocks() {
    init_tracing();

    let alice = full_participant(ALICE);
    let bob = full_participant(BOB);
    let link = MockMessageLink::new(&alice, &bob).unwrap();
    let incoming: ChatIncomingFlow = bob.create_flow().unwrap();
    let bob_session = link.session_b();
    let started = Instant::now();

    let result = ConcurrentDriver::new(stall_config())
        .participant("incoming", async move { incoming.call(bob_session).await })
        .participant("idle", async { Ok(()) })
        .run()
        .await;

    assert_deadlocked(&result, "incoming");
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(bob.get::<MockPersistence>().unwrap().count::<ChatRecord>(), 0);
}

/// Sending to a member with no link fails the initiator; the stranded
/// responder is aborted after the grace period.
#[tokio::test]
async fn test_unknown_recipient_fails_outgoing_flow() {
    init_tracing();

    let alice = full_participant(ALICE);
    let bob = full_participant(BOB);
    let link = MockMessageLink::new(&alice, &bob).unwrap();
    let outgoing: ChatOutgoingFlow = alice.create_flow().unwrap();
    let incoming: ChatIncomingFlow = bob.create_flow().unwrap();
    let bob_session = link.session_b();

    let stranger = "CN=Carol, O=Carol Corp, L=NYC, C=US";
    let result = ConcurrentDriver::new(test_config())
        .participant("outgoing", async move {
            outgoing.call(chat_request(stranger, "hi")).await.map(drop)
        })
        .participant("incoming", async move { incoming.call(bob_session).await })
        .run()
        .await;

    assert_participant_failed_with(&result, "outgoing", "No session registered");
    assert_eq!(link.pending_messages(), 0);
}

/// The responder expects a `MessageContainer` but gets a bare string.
#[tokio::test]
async fn test_wrong_payload_type_fails_receiver() {
    init_tracing();

    let alice = full_participant(ALICE);
    let bob = full_participant(BOB);
    let link = MockMessageLink::new(&alice, &bob).unwrap();
    let incoming: ChatIncomingFlow = bob.create_flow().unwrap();
    let (alice_session, bob_session) = link.sessions();

    let result = ConcurrentDriver::new(test_config())
        .participant("sender", async move { alice_session.send("not a container".to_string()) })
        .participant("incoming", async move { incoming.call(bob_session).await })
        .run()
        .await;

    assert_participant_failed_with(&result, "incoming", "Unexpected message type");
    assert_participant_failed_with(&result, "incoming", "MessageContainer");
    // The mismatched message was consumed by the failed receive
    assert_no_pending_messages(&link);
}

/// Both flows finish, but the sender left an extra message on the link.
#[tokio::test]
async fn test_unconsumed_message_is_reported() {
    init_tracing();

    let alice = full_participant(ALICE);
    let bob = full_participant(BOB);
    let link = MockMessageLink::new(&alice, &bob).unwrap();
    let incoming: ChatIncomingFlow = bob.create_flow().unwrap();
    let (alice_session, bob_session) = link.sessions();

    let result = ConcurrentDriver::new(test_config())
        .participant("sender", async move {
            alice_session.send(MessageContainer {
                message: "first".to_string(),
            })?;
            alice_session.send(MessageContainer {
                message: "second".to_string(),
            })
        })
        .participant("incoming", async move { incoming.call(bob_session).await })
        .run()
        .await;

    assert_participants_completed(&result);
    match link.fail_if_pending_messages() {
        Err(HarnessError::UnconsumedMessages { count }) => assert_eq!(count, 1),
        other => panic!("expected unconsumed messages, got {other:?}"),
    }

    let records = bob
        .get::<MockPersistence>()
        .unwrap()
        .find_all::<ChatRecord>()
        .unwrap();
    assert_eq!(records[0].message, "first");
}
