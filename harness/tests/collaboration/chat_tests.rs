//! Happy-path chat collaboration tests.

use crate::fixtures::*;
use crate::{init_tracing, test_config};
use flowlink_harness::prelude::*;

/// Alice sends "chat message" to Bob; both sides record it and the link
/// drains completely.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_chat_message_is_delivered_and_persisted() {
    init_tracing();

    let alice = full_participant(ALICE);
    let bob = responder_participant(BOB);
    let link = MockMessageLink::new(&alice, &bob).expect("link");

    let outgoing: ChatOutgoingFlow = alice.create_flow().expect("outgoing flow");
    let incoming: ChatIncomingFlow = bob.create_flow().expect("incoming flow");
    let bob_session = link.session_b();

    let result = ConcurrentDriver::new(test_config())
        .participant("outgoing", async move {
            let output = outgoing.call(chat_request(BOB, "chat message")).await?;
            assert_eq!(output, OUTGOING_RESULT);
            Ok(())
        })
        .participant("incoming", async move { incoming.call(bob_session).await })
        .run()
        .await;

    assert_participants_completed(&result);
    assert_no_pending_messages(&link);

    let received = bob
        .get::<MockPersistence>()
        .unwrap()
        .find_all::<ChatRecord>()
        .unwrap();
    assert_eq!(
        received,
        vec![ChatRecord {
            direction: Direction::Incoming,
            local: BOB.to_string(),
            counterparty: ALICE.to_string(),
            message: "chat message".to_string(),
        }]
    );

    let sent = alice
        .get::<MockPersistence>()
        .unwrap()
        .find_all::<ChatRecord>()
        .unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].direction, Direction::Outgoing);
    assert_eq!(sent[0].counterparty, BOB);

    let messaging = alice.get::<MockFlowMessaging>().unwrap();
    assert_eq!(messaging.initiated_flows(), vec![member(BOB)]);
    assert_eq!(alice.get::<MockJsonMarshalling>().unwrap().parse_calls(), 1);
    assert_eq!(bob.registered_capabilities(), vec!["FlowEngine", "Persistence"]);
}

/// The responder may be scheduled first; its receive waits for the send.
#[tokio::test]
async fn test_incoming_flow_started_first_waits_for_message() {
    init_tracing();

    let alice = full_participant(ALICE);
    let bob = full_participant(BOB);
    let link = MockMessageLink::new(&alice, &bob).unwrap();

    let outgoing: ChatOutgoingFlow = alice.create_flow().unwrap();
    let incoming: ChatIncomingFlow = bob.create_flow().unwrap();
    let bob_session = link.session_b();

    let result = execute_concurrently(vec![
        Box::pin(async move { incoming.call(bob_session).await }) as ParticipantFuture,
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            outgoing.call(chat_request(BOB, "late hello")).await.map(drop)
        }) as ParticipantFuture,
    ])
    .await;

    assert_participants_completed(&result);
    link.fail_if_pending_messages().unwrap();
    assert_eq!(bob.get::<MockPersistence>().unwrap().count::<ChatRecord>(), 1);
}

/// Building a flow seals its registry and shares the registered mocks.
#[test]
fn test_flow_creation_seals_registry() {
    let bob = full_participant(BOB);
    assert!(!bob.is_sealed());

    let _incoming: ChatIncomingFlow = bob.create_flow().unwrap();
    assert!(bob.is_sealed());

    let err = bob.register::<CountingService>().unwrap_err();
    assert!(matches!(err, HarnessError::RegistrySealed { .. }));

    // Already-registered capabilities are still handed out
    assert!(bob.register::<MockPersistence>().is_ok());
}

#[derive(Debug, Default)]
struct CountingService;

impl Capability for CountingService {
    const NAME: &'static str = "Counting";
}
