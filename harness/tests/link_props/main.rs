//! Property-based tests for message link ordering and accounting
//!
//! These tests use proptest to verify that links are FIFO per direction and
//! that pending counts track sends minus receives.

use flowlink_harness::prelude::*;
use proptest::prelude::*;

fn link() -> MockMessageLink {
    MockMessageLink::between(
        MemberName::parse("CN=Alice, O=Alice Corp, L=LDN, C=GB").unwrap(),
        MemberName::parse("CN=Bob, O=Bob Corp, L=LDN, C=GB").unwrap(),
    )
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_receive_order_matches_send_order(values in prop::collection::vec(any::<i64>(), 0..50)) {
        let link = link();
        let (alice, bob) = link.sessions();

        for value in &values {
            alice.send(*value).unwrap();
        }

        let received: Vec<i64> = runtime().block_on(async {
            let mut out = Vec::with_capacity(values.len());
            for _ in 0..values.len() {
                out.push(bob.receive::<i64>().await.unwrap());
            }
            out
        });

        prop_assert_eq!(received, values);
        prop_assert_eq!(link.pending_messages(), 0);
    }

    #[test]
    fn prop_pending_is_sent_minus_received(sent in 0usize..40, take in 0usize..40) {
        let received = take.min(sent);
        let link = link();
        let (alice, bob) = link.sessions();

        for n in 0..sent {
            alice.send(n).unwrap();
        }
        runtime().block_on(async {
            for _ in 0..received {
                bob.receive::<usize>().await.unwrap();
            }
        });

        prop_assert_eq!(link.pending_messages(), sent - received);
        prop_assert_eq!(link.fail_if_pending_messages().is_ok(), sent == received);
    }

    #[test]
    fn prop_directions_are_independent(a_to_b in 0usize..20, b_to_a in 0usize..20) {
        let link = link();
        let (alice, bob) = link.sessions();

        for n in 0..a_to_b {
            alice.send(n as u32).unwrap();
        }
        for n in 0..b_to_a {
            bob.send(n.to_string()).unwrap();
        }

        prop_assert_eq!(link.pending_messages(), a_to_b + b_to_a);
        prop_assert_eq!(alice.pending_inbound(), b_to_a);
        prop_assert_eq!(bob.pending_inbound(), a_to_b);
    }
}
