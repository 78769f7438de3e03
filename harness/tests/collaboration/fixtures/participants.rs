//! Participant registries with the platform mocks the chat flows need.

use flowlink_harness::prelude::*;

pub const ALICE: &str = "CN=Alice, O=Alice Corp, L=LDN, C=GB";
pub const BOB: &str = "CN=Bob, O=Bob Corp, L=LDN, C=GB";

pub fn member(name: &str) -> MemberName {
    MemberName::parse(name).expect("fixture member name must parse")
}

/// Registry holding every mock the chat flows use, stubbed with `name`.
pub fn full_participant(name: &str) -> MockServiceRegistry {
    let registry = MockServiceRegistry::builder(name)
        .capability::<MockFlowEngine>()
        .capability::<MockFlowMessaging>()
        .capability::<MockJsonMarshalling>()
        .capability::<MockPersistence>()
        .build();
    registry
        .get::<MockFlowEngine>()
        .expect("engine registered")
        .set_virtual_node_name(member(name));
    registry
}

/// Registry with only what a responding flow needs: engine and persistence.
pub fn responder_participant(name: &str) -> MockServiceRegistry {
    let registry = MockServiceRegistry::builder(name)
        .capability::<MockFlowEngine>()
        .capability::<MockPersistence>()
        .build();
    registry
        .get::<MockFlowEngine>()
        .expect("engine registered")
        .set_virtual_node_name(member(name));
    registry
}
