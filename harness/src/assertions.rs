//! Assert helpers for collaboration tests.

use crate::error::{HarnessError, Result};
use crate::link::MockMessageLink;

/// Assert that a driven run completed for every participant.
///
/// # Panics
///
/// Panics if the result is an error.
pub fn assert_participants_completed(result: &Result<()>) {
    if let Err(e) = result {
        panic!(
            "Expected all participants to complete successfully, but got error: {}",
            e
        );
    }
}

/// Assert that `participant` failed with an error whose message contains
/// `expected_error_contains`.
///
/// # Panics
///
/// Panics if the run succeeded, failed for another reason, or the error
/// message doesn't contain the expected text.
pub fn assert_participant_failed_with(
    result: &Result<()>,
    participant: &str,
    expected_error_contains: &str,
) {
    match result {
        Ok(()) => panic!(
            "Expected participant '{}' to fail with error containing '{}', but the run succeeded",
            participant, expected_error_contains
        ),
        Err(HarnessError::ParticipantFailed {
            participant: actual,
            source,
        }) => {
            if actual != participant {
                panic!(
                    "Expected participant '{}' to fail, but '{}' failed: {}",
                    participant, actual, source
                );
            }
            let error_msg = source.to_string();
            if !error_msg.contains(expected_error_contains) {
                panic!(
                    "Expected error to contain '{}', but got: {}",
                    expected_error_contains, error_msg
                );
            }
        }
        Err(e) => panic!(
            "Expected participant '{}' to fail, but got different error: {}",
            participant, e
        ),
    }
}

/// Assert that the run was stopped because `participant` never completed.
///
/// # Panics
///
/// Panics if the result is not a deadlock that includes `participant`.
pub fn assert_deadlocked(result: &Result<()>, participant: &str) {
    match result {
        Err(HarnessError::ParticipantDeadlock { participants, .. })
            if participants.iter().any(|p| p == participant) => {}
        Err(e) => panic!(
            "Expected participant '{}' to deadlock, but got different error: {}",
            participant, e
        ),
        Ok(()) => panic!(
            "Expected participant '{}' to deadlock, but the run succeeded",
            participant
        ),
    }
}

/// Assert that every message sent over `link` was received.
///
/// # Panics
///
/// Panics with the queued payload types if messages are pending.
pub fn assert_no_pending_messages(link: &MockMessageLink) {
    if let Err(e) = link.fail_if_pending_messages() {
        panic!("{}: {:?}", e, link.pending_types());
    }
}
