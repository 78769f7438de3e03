//! Concurrent execution driver for collaborating flows.
//!
//! Every participant runs on its own tokio task, so a participant suspended in
//! `receive` can be woken by a send from another one. The driver returns once
//! every participant has settled, or fails the run when the configured bound
//! is exceeded instead of hanging the test process.

use crate::config::DriverConfig;
use crate::error::{HarnessError, Result};
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use std::any::Any;
use std::future::Future;
use std::time::Duration;
use tokio::task::{AbortHandle, JoinError};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Boxed participant body
pub type ParticipantFuture = BoxFuture<'static, Result<()>>;

/// Runs two or more participants in parallel and waits for all of them.
///
/// # Example
///
/// ```ignore
/// ConcurrentDriver::new(DriverConfig::FAST)
///     .participant("outgoing", async move { outgoing.call(request).await.map(drop) })
///     .participant("incoming", async move { incoming.call(session).await })
///     .run()
///     .await?;
/// ```
pub struct ConcurrentDriver {
    config: DriverConfig,
    participants: Vec<(String, ParticipantFuture)>,
}

impl Default for ConcurrentDriver {
    fn default() -> Self {
        Self::new(DriverConfig::DEFAULT)
    }
}

impl ConcurrentDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            participants: Vec::new(),
        }
    }

    /// Add a named participant.
    pub fn participant<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        self.participants.push((name.into(), body.boxed()));
        self
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run all participants to completion.
    ///
    /// Returns the first [`HarnessError::ParticipantFailed`] if any participant
    /// failed or panicked, otherwise [`HarnessError::ParticipantDeadlock`] if
    /// any participant was still running at the deadline. Once a participant
    /// fails, the rest get at most `failure_grace` before they are aborted.
    pub async fn run(self) -> Result<()> {
        if self.participants.len() < 2 {
            return Err(HarnessError::InvalidConfiguration(format!(
                "concurrent execution needs at least two participants, got {}",
                self.participants.len()
            )));
        }

        let timeout = self.config.timeout;
        let failure_grace = self.config.failure_grace;
        let mut deadline = deadline_after(timeout);

        let mut running = Vec::with_capacity(self.participants.len());
        let mut pending = FuturesUnordered::new();
        for (index, (name, body)) in self.participants.into_iter().enumerate() {
            debug!(participant = %name, "Starting participant");
            let handle = tokio::spawn(body);
            running.push(RunningParticipant {
                name,
                abort: handle.abort_handle(),
                settled: false,
            });
            pending.push(handle.map(move |joined| (index, joined)));
        }

        let mut failures = Vec::new();
        loop {
            let next = match tokio::time::timeout_at(deadline, pending.next()).await {
                Ok(Some(next)) => next,
                // All settled, or the deadline passed
                Ok(None) | Err(_) => break,
            };
            let (index, joined) = next;
            let participant = &mut running[index];
            participant.settled = true;

            let error = match joined {
                Ok(Ok(())) => {
                    debug!(participant = %participant.name, "Participant completed");
                    continue;
                }
                Ok(Err(e)) => e,
                Err(join_error) => HarnessError::Panicked(describe_join_error(join_error)),
            };

            warn!(participant = %participant.name, error = %error, "Participant failed");
            failures.push(HarnessError::ParticipantFailed {
                participant: participant.name.clone(),
                source: Box::new(error),
            });
            deadline = deadline.min(deadline_after(failure_grace));
        }

        let stuck: Vec<String> = running
            .iter()
            .filter(|p| !p.settled)
            .map(|p| {
                p.abort.abort();
                p.name.clone()
            })
            .collect();

        if !stuck.is_empty() {
            warn!(participants = ?stuck, ?timeout, "Aborted participants that did not complete");
        }

        let mut failures = failures.into_iter();
        if let Some(first) = failures.next() {
            for other in failures {
                warn!(error = %other, "Additional participant failure");
            }
            return Err(first);
        }
        if !stuck.is_empty() {
            return Err(HarnessError::ParticipantDeadlock {
                participants: stuck,
                timeout,
            });
        }

        info!(participants = running.len(), "All participants completed");
        Ok(())
    }
}

/// Stand-in deadline for bounds that do not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

fn deadline_after(bound: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(bound).unwrap_or(now + FAR_FUTURE)
}

struct RunningParticipant {
    name: String,
    abort: AbortHandle,
    settled: bool,
}

fn describe_join_error(error: JoinError) -> String {
    if error.is_cancelled() {
        return "task was cancelled".to_string();
    }
    match error.try_into_panic() {
        Ok(panic) => panic_message(panic),
        Err(error) => error.to_string(),
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(message) => message.to_string(),
            Err(_) => "non-string panic payload".to_string(),
        },
    }
}

/// Run unnamed participants with the default configuration.
///
/// Participants are named `participant-0`, `participant-1`, ... in errors.
pub async fn execute_concurrently<I>(participants: I) -> Result<()>
where
    I: IntoIterator<Item = ParticipantFuture>,
{
    participants
        .into_iter()
        .enumerate()
        .fold(ConcurrentDriver::default(), |driver, (index, body)| {
            driver.participant(format!("participant-{}", index), body)
        })
        .run()
        .await
}
