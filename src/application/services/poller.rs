use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Retry budget for one polling run. Comes from configuration and can be
/// overridden per call; the defaults give a worst-case latency budget of
/// 80 x 5s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 80,
            interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError<S: std::fmt::Debug> {
    #[error("terminal failure status {status:?} after {attempts} checks")]
    Failed { status: S, attempts: u32 },
    #[error("no terminal status after {attempts} checks")]
    TimedOut { attempts: u32 },
    #[error("polling cancelled")]
    Cancelled,
}

/// Poll `check` until it yields a status in `terminal` (success) or in
/// `failure` (immediate failure), waiting `policy.interval` between
/// attempts, for at most `policy.max_attempts` checks.
///
/// A check that errors is treated as a non-terminal observation and retried
/// on the next attempt; nothing outside this loop retries status checks.
/// The inter-attempt wait is a cooperative sleep and races against `cancel`,
/// so a cancelled request stops waiting immediately. No check is ever made
/// beyond the attempt budget, and success is never returned without a
/// decisive terminal status.
pub async fn poll_until<S, E, F, Fut>(
    mut check: F,
    terminal: &[S],
    failure: &[S],
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<S, PollError<S>>
where
    S: PartialEq + std::fmt::Debug,
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<S, E>>,
{
    let mut attempts = 0;

    while attempts < policy.max_attempts {
        if cancel.is_cancelled() {
            return Err(PollError::Cancelled);
        }
        attempts += 1;

        match check().await {
            Ok(status) => {
                if terminal.contains(&status) {
                    return Ok(status);
                }
                if failure.contains(&status) {
                    return Err(PollError::Failed { status, attempts });
                }
                tracing::debug!(attempt = attempts, status = ?status, "Status not terminal yet");
            }
            Err(e) => {
                tracing::warn!(attempt = attempts, error = %e, "Status check failed, retrying");
            }
        }

        if attempts < policy.max_attempts {
            tokio::select! {
                _ = cancel.cancelled() => return Err(PollError::Cancelled),
                _ = tokio::time::sleep(policy.interval) => {}
            }
        }
    }

    Err(PollError::TimedOut { attempts })
}
