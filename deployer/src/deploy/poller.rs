//! Bounded polling

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::errors::DeployError;
use crate::settings::PollingSettings;

/// Attempt budget and spacing for a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Checks allowed, the first one included
    pub max_attempts: u32,

    /// Pause between consecutive checks
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_secs(2),
        }
    }
}

impl From<&PollingSettings> for PollOptions {
    fn from(settings: &PollingSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            interval: Duration::from_secs(settings.interval_secs),
        }
    }
}

/// Call `check` until it yields a value or the attempt budget runs out.
///
/// The first check runs immediately and `sleep_fn(interval)` separates each
/// following one, so `max_attempts` checks incur `max_attempts - 1` waits. An
/// error from `check` is returned at once. Exhausting the budget yields
/// [`DeployError::PollTimeout`].
pub async fn poll<T, C, CF, S, SF>(
    condition: &str,
    options: &PollOptions,
    mut check: C,
    sleep_fn: S,
) -> Result<T, DeployError>
where
    C: FnMut() -> CF,
    CF: Future<Output = Result<Option<T>, DeployError>>,
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    for attempt in 1..=options.max_attempts {
        if attempt > 1 {
            sleep_fn(options.interval).await;
        }

        debug!("Checking {} (attempt {}/{})", condition, attempt, options.max_attempts);
        if let Some(value) = check().await? {
            return Ok(value);
        }
    }

    warn!("Gave up on {} after {} attempts", condition, options.max_attempts);
    Err(DeployError::PollTimeout {
        condition: condition.to_string(),
        attempts: options.max_attempts,
    })
}
