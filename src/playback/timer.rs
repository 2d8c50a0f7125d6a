use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep, sleep};

use super::controller::{TimerCommand, TimerToken};

/// Shortest deadline a scaled scene delay can collapse to.
const MIN_SCALED_DELAY: Duration = Duration::from_millis(1);

/// Single-slot scene timer driven by [`TimerCommand`]s.
///
/// Arming replaces the pending deadline, so two deadlines never coexist.
/// Dropping the timer drops the pending deadline with it.
#[derive(Debug)]
pub struct SceneTimer {
    slot: Option<(TimerToken, Pin<Box<Sleep>>)>,
    speed: u64,
}

impl SceneTimer {
    /// Creates an idle timer that runs scene delays `speed` times faster.
    #[must_use]
    pub fn new(speed: u64) -> Self {
        Self {
            slot: None,
            speed: speed.max(1),
        }
    }

    pub fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Arm { token, delay } => {
                let scaled = self.scale(delay);
                tracing::debug!("Arming scene timer {} for {:?}", token.get(), scaled);
                self.slot = Some((token, Box::pin(sleep(scaled))));
            }
            TimerCommand::Cancel => {
                if let Some((token, _)) = self.slot.take() {
                    tracing::debug!("Cancelled scene timer {}", token.get());
                }
            }
            TimerCommand::Keep => {}
        }
    }

    /// Resolves with the token of the armed deadline once it elapses. Pends
    /// forever while idle. Dropping the future leaves the deadline armed.
    pub async fn fired(&mut self) -> TimerToken {
        if let Some((token, deadline)) = self.slot.as_mut() {
            deadline.as_mut().await;
            let fired = *token;
            self.slot = None;
            return fired;
        }
        std::future::pending::<TimerToken>().await
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.slot.is_some()
    }

    #[must_use]
    pub fn armed_token(&self) -> Option<TimerToken> {
        self.slot.as_ref().map(|(token, _)| *token)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.slot.as_ref().map(|(_, deadline)| deadline.deadline())
    }

    /// Scene time elapsed per wall-clock `elapsed` at this timer's speed.
    #[must_use]
    pub fn scene_time(&self, elapsed: Duration) -> Duration {
        elapsed.saturating_mul(u32::try_from(self.speed).unwrap_or(u32::MAX))
    }

    fn scale(&self, delay: Duration) -> Duration {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let scaled = millis.checked_div(self.speed).unwrap_or(millis);
        Duration::from_millis(scaled).max(MIN_SCALED_DELAY)
    }
}
