use std::time::Duration;

use crate::scene::{Scene, SceneSequence};

use super::progress::{ProgressRatio, counter_label};

/// Generation number of an armed scene timer. Only the most recently leased
/// token may advance playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// What the scene timer must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Replace any pending deadline with a new one.
    Arm { token: TimerToken, delay: Duration },
    /// Drop any pending deadline.
    Cancel,
    /// Leave the timer as it is.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Started,
    Advanced,
    Finished,
    Replayed,
    TornDown,
    /// A timer fired for a lease that is no longer current.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub command: TimerCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub index: usize,
    pub playing: bool,
}

impl PlaybackState {
    pub const INITIAL: Self = Self {
        index: 0,
        playing: true,
    };
}

/// Auto-advancing scene state machine.
///
/// States are `(index, playing)` pairs. A timer fire moves `(i, true)` to
/// `(i + 1, true)`, or to `(last, false)` on the last scene. Replay moves any
/// state to `(0, true)`. Every transition reports the single timer command it
/// needs, and at most one timer lease is outstanding at a time.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    scenes: SceneSequence,
    state: PlaybackState,
    lease: Option<TimerToken>,
    next_token: u64,
}

impl PlaybackController {
    #[must_use]
    pub const fn new(scenes: SceneSequence) -> Self {
        Self {
            scenes,
            state: PlaybackState::INITIAL,
            lease: None,
            next_token: 0,
        }
    }

    /// Arms the timer for the current state, or cancels it when playback has
    /// stopped.
    pub fn start(&mut self) -> Transition {
        let command = self.arm_for_current();
        tracing::debug!(
            "Playback started at scene {} ({})",
            self.state.index,
            self.current_scene().id
        );
        Transition {
            kind: TransitionKind::Started,
            command,
        }
    }

    /// Handles expiry of the timer armed with `token`.
    pub fn on_timer_fired(&mut self, token: TimerToken) -> Transition {
        if self.lease != Some(token) {
            tracing::warn!("Ignoring stale scene timer {}", token.get());
            return Transition {
                kind: TransitionKind::Ignored,
                command: TimerCommand::Keep,
            };
        }
        self.lease = None;

        if self.state.index < self.scenes.last_index() {
            self.state.index = self.state.index.saturating_add(1);
            let command = self.arm_for_current();
            tracing::debug!(
                "Advanced to scene {} ({})",
                self.state.index,
                self.current_scene().id
            );
            return Transition {
                kind: TransitionKind::Advanced,
                command,
            };
        }

        self.state.playing = false;
        tracing::info!("Playback finished after {} scenes", self.scenes.len());
        Transition {
            kind: TransitionKind::Finished,
            command: TimerCommand::Cancel,
        }
    }

    /// Restarts from the first scene, from any state.
    pub fn replay(&mut self) -> Transition {
        self.state = PlaybackState::INITIAL;
        let command = self.arm_for_current();
        tracing::debug!("Replaying from scene 0 ({})", self.current_scene().id);
        Transition {
            kind: TransitionKind::Replayed,
            command,
        }
    }

    /// Releases the timer and resets to the initial state without arming.
    pub fn teardown(&mut self) -> Transition {
        self.lease = None;
        self.state = PlaybackState::INITIAL;
        Transition {
            kind: TransitionKind::TornDown,
            command: TimerCommand::Cancel,
        }
    }

    fn arm_for_current(&mut self) -> TimerCommand {
        if !self.state.playing {
            self.lease = None;
            return TimerCommand::Cancel;
        }
        let token = TimerToken(self.next_token);
        self.next_token = self.next_token.saturating_add(1);
        self.lease = Some(token);
        TimerCommand::Arm {
            token,
            delay: self.current_scene().duration(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.state.index
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.state.playing
    }

    #[must_use]
    pub const fn scenes(&self) -> &SceneSequence {
        &self.scenes
    }

    #[must_use]
    pub fn current_scene(&self) -> &Scene {
        self.scenes
            .get(self.state.index)
            .unwrap_or_else(|| self.scenes.first())
    }

    /// Number of outstanding timer leases, always 0 or 1.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        usize::from(self.lease.is_some())
    }

    #[must_use]
    pub const fn lease(&self) -> Option<TimerToken> {
        self.lease
    }

    #[must_use]
    pub fn progress_ratio(&self) -> ProgressRatio {
        ProgressRatio::through_scene(self.state.index, self.scenes.len())
    }

    #[must_use]
    pub fn counter_label(&self) -> String {
        counter_label(self.state.index, self.scenes.len())
    }
}
