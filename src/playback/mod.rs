//! Scene advancement: the controller state machine, its timer, derived
//! progress values, and the loops that drive them.
mod controller;
mod input;
mod progress;
mod runner;
mod timer;

#[cfg(test)]
mod tests;

pub use controller::{
    PlaybackController, PlaybackState, TimerCommand, TimerToken, Transition, TransitionKind,
};
pub use input::{PlayerInput, map_key_event};
pub use progress::{ProgressRatio, animated_progress, counter_label};
pub use runner::{HeadlessReport, run_headless, run_player, uses_terminal_ui};
pub use timer::SceneTimer;
