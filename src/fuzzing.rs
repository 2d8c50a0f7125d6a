use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{PlayerArgs, PositiveU64};
use crate::config::apply_config;
use crate::config::types::ConfigFile;
use crate::error::{AppError, AppResult, ValidationError};
use crate::playback::{PlaybackController, PlaybackState, TimerCommand};
use crate::scene::{Scene, SceneSequence};

thread_local! {
    static BASE_MATCHES: ArgMatches = PlayerArgs::command().get_matches_from(["storyreel"]);
}

/// Parses a positive u64 string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_u64_input(input: &str) -> AppResult<u64> {
    let value: PositiveU64 = input.parse()?;
    Ok(value.get())
}

/// Parses TOML config and applies it to default arguments.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<()> {
    let config: ConfigFile = toml::from_str(input)?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config and applies it to default arguments.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<()> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    apply_config_to_defaults(&config)
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<()> {
    BASE_MATCHES.with(|matches| {
        let mut args = PlayerArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)
    })
}

/// Drives a controller built from `durations` through `ops` and checks the
/// state machine invariants after every step. Even op bytes fire the current
/// timer, odd bytes divisible by 3 fire a stale token, the rest replay.
///
/// # Errors
///
/// Returns an error when the sequence is invalid or an invariant breaks.
pub fn run_playback_ops(durations: &[u64], ops: &[u8]) -> AppResult<PlaybackState> {
    let scenes: Vec<Scene> = durations
        .iter()
        .enumerate()
        .map(|(index, duration)| {
            let id = format!("scene-{}", index);
            Scene::new(&id, *duration, "scene-porch", "Porch", "Rocking chair")
        })
        .collect();
    let sequence = SceneSequence::new(scenes)?;
    let last_index = sequence.last_index();
    let mut controller = PlaybackController::new(sequence);
    let mut stale = None;
    let started = controller.start().command;
    check_command(&controller, started)?;

    for op in ops {
        let before = controller.state();
        let command = if op.checked_rem(2) == Some(0) {
            match controller.lease() {
                Some(token) => {
                    stale = Some(token);
                    controller.on_timer_fired(token).command
                }
                None => TimerCommand::Keep,
            }
        } else if op.checked_rem(3) == Some(0) {
            match stale {
                Some(token) => controller.on_timer_fired(token).command,
                None => TimerCommand::Keep,
            }
        } else {
            controller.replay().command
        };
        check_command(&controller, command)?;

        let after = controller.state();
        if after.index > last_index {
            return Err(invariant("index out of range"));
        }
        if !before.playing && after.playing && after.index != 0 {
            return Err(invariant("resumed away from the first scene"));
        }
    }

    Ok(controller.state())
}

fn check_command(controller: &PlaybackController, command: TimerCommand) -> AppResult<()> {
    if controller.pending_timers() > 1 {
        return Err(invariant("more than one pending timer"));
    }
    match command {
        TimerCommand::Arm { token, delay } => {
            if controller.lease() != Some(token) {
                return Err(invariant("armed token is not the current lease"));
            }
            if delay != controller.current_scene().duration() {
                return Err(invariant("armed delay differs from the scene duration"));
            }
        }
        TimerCommand::Cancel => {
            if controller.pending_timers() != 0 {
                return Err(invariant("cancel left a lease behind"));
            }
        }
        TimerCommand::Keep => {}
    }
    Ok(())
}

fn invariant(message: &str) -> AppError {
    AppError::validation(ValidationError::Invariant {
        message: message.to_owned(),
    })
}
