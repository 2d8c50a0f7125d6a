use std::num::NonZeroUsize;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{
    HeadlessReport, PlaybackController, PlaybackState, PlayerInput, ProgressRatio, SceneTimer,
    TimerCommand, TransitionKind, animated_progress, counter_label, map_key_event, run_headless,
};
use crate::args::test_support::parse_test_args;
use crate::error::{AppError, AppResult};
use crate::scene::{Scene, SceneSequence, passport_to_nowhere};
use crate::shutdown::shutdown_channel;

fn sequence(durations: &[u64]) -> AppResult<SceneSequence> {
    let scenes = durations
        .iter()
        .enumerate()
        .map(|(index, duration)| {
            Scene::new(
                &format!("scene-{}", index),
                *duration,
                "scene-test",
                "Somewhere",
                "Something happens.",
            )
        })
        .collect();
    Ok(SceneSequence::new(scenes)?)
}

fn fire(controller: &mut PlaybackController) -> AppResult<TransitionKind> {
    let token = controller
        .lease()
        .ok_or_else(|| AppError::validation("Expected an armed lease"))?;
    Ok(controller.on_timer_fired(token).kind)
}

fn paused_runtime() -> AppResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()?)
}

fn len(value: usize) -> AppResult<NonZeroUsize> {
    NonZeroUsize::new(value).ok_or_else(|| AppError::validation("Expected non-zero length"))
}

#[test]
fn start_arms_first_scene_duration() -> AppResult<()> {
    let mut controller = PlaybackController::new(passport_to_nowhere()?);
    let transition = controller.start();
    match transition.command {
        TimerCommand::Arm { token, delay } => {
            if delay != Duration::from_millis(6500) {
                return Err(AppError::validation(format!("Unexpected delay: {:?}", delay)));
            }
            if controller.lease() != Some(token) {
                return Err(AppError::validation("Armed token is not the lease"));
            }
        }
        TimerCommand::Cancel | TimerCommand::Keep => {
            return Err(AppError::validation("Expected start to arm the timer"));
        }
    }
    if controller.state() != PlaybackState::INITIAL || controller.pending_timers() != 1 {
        return Err(AppError::validation("Unexpected state after start"));
    }
    Ok(())
}

#[test]
fn fire_advances_and_rearms_with_next_duration() -> AppResult<()> {
    let mut controller = PlaybackController::new(sequence(&[100, 250, 400])?);
    controller.start();
    let token = controller
        .lease()
        .ok_or_else(|| AppError::validation("Missing lease"))?;
    let transition = controller.on_timer_fired(token);
    if transition.kind != TransitionKind::Advanced {
        return Err(AppError::validation("Expected advance"));
    }
    match transition.command {
        TimerCommand::Arm { delay, .. } if delay == Duration::from_millis(250) => {}
        TimerCommand::Arm { .. } | TimerCommand::Cancel | TimerCommand::Keep => {
            return Err(AppError::validation("Expected re-arm with 250ms"));
        }
    }
    let expected = PlaybackState {
        index: 1,
        playing: true,
    };
    if controller.state() != expected {
        return Err(AppError::validation(format!(
            "Unexpected state: {:?}",
            controller.state()
        )));
    }
    Ok(())
}

#[test]
fn last_scene_fire_finishes_without_timer() -> AppResult<()> {
    let mut controller = PlaybackController::new(sequence(&[100, 100])?);
    controller.start();
    fire(&mut controller)?;
    let token = controller
        .lease()
        .ok_or_else(|| AppError::validation("Missing lease"))?;
    let transition = controller.on_timer_fired(token);
    if transition.kind != TransitionKind::Finished
        || transition.command != TimerCommand::Cancel
    {
        return Err(AppError::validation("Expected finish with cancel"));
    }
    if controller.state().index != 1 || controller.is_playing() {
        return Err(AppError::validation("Expected terminal state (1, false)"));
    }
    if controller.pending_timers() != 0 || controller.progress_ratio() != ProgressRatio::COMPLETE
    {
        return Err(AppError::validation("Terminal state must be idle and complete"));
    }
    Ok(())
}

#[test]
fn five_scene_story_finishes_after_five_fires() -> AppResult<()> {
    let mut controller = PlaybackController::new(passport_to_nowhere()?);
    controller.start();
    let mut advances = 0usize;
    let mut last_progress = controller.progress_ratio();
    for _ in 0..5 {
        if fire(&mut controller)? == TransitionKind::Advanced {
            advances = advances.saturating_add(1);
        }
        let progress = controller.progress_ratio();
        if progress < last_progress {
            return Err(AppError::validation("Progress must not decrease"));
        }
        last_progress = progress;
    }
    if advances != 4 {
        return Err(AppError::validation(format!(
            "Expected 4 advances, got {}",
            advances
        )));
    }
    let expected = PlaybackState {
        index: 4,
        playing: false,
    };
    if controller.state() != expected {
        return Err(AppError::validation("Expected terminal state (4, false)"));
    }
    if controller.counter_label() != "05 / 05" {
        return Err(AppError::validation("Unexpected terminal counter"));
    }
    Ok(())
}

#[test]
fn replay_from_any_state_restarts_with_one_timer() -> AppResult<()> {
    let durations = [6500, 5200, 5200, 5200, 6400];
    for fires in 0..=5 {
        let mut controller = PlaybackController::new(sequence(&durations)?);
        controller.start();
        for _ in 0..fires {
            fire(&mut controller)?;
        }
        let transition = controller.replay();
        if transition.kind != TransitionKind::Replayed {
            return Err(AppError::validation("Expected replay transition"));
        }
        match transition.command {
            TimerCommand::Arm { delay, .. } if delay == Duration::from_millis(6500) => {}
            TimerCommand::Arm { .. } | TimerCommand::Cancel | TimerCommand::Keep => {
                return Err(AppError::validation("Replay must arm the first duration"));
            }
        }
        if controller.state() != PlaybackState::INITIAL || controller.pending_timers() != 1 {
            return Err(AppError::validation(format!(
                "Unexpected state after replay from {} fires",
                fires
            )));
        }
        if controller.progress_ratio() != ProgressRatio::new(1, 5) {
            return Err(AppError::validation("Progress must reset to 1/len"));
        }
        if controller.counter_label() != "01 / 05" {
            return Err(AppError::validation("Counter must reset to 01 / 05"));
        }
    }
    Ok(())
}

#[test]
fn stale_token_is_ignored_after_replay() -> AppResult<()> {
    let mut controller = PlaybackController::new(sequence(&[100, 100, 100])?);
    controller.start();
    let stale = controller
        .lease()
        .ok_or_else(|| AppError::validation("Missing lease"))?;
    controller.replay();
    let transition = controller.on_timer_fired(stale);
    if transition.kind != TransitionKind::Ignored || transition.command != TimerCommand::Keep {
        return Err(AppError::validation("Stale fire must be ignored"));
    }
    if controller.state() != PlaybackState::INITIAL || controller.pending_timers() != 1 {
        return Err(AppError::validation("Stale fire must not change state"));
    }
    Ok(())
}

#[test]
fn pending_timers_never_exceed_one() -> AppResult<()> {
    let mut controller = PlaybackController::new(sequence(&[10, 20, 30, 40])?);
    controller.start();
    let ops = [0u8, 1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0];
    for op in ops {
        if op == 0 {
            if controller.lease().is_some() {
                fire(&mut controller)?;
            }
        } else {
            controller.replay();
        }
        if controller.pending_timers() > 1 {
            return Err(AppError::validation("More than one pending timer"));
        }
        if controller.is_playing() != (controller.pending_timers() == 1) {
            return Err(AppError::validation("Lease must exist exactly while playing"));
        }
    }
    Ok(())
}

#[test]
fn teardown_cancels_and_resets() -> AppResult<()> {
    let mut controller = PlaybackController::new(sequence(&[100, 100])?);
    controller.start();
    fire(&mut controller)?;
    let transition = controller.teardown();
    if transition.command != TimerCommand::Cancel || controller.pending_timers() != 0 {
        return Err(AppError::validation("Teardown must cancel the lease"));
    }
    if controller.index() != 0 {
        return Err(AppError::validation("Teardown must reset the index"));
    }
    Ok(())
}

#[test]
fn counter_pads_both_sides() -> AppResult<()> {
    if counter_label(8, len(10)?) != "09 / 10" {
        return Err(AppError::validation("Expected 09 / 10"));
    }
    if counter_label(0, len(5)?) != "01 / 05" {
        return Err(AppError::validation("Expected 01 / 05"));
    }
    if counter_label(11, len(12)?) != "12 / 12" {
        return Err(AppError::validation("Expected 12 / 12"));
    }
    Ok(())
}

#[test]
fn animated_progress_moves_between_scene_bounds() -> AppResult<()> {
    let total = len(5)?;
    let duration = Duration::from_millis(5200);
    let start = animated_progress(2, total, Duration::ZERO, duration);
    if start != ProgressRatio::new(2, 5) {
        return Err(AppError::validation("Expected 2/5 at scene start"));
    }
    let midway = animated_progress(2, total, Duration::from_millis(2600), duration);
    if midway != ProgressRatio::new(5, 10) {
        return Err(AppError::validation("Expected 1/2 halfway through scene 3"));
    }
    let overrun = animated_progress(2, total, Duration::from_secs(60), duration);
    if overrun != ProgressRatio::new(3, 5) {
        return Err(AppError::validation("Expected progress to hold at 3/5"));
    }
    if ProgressRatio::new(7, 5) != ProgressRatio::COMPLETE {
        return Err(AppError::validation("Ratios above one must clamp"));
    }
    if ProgressRatio::new(3, 0) != ProgressRatio::ZERO {
        return Err(AppError::validation("Zero denominator must be empty"));
    }
    Ok(())
}

#[test]
fn scene_start_progress_counts_only_finished_scenes() -> AppResult<()> {
    let total = len(5)?;
    for index in 0..5 {
        let start = animated_progress(index, total, Duration::ZERO, Duration::from_millis(5200));
        if start != ProgressRatio::before_scene(index, total) {
            return Err(AppError::validation(format!(
                "Unexpected start progress for scene {}",
                index
            )));
        }
        if start >= ProgressRatio::through_scene(index, total) {
            return Err(AppError::validation("Start must lie below the scene target"));
        }
    }
    Ok(())
}

#[test]
fn timer_fires_latest_armed_token_only() -> AppResult<()> {
    let runtime = paused_runtime()?;
    runtime.block_on(async {
        let mut controller = PlaybackController::new(sequence(&[1_000, 1_000])?);
        let mut timer = SceneTimer::new(1);
        timer.apply(controller.start().command);
        let first = timer.armed_token();
        timer.apply(controller.replay().command);
        let second = timer.armed_token();
        if first == second || second != controller.lease() {
            return Err(AppError::validation("Re-arming must replace the token"));
        }

        let fired = timer.fired().await;
        if Some(fired) != second || timer.is_armed() {
            return Err(AppError::validation("Expected only the latest token to fire"));
        }

        timer.apply(controller.on_timer_fired(fired).command);
        timer.apply(TimerCommand::Cancel);
        let idle = tokio::time::timeout(Duration::from_secs(60), timer.fired()).await;
        if idle.is_ok() {
            return Err(AppError::validation("Cancelled timer must not fire"));
        }
        Ok(())
    })
}

#[test]
fn timer_speed_shortens_deadlines() -> AppResult<()> {
    let runtime = paused_runtime()?;
    runtime.block_on(async {
        let mut controller = PlaybackController::new(sequence(&[6_500])?);
        let mut timer = SceneTimer::new(10);
        let started = tokio::time::Instant::now();
        timer.apply(controller.start().command);
        let deadline = timer
            .deadline()
            .ok_or_else(|| AppError::validation("Expected a deadline"))?;
        if deadline.duration_since(started) != Duration::from_millis(650) {
            return Err(AppError::validation("Expected 650ms deadline at 10x"));
        }
        if timer.scene_time(Duration::from_millis(100)) != Duration::from_secs(1) {
            return Err(AppError::validation("Expected scene time to scale"));
        }
        Ok(())
    })
}

#[test]
fn headless_plays_story_once() -> AppResult<()> {
    let runtime = paused_runtime()?;
    let report: HeadlessReport = runtime.block_on(async {
        let args = parse_test_args(["storyreel", "--no-tui"])?;
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();
        let mut out = Vec::new();
        let report = run_headless(&args, passport_to_nowhere()?, &mut out, &mut shutdown_rx).await?;
        let text = String::from_utf8_lossy(&out).into_owned();
        for expected in ["Passport to Nowhere", "[01 / 05]", "[05 / 05]", "-- fin --"] {
            if !text.contains(expected) {
                return Err(AppError::validation(format!("Missing {:?} in output", expected)));
            }
        }
        Ok::<_, AppError>(report)
    })?;

    if report.advances != 4 || report.finishes != 1 || report.replays != 0 {
        return Err(AppError::validation(format!("Unexpected report: {:?}", report)));
    }
    let expected = PlaybackState {
        index: 4,
        playing: false,
    };
    if report.final_state != expected {
        return Err(AppError::validation("Expected terminal final state"));
    }
    Ok(())
}

#[test]
fn headless_replays_from_terminal_state() -> AppResult<()> {
    let runtime = paused_runtime()?;
    let (report, text) = runtime.block_on(async {
        let args = parse_test_args(["storyreel", "--no-tui", "--replays", "1", "--speed", "100"])?;
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();
        let mut out = Vec::new();
        let report = run_headless(&args, passport_to_nowhere()?, &mut out, &mut shutdown_rx).await?;
        Ok::<_, AppError>((report, String::from_utf8_lossy(&out).into_owned()))
    })?;

    if report.advances != 8 || report.finishes != 2 || report.replays != 1 {
        return Err(AppError::validation(format!("Unexpected report: {:?}", report)));
    }
    if text.matches("-- fin --").count() != 2 || text.matches("[01 / 05]").count() != 2 {
        return Err(AppError::validation("Expected two full playthroughs"));
    }
    Ok(())
}

#[test]
fn headless_stops_on_shutdown() -> AppResult<()> {
    let runtime = paused_runtime()?;
    let report = runtime.block_on(async {
        let args = parse_test_args(["storyreel", "--no-tui"])?;
        let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
        if shutdown_tx.send(()).is_err() {
            return Err(AppError::validation("Failed to send shutdown"));
        }
        let mut out = Vec::new();
        run_headless(&args, passport_to_nowhere()?, &mut out, &mut shutdown_rx).await
    })?;
    if report.advances != 0 || report.finishes != 0 {
        return Err(AppError::validation("Expected shutdown before any transition"));
    }
    Ok(())
}

#[test]
fn keys_map_to_player_input() -> AppResult<()> {
    let cases = [
        (KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE), Some(PlayerInput::Replay)),
        (KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), Some(PlayerInput::Replay)),
        (KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE), Some(PlayerInput::Quit)),
        (KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), Some(PlayerInput::Quit)),
        (KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(PlayerInput::Quit)),
        (KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE), None),
    ];
    for (event, expected) in cases {
        if map_key_event(&event) != expected {
            return Err(AppError::validation(format!("Unexpected mapping for {:?}", event)));
        }
    }
    let mut release = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    if map_key_event(&release).is_some() {
        return Err(AppError::validation("Key releases must be ignored"));
    }
    Ok(())
}
