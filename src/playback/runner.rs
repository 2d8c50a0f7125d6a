use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};

use crate::args::PlayerArgs;
use crate::error::AppResult;
use crate::scene::{STORY_KICKER, STORY_TITLE, SceneSequence};
use crate::shutdown::{ShutdownReceiver, shutdown_channel};
use crate::shutdown_handlers::{setup_keyboard_input_handler, setup_signal_shutdown_handler};
use crate::ui::model::UiData;
use crate::ui::render::{run_splash_screen, scene_text_lines, setup_render_ui};

use super::controller::{PlaybackController, PlaybackState, TransitionKind};
use super::input::PlayerInput;
use super::timer::SceneTimer;

/// Fallback refresh period when the requested frame rate is unusable.
const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(50);
const MS_PER_SEC: u64 = 1_000;

/// Counts of the transitions a headless run went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessReport {
    pub advances: usize,
    pub finishes: usize,
    pub replays: usize,
    pub final_state: PlaybackState,
}

/// True when playback will take over the terminal instead of printing text.
#[must_use]
pub fn uses_terminal_ui(args: &PlayerArgs) -> bool {
    !args.no_ui && io::stdout().is_terminal()
}

/// Plays `scenes` in the terminal UI when stdout is a TTY, otherwise as text.
///
/// # Errors
///
/// Returns an error when the terminal cannot be set up or output fails.
pub async fn run_player(args: &PlayerArgs, scenes: SceneSequence) -> AppResult<()> {
    if !uses_terminal_ui(args) {
        let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
        let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
        let mut stdout = io::stdout();
        let result = run_headless(args, scenes, &mut stdout, &mut shutdown_rx).await;
        drop(shutdown_tx.send(()));
        if let Err(err) = signal_handle.await {
            tracing::error!("Signal handler task failed: {}", err);
        }
        return result.map(|report| {
            tracing::debug!("Headless playback finished: {:?}", report);
        });
    }

    run_interactive(args, scenes).await
}

/// Plays the sequence without a terminal UI, writing each scene as text when
/// it becomes current. Returns once the last scene's timer fires and no
/// replays remain, or when shutdown is requested.
///
/// # Errors
///
/// Returns an error when writing to `out` fails.
pub async fn run_headless<W: Write>(
    args: &PlayerArgs,
    scenes: SceneSequence,
    out: &mut W,
    shutdown_rx: &mut ShutdownReceiver,
) -> AppResult<HeadlessReport> {
    let mut controller = PlaybackController::new(scenes);
    let mut timer = SceneTimer::new(args.speed.get());
    let mut replays_left = args.replays;
    let mut report = HeadlessReport {
        advances: 0,
        finishes: 0,
        replays: 0,
        final_state: controller.state(),
    };

    writeln!(out, "{} | {}", STORY_TITLE, STORY_KICKER)?;
    timer.apply(controller.start().command);
    write_scene(out, &controller, args.no_color)?;

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            token = timer.fired() => {
                let transition = controller.on_timer_fired(token);
                timer.apply(transition.command);
                match transition.kind {
                    TransitionKind::Advanced => {
                        report.advances = report.advances.saturating_add(1);
                        write_scene(out, &controller, args.no_color)?;
                    }
                    TransitionKind::Finished => {
                        report.finishes = report.finishes.saturating_add(1);
                        writeln!(out, "-- fin --")?;
                        if replays_left == 0 {
                            break;
                        }
                        replays_left = replays_left.saturating_sub(1);
                        report.replays = report.replays.saturating_add(1);
                        let replay = controller.replay();
                        timer.apply(replay.command);
                        write_scene(out, &controller, args.no_color)?;
                    }
                    TransitionKind::Started
                    | TransitionKind::Replayed
                    | TransitionKind::TornDown
                    | TransitionKind::Ignored => {}
                }
            }
        }
    }

    report.final_state = controller.state();
    timer.apply(controller.teardown().command);
    out.flush()?;
    Ok(report)
}

fn write_scene<W: Write>(
    out: &mut W,
    controller: &PlaybackController,
    no_color: bool,
) -> AppResult<()> {
    let data = UiData::snapshot(controller, Duration::ZERO, no_color);
    writeln!(out)?;
    for line in scene_text_lines(&data) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}

async fn run_interactive(args: &PlayerArgs, scenes: SceneSequence) -> AppResult<()> {
    if !args.no_splash && !run_splash_screen(STORY_TITLE, STORY_KICKER, args.no_color).await? {
        return Ok(());
    }

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<PlayerInput>();
    let keyboard_handle = setup_keyboard_input_handler(&shutdown_tx, input_tx);
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let mut controller = PlaybackController::new(scenes);
    let mut timer = SceneTimer::new(args.speed.get());
    timer.apply(controller.start().command);
    let mut scene_started = Instant::now();

    let (ui_tx, _) = watch::channel(UiData::snapshot(&controller, Duration::ZERO, args.no_color));
    let render_handle = setup_render_ui(&shutdown_tx, &ui_tx);

    let mut refresh = tokio::time::interval(frame_interval(args.fps.get()));
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            token = timer.fired() => {
                let transition = controller.on_timer_fired(token);
                timer.apply(transition.command);
                match transition.kind {
                    TransitionKind::Advanced => scene_started = Instant::now(),
                    TransitionKind::Finished => {
                        if args.exit_on_finish {
                            break;
                        }
                    }
                    TransitionKind::Started
                    | TransitionKind::Replayed
                    | TransitionKind::TornDown
                    | TransitionKind::Ignored => {}
                }
            }
            input = input_rx.recv() => match input {
                Some(PlayerInput::Replay) => {
                    let transition = controller.replay();
                    timer.apply(transition.command);
                    scene_started = Instant::now();
                }
                Some(PlayerInput::Quit) | None => break,
            },
            _ = refresh.tick() => {}
        }

        let scene_elapsed = timer.scene_time(scene_started.elapsed());
        drop(ui_tx.send(UiData::snapshot(&controller, scene_elapsed, args.no_color)));
    }

    timer.apply(controller.teardown().command);
    drop(shutdown_tx.send(()));
    if let Err(err) = render_handle.await {
        tracing::error!("Render task failed: {}", err);
    }
    if let Err(err) = keyboard_handle.await {
        tracing::error!("Keyboard task failed: {}", err);
    }
    if let Err(err) = signal_handle.await {
        tracing::error!("Signal handler task failed: {}", err);
    }
    Ok(())
}

fn frame_interval(fps: u64) -> Duration {
    MS_PER_SEC
        .checked_div(fps)
        .filter(|millis| *millis > 0)
        .map_or(DEFAULT_FRAME_INTERVAL, Duration::from_millis)
}
