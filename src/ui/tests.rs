use super::model::{DIALOGUE_STAGGER, UiData};
use super::render::{Ui, UiActions, progress_bar_line, scene_text_lines};
use crate::error::{AppError, AppResult};
use crate::playback::{PlaybackController, ProgressRatio};
use crate::scene::passport_to_nowhere;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use std::time::Duration;

fn controller_at(index: usize) -> AppResult<PlaybackController> {
    let mut controller = PlaybackController::new(passport_to_nowhere()?);
    controller.start();
    for _ in 0..index {
        let token = controller
            .lease()
            .ok_or_else(|| AppError::validation("Missing lease"))?;
        controller.on_timer_fired(token);
    }
    Ok(controller)
}

fn buffer_text(buffer: &Buffer) -> String {
    buffer
        .content
        .iter()
        .map(|cell| cell.symbol.as_str())
        .collect()
}

fn render_to_text(data: &UiData) -> AppResult<String> {
    let backend = TestBackend::new(80, 24);
    let mut terminal = match Terminal::new(backend) {
        Ok(term) => term,
        Err(err) => {
            return Err(AppError::validation(format!(
                "Failed to create TestBackend terminal: {}",
                err
            )));
        }
    };
    Ui::render(&mut terminal, data);
    Ok(buffer_text(terminal.backend().buffer()))
}

#[test]
fn ui_render_does_not_panic() -> AppResult<()> {
    let controller = controller_at(1)?;
    let data = UiData::snapshot(&controller, Duration::from_millis(900), false);
    let text = render_to_text(&data)?;
    for expected in ["Passport to Nowhere", "02 / 05", "PLAYING", "( Replay: r )"] {
        if !text.contains(expected) {
            return Err(AppError::validation(format!(
                "Missing {:?} in rendered frame",
                expected
            )));
        }
    }
    Ok(())
}

#[test]
fn ui_render_finished_state_without_color() -> AppResult<()> {
    let controller = controller_at(5)?;
    if controller.is_playing() {
        return Err(AppError::validation("Expected finished playback"));
    }
    let data = UiData::snapshot(&controller, Duration::ZERO, true);
    let text = render_to_text(&data)?;
    if !text.contains("05 / 05") || !text.contains("FINISHED") {
        return Err(AppError::validation("Expected finished footer"));
    }
    Ok(())
}

#[test]
fn ui_render_survives_tiny_terminal() -> AppResult<()> {
    let controller = controller_at(0)?;
    let data = UiData::snapshot(&controller, Duration::ZERO, false);
    let backend = TestBackend::new(12, 4);
    let mut terminal = Terminal::new(backend)?;
    Ui::render(&mut terminal, &data);
    Ok(())
}

#[test]
fn progress_bar_fills_proportionally() -> AppResult<()> {
    let line = progress_bar_line(ProgressRatio::new(1, 2), 22, true, "");
    let text: String = line
        .spans
        .iter()
        .map(|span| &*span.content)
        .collect();
    let filled = text.chars().filter(|ch| *ch == '█').count();
    if filled != 10 {
        return Err(AppError::validation(format!(
            "Expected 10 filled cells, got {} in {:?}",
            filled, text
        )));
    }
    if !text.starts_with('[') || !text.ends_with(']') || text.chars().count() != 22 {
        return Err(AppError::validation("Unexpected bar frame"));
    }

    let empty = progress_bar_line(ProgressRatio::ZERO, 12, true, "");
    if empty.spans.iter().any(|span| span.content.contains('█')) {
        return Err(AppError::validation("Empty ratio must not fill"));
    }
    Ok(())
}

#[test]
fn wife_lines_reveal_staggered_while_playing() -> AppResult<()> {
    let controller = controller_at(1)?;
    let first = UiData::snapshot(&controller, Duration::ZERO, false);
    if first.visible_wife_lines().len() != 1 {
        return Err(AppError::validation("Expected one line at scene start"));
    }
    let later = UiData::snapshot(&controller, DIALOGUE_STAGGER, false);
    if later.visible_wife_lines().len() != 2 {
        return Err(AppError::validation("Expected both lines after one stagger"));
    }

    let intro = UiData::snapshot(&controller_at(0)?, Duration::from_secs(5), false);
    if !intro.visible_wife_lines().is_empty() {
        return Err(AppError::validation("Intro has no wife lines"));
    }
    Ok(())
}

#[test]
fn snapshot_progress_animates_only_while_playing() -> AppResult<()> {
    let playing = controller_at(0)?;
    let start = UiData::snapshot(&playing, Duration::ZERO, false);
    if start.progress != ProgressRatio::ZERO {
        return Err(AppError::validation("Expected empty bar at first scene start"));
    }
    let done = UiData::snapshot(&playing, Duration::from_millis(6500), false);
    if done.progress != ProgressRatio::new(1, 5) {
        return Err(AppError::validation("Expected 1/5 at first scene end"));
    }

    let finished = UiData::snapshot(&controller_at(5)?, Duration::ZERO, false);
    if finished.progress != ProgressRatio::COMPLETE {
        return Err(AppError::validation("Expected full bar when finished"));
    }
    Ok(())
}

#[test]
fn scene_text_lines_include_tone_and_dialogue() -> AppResult<()> {
    let data = UiData::snapshot(&controller_at(1)?, Duration::ZERO, true);
    let lines = scene_text_lines(&data);
    match lines.first() {
        Some(header) if header.starts_with("[02 / 05] ") && header.ends_with("(directive tempo)") => {}
        Some(header) => {
            return Err(AppError::validation(format!("Unexpected header: {}", header)));
        }
        None => return Err(AppError::validation("Missing header line")),
    }
    let her_lines = lines.iter().filter(|line| line.starts_with("  her: ")).count();
    if her_lines != 2 || lines.iter().any(|line| line.starts_with("  him: ")) {
        return Err(AppError::validation("Unexpected dialogue lines"));
    }
    Ok(())
}
