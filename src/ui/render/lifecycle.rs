use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    Terminal,
    prelude::{Backend, text},
    text::Span,
    widgets::{Block, Paragraph, Wrap},
};
use tokio::sync::watch;

use crate::error::AppResult;
use crate::playback::{PlayerInput, map_key_event};
use crate::shutdown::ShutdownSender;
use crate::ui::model::UiData;

use super::dashboard::{Ui, UiActions};
use super::theme::{
    COLOR_END, COLOR_MID, COLOR_START, SPLASH_SECS, SPLASH_SUBTITLE_RGB, app_background_style,
    rgb, style_color, title_style, tri_gradient_color,
};

/// Splash key poll granularity.
const SPLASH_POLL_INTERVAL: Duration = Duration::from_millis(50);

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        Ui::cleanup();
    }
}

/// Spawns the task that owns the terminal and redraws on every published
/// [`UiData`]. The terminal is restored when the task ends.
#[must_use]
pub fn setup_render_ui(
    shutdown_tx: &ShutdownSender,
    ui_tx: &watch::Sender<UiData>,
) -> tokio::task::JoinHandle<()> {
    let mut ui_rx = ui_tx.subscribe();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        let mut terminal = match Ui::setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                tracing::error!("Failed to setup terminal: {}", err);
                return;
            }
        };
        let _guard = TerminalGuard;

        let initial = ui_rx.borrow_and_update().clone();
        Ui::render(&mut terminal, &initial);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                res = ui_rx.changed() => {
                    if res.is_ok() {
                        let data = ui_rx.borrow_and_update().clone();
                        Ui::render(&mut terminal, &data);
                    } else {
                        break;
                    }
                }
            }
        }
    })
}

/// Shows the title card before playback starts. Any key skips it.
///
/// Returns `false` when the viewer quit from the splash screen.
///
/// # Errors
///
/// Returns an error if the terminal setup or event polling fails.
pub async fn run_splash_screen(title: &str, kicker: &str, no_color: bool) -> AppResult<bool> {
    let mut terminal = Ui::setup_terminal()?;
    let _guard = TerminalGuard;

    render_splash(&mut terminal, title, kicker, no_color);
    let deadline = Instant::now()
        .checked_add(Duration::from_secs(SPLASH_SECS))
        .unwrap_or_else(Instant::now);
    loop {
        if Instant::now() >= deadline {
            return Ok(true);
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        let timeout = remaining.min(SPLASH_POLL_INTERVAL);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(map_key_event(&key) != Some(PlayerInput::Quit));
        }
        tokio::task::yield_now().await;
    }
}

fn render_splash<B: Backend>(terminal: &mut Terminal<B>, title: &str, kicker: &str, no_color: bool) {
    if let Err(err) = terminal.draw(|f| {
        let size = f.size();
        f.render_widget(Block::default().style(app_background_style(no_color)), size);

        let banner = [kicker.to_uppercase(), String::new(), title.to_owned()];
        let banner_height = banner.len().saturating_add(2);
        let top_pad = usize::from(size.height).saturating_sub(banner_height) / 2;

        let mut lines = Vec::with_capacity(banner_height.saturating_add(top_pad));
        for _ in 0..top_pad {
            lines.push(text::Line::from(""));
        }
        let denom = banner.len().saturating_sub(1);
        for (idx, line) in banner.into_iter().enumerate() {
            let color = tri_gradient_color(COLOR_START, COLOR_MID, COLOR_END, idx, denom);
            let style = title_style(no_color).patch(style_color(no_color, color));
            lines.push(text::Line::from(Span::styled(line, style)));
        }
        lines.push(text::Line::from(""));
        lines.push(text::Line::from(Span::styled(
            format!("storyreel v{} | press any key", env!("CARGO_PKG_VERSION")),
            style_color(no_color, rgb(SPLASH_SUBTITLE_RGB)),
        )));

        let splash = Paragraph::new(lines)
            .style(app_background_style(no_color))
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: false });
        f.render_widget(splash, size);
    }) {
        tracing::error!("Failed to render splash screen: {}", err);
    }
}
