use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::{Backend, Frame, text},
    text::Span,
    widgets::{Block, Paragraph},
};

use crate::ui::model::UiData;

use super::formatting::format_ms_as_tenths;
use super::progress::progress_bar_line;
use super::scene_panel::render_scene_panel;
use super::theme::{
    FOOTER_HEIGHT, HEADER_COL_REPLAY, HEADER_COL_TITLE, HEADER_HEIGHT, PANEL_DIM_RGB,
    PANEL_MUTED_RGB, PROGRESS_HEIGHT, REPLAY_ACCENT_RGB, SCENE_MIN_HEIGHT, UI_MARGIN,
    app_background_style, rgb, style_color, title_style,
};

pub fn draw_frame<B: Backend>(f: &mut Frame<'_, B>, data: &UiData) {
    let size = f.size();
    f.render_widget(
        Block::default().style(app_background_style(data.no_color)),
        size,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(UI_MARGIN)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(SCENE_MIN_HEIGHT),
            Constraint::Length(PROGRESS_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    let (header_chunk, scene_chunk, progress_chunk, footer_chunk) = match chunks.as_ref() {
        [a, b, c, d] => (a, b, c, d),
        _ => return,
    };

    render_header(f, data, *header_chunk);
    render_scene_panel(f, data, *scene_chunk);
    f.render_widget(
        Paragraph::new(progress_bar_line(
            data.progress,
            progress_chunk.width,
            data.no_color,
            "",
        )),
        *progress_chunk,
    );
    render_footer(f, data, *footer_chunk);
}

fn render_header<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(HEADER_COL_TITLE),
            Constraint::Percentage(HEADER_COL_REPLAY),
        ])
        .split(area);
    let (title_chunk, replay_chunk) = match columns.as_ref() {
        [a, b] => (a, b),
        _ => return,
    };

    let title = Paragraph::new(vec![
        text::Line::from(Span::styled(
            data.kicker.to_uppercase(),
            style_color(data.no_color, rgb(PANEL_MUTED_RGB)),
        )),
        text::Line::from(Span::styled(data.title, title_style(data.no_color))),
    ]);
    f.render_widget(title, *title_chunk);

    let replay_style = if data.playing {
        style_color(data.no_color, rgb(PANEL_DIM_RGB))
    } else {
        style_color(data.no_color, rgb(REPLAY_ACCENT_RGB))
    };
    let replay = Paragraph::new(text::Line::from(Span::styled("( Replay: r )", replay_style)))
        .alignment(Alignment::Right);
    f.render_widget(replay, *replay_chunk);
}

fn render_footer<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let (counter_chunk, status_chunk) = match columns.as_ref() {
        [a, b] => (a, b),
        _ => return,
    };

    let muted = style_color(data.no_color, rgb(PANEL_MUTED_RGB));
    let elapsed_ms = data
        .scene_elapsed
        .min(data.scene.duration())
        .as_millis();
    let timing = format!(
        "{} / {}",
        format_ms_as_tenths(elapsed_ms),
        format_ms_as_tenths(data.scene.duration().as_millis())
    );
    let left = text::Line::from(vec![
        Span::styled(data.counter.clone(), muted),
        Span::raw("   "),
        Span::styled(timing, style_color(data.no_color, rgb(PANEL_DIM_RGB))),
    ]);
    f.render_widget(Paragraph::new(left), *counter_chunk);

    let status = text::Line::from(vec![
        Span::styled(data.status_label().to_uppercase(), muted),
        Span::raw("   "),
        Span::styled(
            "r replay  q quit",
            style_color(data.no_color, rgb(PANEL_DIM_RGB)),
        ),
    ]);
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Right),
        *status_chunk,
    );
}
