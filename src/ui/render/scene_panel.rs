use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::{Backend, Frame, text},
    text::Span,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::ui::model::UiData;

use super::formatting::wrapped_height;
use super::theme::{
    META_HEIGHT, PANEL_MUTED_RGB, SCENE_PADDING, man_line_style, rgb, scene_block_style,
    scene_border_style, scene_palette, style_color, title_style, wife_line_style,
};

/// Renders the current scene: location and tempo at the top, caption and
/// dialogue anchored to the bottom.
pub(super) fn render_scene_panel<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let palette = scene_palette(&data.scene.background);
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(SCENE_PADDING))
        .style(scene_block_style(data.no_color, palette))
        .border_style(scene_border_style(data.no_color, palette));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let caption_height = wrapped_height(&data.scene.caption, inner.width);
    let man_height = data.scene.man_line.as_deref().map_or(0, |line| {
        wrapped_height(line, inner.width.saturating_sub(2)).saturating_add(2)
    });
    let wife_lines = data.visible_wife_lines();
    let wife_width = inner.width.saturating_mul(2) / 3;
    let wife_height = wife_lines.iter().fold(0u16, |acc, line| {
        acc.saturating_add(wrapped_height(line, wife_width))
    });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(META_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(caption_height),
            Constraint::Length(1),
            Constraint::Length(man_height),
            Constraint::Length(wife_height),
        ])
        .split(inner);

    let (meta_chunk, caption_chunk, man_chunk, wife_chunk) = match chunks.as_ref() {
        [meta, _, caption, _, man, wife] => (meta, caption, man, wife),
        _ => return,
    };

    let muted = style_color(data.no_color, rgb(PANEL_MUTED_RGB));
    let mut meta_lines = vec![text::Line::from(Span::styled(
        data.scene.location.to_uppercase(),
        muted,
    ))];
    if let Some(tone) = data.tone_label() {
        meta_lines.push(text::Line::from(Span::styled(tone.to_uppercase(), muted)));
    }
    f.render_widget(Paragraph::new(meta_lines), *meta_chunk);

    f.render_widget(
        Paragraph::new(data.scene.caption.clone())
            .style(title_style(data.no_color))
            .wrap(Wrap { trim: true }),
        *caption_chunk,
    );

    if let Some(line) = data.scene.man_line.as_deref() {
        f.render_widget(
            Paragraph::new(line.to_owned())
                .block(Block::default().borders(Borders::LEFT))
                .style(man_line_style(data.no_color))
                .wrap(Wrap { trim: true }),
            *man_chunk,
        );
    }

    if !wife_lines.is_empty() {
        let lines: Vec<text::Line<'static>> = wife_lines
            .iter()
            .map(|line| text::Line::from(Span::styled(line.clone(), wife_line_style(data.no_color))))
            .collect();
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Right)
                .wrap(Wrap { trim: true }),
            *wife_chunk,
        );
    }
}
