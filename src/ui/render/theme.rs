use ratatui::style::{Color, Modifier, Style};

pub(super) const UI_MARGIN: u16 = 1;
pub(super) const HEADER_HEIGHT: u16 = 3;
pub(super) const SCENE_MIN_HEIGHT: u16 = 8;
pub(super) const PROGRESS_HEIGHT: u16 = 1;
pub(super) const FOOTER_HEIGHT: u16 = 1;
pub(super) const HEADER_COL_TITLE: u16 = 70;
pub(super) const HEADER_COL_REPLAY: u16 = 30;
pub(super) const SCENE_PADDING: u16 = 2;
pub(super) const META_HEIGHT: u16 = 2;
pub(super) const APP_BG_RGB: (u8, u8, u8) = (0x02, 0x06, 0x17);
pub(super) const PANEL_TEXT_RGB: (u8, u8, u8) = (0xf1, 0xf5, 0xf9);
pub(super) const PANEL_MUTED_RGB: (u8, u8, u8) = (0x94, 0xa3, 0xb8);
pub(super) const PANEL_DIM_RGB: (u8, u8, u8) = (0x64, 0x74, 0x8b);
pub(super) const PROGRESS_START_RGB: (u8, u8, u8) = (0xfb, 0xbf, 0x24);
pub(super) const PROGRESS_END_RGB: (u8, u8, u8) = (0xec, 0x48, 0x99);
pub(super) const MAN_LINE_BG_RGB: (u8, u8, u8) = (0x0f, 0x17, 0x2a);
pub(super) const WIFE_LINE_BG_RGB: (u8, u8, u8) = (0xfd, 0xe6, 0x8a);
pub(super) const WIFE_LINE_FG_RGB: (u8, u8, u8) = (0x78, 0x35, 0x0f);
pub(super) const REPLAY_ACCENT_RGB: (u8, u8, u8) = (0xfb, 0xbf, 0x24);
pub(super) const SPLASH_SECS: u64 = 2;
pub(super) const SPLASH_SUBTITLE_RGB: (u8, u8, u8) = (0xec, 0x48, 0x99);
pub(super) const COLOR_START: (u8, u8, u8) = (0xfb, 0xbf, 0x24);
pub(super) const COLOR_MID: (u8, u8, u8) = (0xf4, 0x72, 0xb6);
pub(super) const COLOR_END: (u8, u8, u8) = (0x60, 0xa5, 0xfa);

/// Backdrop and border colors for one scene background key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ScenePalette {
    pub(super) backdrop: (u8, u8, u8),
    pub(super) border: (u8, u8, u8),
}

pub(super) fn scene_palette(background: &str) -> ScenePalette {
    match background {
        "scene-porch" => ScenePalette {
            backdrop: (0x2b, 0x1d, 0x0e),
            border: (0xf5, 0x9e, 0x0b),
        },
        "scene-beach" => ScenePalette {
            backdrop: (0x08, 0x2f, 0x49),
            border: (0x22, 0xd3, 0xee),
        },
        "scene-mountain" => ScenePalette {
            backdrop: (0x05, 0x2e, 0x16),
            border: (0x4a, 0xde, 0x80),
        },
        "scene-city" => ScenePalette {
            backdrop: (0x1e, 0x1b, 0x4b),
            border: (0xc0, 0x84, 0xfc),
        },
        "scene-porch-night" => ScenePalette {
            backdrop: (0x0b, 0x10, 0x26),
            border: (0x81, 0x8c, 0xf8),
        },
        _ => ScenePalette {
            backdrop: (0x0f, 0x17, 0x2a),
            border: (0x33, 0x41, 0x55),
        },
    }
}

pub(super) fn style_color(no_color: bool, color: Color) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(color)
    }
}

pub(super) const fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub(super) fn app_background_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default()
            .bg(rgb(APP_BG_RGB))
            .fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn scene_block_style(no_color: bool, palette: ScenePalette) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default()
            .bg(rgb(palette.backdrop))
            .fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn scene_border_style(no_color: bool, palette: ScenePalette) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(rgb(palette.border))
    }
}

pub(super) fn title_style(no_color: bool) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    if no_color {
        style
    } else {
        style.fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn man_line_style(no_color: bool) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC);
    if no_color {
        style
    } else {
        style.bg(rgb(MAN_LINE_BG_RGB)).fg(Color::White)
    }
}

pub(super) fn wife_line_style(no_color: bool) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    if no_color {
        style
    } else {
        style.bg(rgb(WIFE_LINE_BG_RGB)).fg(rgb(WIFE_LINE_FG_RGB))
    }
}

pub(super) fn gradient_color(
    start: (u8, u8, u8),
    end: (u8, u8, u8),
    idx: usize,
    denom: usize,
) -> Color {
    let denom = i32::try_from(denom.max(1)).unwrap_or(i32::MAX);
    let idx = i32::try_from(idx).unwrap_or(i32::MAX).min(denom);
    let lerp = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        let value = b
            .checked_sub(a)
            .and_then(|delta| delta.checked_mul(idx))
            .and_then(|scaled| scaled.checked_div(denom))
            .and_then(|step| a.checked_add(step))
            .unwrap_or(a);
        u8::try_from(value.clamp(0, 255)).unwrap_or(0)
    };
    Color::Rgb(
        lerp(start.0, end.0),
        lerp(start.1, end.1),
        lerp(start.2, end.2),
    )
}

pub(super) fn tri_gradient_color(
    start: (u8, u8, u8),
    mid: (u8, u8, u8),
    end: (u8, u8, u8),
    idx: usize,
    denom: usize,
) -> Color {
    let denom = denom.max(1);
    let half = denom / 2;
    if idx <= half {
        gradient_color(start, mid, idx, half)
    } else {
        gradient_color(
            mid,
            end,
            idx.saturating_sub(half),
            denom.saturating_sub(half),
        )
    }
}
