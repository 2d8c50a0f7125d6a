use crate::ui::model::UiData;

pub(super) const MS_PER_SEC: u64 = 1_000;
pub(super) const TENTHS_DIVISOR: u64 = 100;

pub(super) fn format_ms_as_tenths(ms: u128) -> String {
    let sec_divisor = u128::from(MS_PER_SEC);
    let tenth_divisor = u128::from(TENTHS_DIVISOR);
    let secs = ms.checked_div(sec_divisor).unwrap_or(0);
    let rem = ms.checked_rem(sec_divisor).unwrap_or(0);
    let tenths = rem.checked_div(tenth_divisor).unwrap_or(0);
    format!("{}.{}s", secs, tenths)
}

/// Rows `text` occupies when wrapped on `width` columns.
pub(super) fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut rows = 0usize;
    let mut line_len = 0usize;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if line_len == 0 {
            word_len
        } else {
            line_len.saturating_add(1).saturating_add(word_len)
        };
        if line_len > 0 && needed > width {
            rows = rows.saturating_add(1);
            line_len = word_len;
        } else {
            line_len = needed;
        }
        while line_len > width {
            rows = rows.saturating_add(1);
            line_len = line_len.saturating_sub(width);
        }
    }
    if line_len > 0 {
        rows = rows.saturating_add(1);
    }
    u16::try_from(rows.max(1)).unwrap_or(u16::MAX)
}

/// Plain-text rendition of a scene, used when no TUI is attached.
#[must_use]
pub fn scene_text_lines(data: &UiData) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);
    let header = data.tone_label().map_or_else(
        || format!("[{}] {}", data.counter, data.scene.location),
        |tone| format!("[{}] {} ({})", data.counter, data.scene.location, tone),
    );
    lines.push(header);
    lines.push(format!("  {}", data.scene.caption));
    if let Some(line) = data.scene.man_line.as_deref() {
        lines.push(format!("  him: {}", line));
    }
    for line in data.scene.wife_lines() {
        lines.push(format!("  her: {}", line));
    }
    lines
}
