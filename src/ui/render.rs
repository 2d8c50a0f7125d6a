mod dashboard;
mod formatting;
mod frame;
mod lifecycle;
mod progress;
mod scene_panel;
mod theme;

pub use dashboard::{Ui, UiActions};
pub use formatting::scene_text_lines;
pub use lifecycle::{run_splash_screen, setup_render_ui};

#[cfg(test)]
pub(crate) use progress::progress_bar_line;
