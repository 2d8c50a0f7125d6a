use std::num::NonZeroUsize;
use std::time::Duration;

use crate::playback::{PlaybackController, ProgressRatio, animated_progress};
use crate::scene::{STORY_KICKER, STORY_TITLE, Scene};

/// Delay between consecutive reveals of the wife's dialogue lines.
pub const DIALOGUE_STAGGER: Duration = Duration::from_millis(400);

#[derive(Debug, Clone)]
pub struct UiData {
    pub title: &'static str,
    pub kicker: &'static str,
    pub scene: Scene,
    pub index: usize,
    pub total: NonZeroUsize,
    pub counter: String,
    pub playing: bool,
    pub progress: ProgressRatio,
    pub scene_elapsed: Duration,
    pub no_color: bool,
}

impl UiData {
    /// Captures what the presentation layer needs from the controller.
    /// `scene_elapsed` is scene time since the current scene became visible.
    #[must_use]
    pub fn snapshot(
        controller: &PlaybackController,
        scene_elapsed: Duration,
        no_color: bool,
    ) -> Self {
        let scene = controller.current_scene().clone();
        let index = controller.index();
        let total = controller.scenes().len();
        let progress = if controller.is_playing() {
            animated_progress(index, total, scene_elapsed, scene.duration())
        } else {
            controller.progress_ratio()
        };
        Self {
            title: STORY_TITLE,
            kicker: STORY_KICKER,
            scene,
            index,
            total,
            counter: controller.counter_label(),
            playing: controller.is_playing(),
            progress,
            scene_elapsed,
            no_color,
        }
    }

    /// Wife lines revealed so far; the first shows immediately and each
    /// following line one stagger later. All lines show once playback stops.
    #[must_use]
    pub fn visible_wife_lines(&self) -> &[String] {
        let lines = self.scene.wife_lines();
        if !self.playing {
            return lines;
        }
        let stagger_ms = DIALOGUE_STAGGER.as_millis();
        let revealed = self
            .scene_elapsed
            .as_millis()
            .checked_div(stagger_ms)
            .unwrap_or(0)
            .saturating_add(1);
        let count = usize::try_from(revealed)
            .unwrap_or(usize::MAX)
            .min(lines.len());
        lines.get(..count).unwrap_or(lines)
    }

    #[must_use]
    pub fn tone_label(&self) -> Option<String> {
        self.scene
            .tone
            .as_deref()
            .map(|tone| format!("{} tempo", tone))
    }

    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.playing { "playing" } else { "finished" }
    }
}
