//! Scene records and the validated, non-empty scene sequence.
mod catalog;
mod types;


pub use catalog::{STORY_KICKER, STORY_TITLE, passport_to_nowhere};
pub use types::{Scene, SceneSequence};
