use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Serialize;

use crate::error::{SceneField, ValidationError};

/// One immutable unit of content shown for `duration_ms` before auto-advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub id: String,
    pub duration_ms: u64,
    pub background: String,
    pub location: String,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub man_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wife_lines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

impl Scene {
    #[must_use]
    pub fn new(
        id: &str,
        duration_ms: u64,
        background: &str,
        location: &str,
        caption: &str,
    ) -> Self {
        Self {
            id: id.to_owned(),
            duration_ms,
            background: background.to_owned(),
            location: location.to_owned(),
            caption: caption.to_owned(),
            man_line: None,
            wife_lines: None,
            tone: None,
        }
    }

    #[must_use]
    pub fn with_man_line(mut self, line: &str) -> Self {
        self.man_line = Some(line.to_owned());
        self
    }

    #[must_use]
    pub fn with_wife_lines(mut self, lines: &[&str]) -> Self {
        self.wife_lines = Some(lines.iter().map(|line| (*line).to_owned()).collect());
        self
    }

    #[must_use]
    pub fn with_tone(mut self, tone: &str) -> Self {
        self.tone = Some(tone.to_owned());
        self
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Dialogue lines spoken by the wife, empty when the scene has none.
    #[must_use]
    pub fn wife_lines(&self) -> &[String] {
        self.wife_lines.as_deref().unwrap_or(&[])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            (SceneField::Id, &self.id),
            (SceneField::Background, &self.background),
            (SceneField::Location, &self.location),
            (SceneField::Caption, &self.caption),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptySceneField {
                    id: self.id.clone(),
                    field,
                });
            }
        }
        if self.duration_ms == 0 {
            return Err(ValidationError::NonPositiveDuration {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Ordered scene list with at least one entry and pairwise distinct ids.
///
/// The first scene is stored apart from the rest so the sequence can hand out
/// a current scene without a fallible lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSequence {
    head: Scene,
    tail: Vec<Scene>,
}

impl SceneSequence {
    /// Validates and freezes a scene list.
    ///
    /// # Errors
    ///
    /// Returns an error when the list is empty, a scene has a zero duration or
    /// a blank display field, or two scenes share an id.
    pub fn new(scenes: Vec<Scene>) -> Result<Self, ValidationError> {
        let mut seen = BTreeSet::new();
        for scene in &scenes {
            scene.validate()?;
            if !seen.insert(scene.id.as_str()) {
                return Err(ValidationError::DuplicateSceneId {
                    id: scene.id.clone(),
                });
            }
        }

        let mut scenes = scenes.into_iter();
        let head = scenes.next().ok_or(ValidationError::EmptySceneSequence)?;
        Ok(Self {
            head,
            tail: scenes.collect(),
        })
    }

    #[must_use]
    pub const fn first(&self) -> &Scene {
        &self.head
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Scene> {
        match index.checked_sub(1) {
            None => Some(&self.head),
            Some(tail_index) => self.tail.get(tail_index),
        }
    }

    #[must_use]
    pub fn len(&self) -> NonZeroUsize {
        NonZeroUsize::MIN.saturating_add(self.tail.len())
    }

    #[must_use]
    pub const fn last_index(&self) -> usize {
        self.tail.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scene> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }
}
