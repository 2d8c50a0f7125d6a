use thiserror::Error;

/// Scene fields that must carry display text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneField {
    #[error("id")]
    Id,
    #[error("background")]
    Background,
    #[error("location")]
    Location,
    #[error("caption")]
    Caption,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Scene sequence must contain at least one scene.")]
    EmptySceneSequence,
    #[error("Scene '{id}' must have a duration > 0 ms.")]
    NonPositiveDuration { id: String },
    #[error("Scene id '{id}' appears more than once.")]
    DuplicateSceneId { id: String },
    #[error("Scene '{id}' has an empty {field}.")]
    EmptySceneField { id: String, field: SceneField },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[cfg(feature = "fuzzing")]
    #[error("Playback invariant violated: {message}")]
    Invariant { message: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
