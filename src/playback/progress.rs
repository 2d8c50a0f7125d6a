use std::cmp::Ordering;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Exact fraction of the sequence considered complete, always within `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct ProgressRatio {
    numerator: u128,
    denominator: u128,
}

impl ProgressRatio {
    /// Builds a ratio, clamping the numerator to the denominator. A zero
    /// denominator yields an empty ratio.
    #[must_use]
    pub fn new(numerator: u128, denominator: u128) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        Self {
            numerator: numerator.min(denominator),
            denominator,
        }
    }

    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    pub const COMPLETE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Scenes completed including the current one: `(index + 1) / len`.
    #[must_use]
    pub fn through_scene(index: usize, len: NonZeroUsize) -> Self {
        let completed = u128::try_from(index)
            .unwrap_or(u128::MAX)
            .saturating_add(1);
        Self::new(completed, to_u128(len.get()))
    }

    /// Scenes completed before the current one: `index / len`.
    #[must_use]
    pub fn before_scene(index: usize, len: NonZeroUsize) -> Self {
        Self::new(to_u128(index), to_u128(len.get()))
    }

    /// Scales the ratio onto `units` cells, rounding down.
    #[must_use]
    pub fn scale(self, units: u128) -> u128 {
        self.numerator
            .saturating_mul(units)
            .checked_div(self.denominator)
            .unwrap_or(0)
    }
}

impl PartialEq for ProgressRatio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ProgressRatio {}

impl PartialOrd for ProgressRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProgressRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.numerator.saturating_mul(other.denominator);
        let right = other.numerator.saturating_mul(self.denominator);
        left.cmp(&right)
    }
}

/// Progress shown while a scene is on screen.
///
/// Moves linearly from `index / len` to `min((index + 1) / len, 1)` over the
/// scene's duration, then holds at the target.
#[must_use]
pub fn animated_progress(
    index: usize,
    len: NonZeroUsize,
    elapsed: Duration,
    duration: Duration,
) -> ProgressRatio {
    let duration_ms = duration.as_millis();
    if duration_ms == 0 {
        return ProgressRatio::through_scene(index, len);
    }
    let elapsed_ms = elapsed.as_millis().min(duration_ms);
    if elapsed_ms == 0 {
        return ProgressRatio::before_scene(index, len);
    }
    let numerator = to_u128(index)
        .saturating_mul(duration_ms)
        .saturating_add(elapsed_ms);
    let denominator = to_u128(len.get()).saturating_mul(duration_ms);
    ProgressRatio::new(numerator, denominator)
}

/// One-based counter label, each side zero-padded to two digits.
#[must_use]
pub fn counter_label(index: usize, len: NonZeroUsize) -> String {
    format!("{:02} / {:02}", index.saturating_add(1), len.get())
}

fn to_u128(value: usize) -> u128 {
    u128::try_from(value).unwrap_or(u128::MAX)
}
