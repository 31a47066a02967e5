//! Delay and outcome policy for scheduled transitions.

use rand::Rng;
use std::time::Duration;

use crate::task::domain::TaskOutcome;

/// Fixed offset added to every configured interval.
pub const DEFAULT_BASE_OFFSET: Duration = Duration::from_secs(2);

/// Probability that a transition lands in [`TaskOutcome::Failed`].
pub const DEFAULT_FAILURE_RATIO: f64 = 0.2;

/// Delay applied between registration and the terminal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSchedule {
    base_offset: Duration,
    interval: Duration,
}

impl TransitionSchedule {
    /// Creates a schedule with the default base offset.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            base_offset: DEFAULT_BASE_OFFSET,
            interval,
        }
    }

    /// Overrides the base offset.
    #[must_use]
    pub const fn with_base_offset(mut self, base_offset: Duration) -> Self {
        self.base_offset = base_offset;
        self
    }

    /// Returns the base offset.
    #[must_use]
    pub const fn base_offset(&self) -> Duration {
        self.base_offset
    }

    /// Returns the configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `base_offset + interval`, saturating at [`Duration::MAX`].
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.base_offset.saturating_add(self.interval)
    }
}

impl Default for TransitionSchedule {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

/// Source of transition outcomes.
pub trait OutcomeSampler: Send + Sync {
    /// Draws one outcome.
    fn draw(&self) -> TaskOutcome;
}

/// Bernoulli outcome draw with a fixed failure probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedOutcome {
    failure_ratio: f64,
}

impl WeightedOutcome {
    /// Creates a sampler failing with probability `failure_ratio`.
    ///
    /// Values outside `[0, 1]` are clamped; `NaN` falls back to
    /// [`DEFAULT_FAILURE_RATIO`].
    #[must_use]
    pub fn new(failure_ratio: f64) -> Self {
        let sanitized = if failure_ratio.is_nan() {
            DEFAULT_FAILURE_RATIO
        } else {
            failure_ratio.clamp(0.0, 1.0)
        };
        Self {
            failure_ratio: sanitized,
        }
    }

    /// Returns the failure probability.
    #[must_use]
    pub const fn failure_ratio(&self) -> f64 {
        self.failure_ratio
    }

    /// Draws an outcome from the supplied generator.
    pub fn draw_with<R: Rng>(&self, rng: &mut R) -> TaskOutcome {
        if rng.random_bool(self.failure_ratio) {
            TaskOutcome::Failed
        } else {
            TaskOutcome::Completed
        }
    }
}

impl Default for WeightedOutcome {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATIO)
    }
}

impl OutcomeSampler for WeightedOutcome {
    fn draw(&self) -> TaskOutcome {
        self.draw_with(&mut rand::rng())
    }
}

/// Sampler that always yields the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOutcome(pub TaskOutcome);

impl OutcomeSampler for FixedOutcome {
    fn draw(&self) -> TaskOutcome {
        self.0
    }
}
