//! Application services for task lifecycle orchestration.

mod lifecycle;
mod registry;
mod schedule;

pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
pub use registry::{Admission, ShutdownMode, TransitionRegistry};
pub use schedule::{
    DEFAULT_BASE_OFFSET, DEFAULT_FAILURE_RATIO, FixedOutcome, OutcomeSampler, TransitionSchedule,
    WeightedOutcome,
};
