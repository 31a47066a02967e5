//! Domain model for task lifecycle tracking.
//!
//! A task is created pending and reaches exactly one terminal status when its
//! simulated work finishes. Infrastructure concerns stay outside of this
//! boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use task::{Task, TaskOutcome, TaskStatus};
