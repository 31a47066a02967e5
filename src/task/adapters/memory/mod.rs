//! In-memory adapter implementations.
//!
//! These adapters keep every record in process memory and are the only
//! storage the lifecycle service ships with.

mod diagnostics;
mod sharded;
mod task;

pub use diagnostics::RecordingDiagnostics;
pub use sharded::ShardedTaskRepository;
pub use task::InMemoryTaskRepository;
