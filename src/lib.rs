//! Tasktrack: asynchronous task lifecycle tracking.
//!
//! A client registers a titled unit of work, receives its identifier
//! immediately, and later polls for its status. The work itself is simulated:
//! each registration schedules one detached transition that marks the task
//! completed or failed after a configured delay.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and diagnostics
//! - **Adapters**: Concrete implementations of ports (in-memory, tracing)
//!
//! # Modules
//!
//! - [`task`]: Task records, storage, and the lifecycle service
//! - [`config`]: TOML service configuration

pub mod config;
pub mod task;
