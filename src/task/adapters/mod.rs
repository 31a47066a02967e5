//! Adapter implementations for task lifecycle ports.

pub mod memory;
pub mod wire;

mod logging;

pub use logging::TracingDiagnostics;
