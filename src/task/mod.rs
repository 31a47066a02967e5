//! Task lifecycle tracking.
//!
//! A caller registers a titled task and receives its identifier at once. The
//! task starts pending; after a fixed delay a detached transition marks it
//! completed or failed. Callers poll the record by identifier and may delete
//! it at any time. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
