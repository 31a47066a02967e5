//! Diagnostic sink backed by `tracing`.

use crate::task::ports::{TransitionDiagnostics, TransitionEvent};

/// Writes transition events as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl TransitionDiagnostics for TracingDiagnostics {
    fn record(&self, event: TransitionEvent) {
        match event {
            TransitionEvent::Applied {
                task_id,
                outcome,
                duration,
            } => {
                tracing::info!(
                    %task_id,
                    ?outcome,
                    duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                    "task transition applied"
                );
            }
            TransitionEvent::Failed { task_id, error } => {
                tracing::warn!(%task_id, %error, "task transition could not be stored");
            }
            TransitionEvent::Abandoned { task_id } => {
                tracing::debug!(%task_id, "task transition abandoned on shutdown");
            }
        }
    }
}
