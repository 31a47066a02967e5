//! Recording diagnostic sink for tests.

use std::sync::{Arc, Mutex};

use crate::task::ports::{TransitionDiagnostics, TransitionEvent};

/// Diagnostic sink that keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    events: Arc<Mutex<Vec<TransitionEvent>>>,
}

impl RecordingDiagnostics {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> Vec<TransitionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Returns the number of `Failed` events caused by a missing task.
    #[must_use]
    pub fn not_found_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| {
                matches!(event, TransitionEvent::Failed { error, .. } if error.is_not_found())
            })
            .count()
    }
}

impl TransitionDiagnostics for RecordingDiagnostics {
    fn record(&self, event: TransitionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
