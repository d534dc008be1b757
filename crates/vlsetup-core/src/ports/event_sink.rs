//! Setup event sink for progress reporting.
//!
//! This module defines the abstraction for emitting [`SetupEvent`]s.
//! Implementations handle presentation (console panels, logs, nothing).

use crate::events::SetupEvent;

/// Trait for receiving setup events.
///
/// # Implementations
///
/// - `NoopSetupEvents` - For tests and contexts that don't render progress
/// - `ConsoleReporter` in the CLI
pub trait SetupEventSink: Send + Sync {
    /// Receive one event. Must not block.
    fn emit(&self, event: SetupEvent);
}

/// An event sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSetupEvents;

impl NoopSetupEvents {
    pub const fn new() -> Self {
        Self
    }
}

impl SetupEventSink for NoopSetupEvents {
    fn emit(&self, _event: SetupEvent) {
        // Intentionally do nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_noop_sink() {
        let sink: Arc<dyn SetupEventSink> = Arc::new(NoopSetupEvents::new());

        // Should not panic
        sink.emit(SetupEvent::RunStarted);
        sink.emit(SetupEvent::Finished { warnings: 2 });
    }
}
