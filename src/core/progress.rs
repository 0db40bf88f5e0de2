// pixelize/src/core/progress.rs
use super::{OutputArtifact, UnitError};

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Fraction of source files finished, in `[0, 1]`.
    pub fraction: f64,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(fraction: f64, message: impl Into<String>) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    pub fn of(done: usize, total: usize, message: impl Into<String>) -> Self {
        let fraction = if total == 0 {
            1.0
        } else {
            done as f64 / total as f64
        };
        Self::new(fraction, message)
    }
}

/// Receives batch events in the order the work completes.
///
/// Only `progress` is required; the per-artifact hooks let a console echo
/// each save or failure as it happens.
pub trait ProgressSink {
    fn progress(&mut self, event: &ProgressEvent);

    fn saved(&mut self, _artifact: &OutputArtifact) {}

    fn failed(&mut self, _error: &UnitError) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent),
{
    fn progress(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&mut self, _event: &ProgressEvent) {}
}
