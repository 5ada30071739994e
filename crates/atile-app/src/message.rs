//! Message types for the interaction state machines (TEA pattern)

use std::num::NonZeroUsize;

use atile_core::LeadField;

/// Events delivered to a lead form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    /// User typed into a field
    EditField { field: LeadField, value: String },
    /// User pressed the submit button
    Submit,
    /// Relay accepted the in-flight submission
    SubmissionSucceeded,
    /// Relay rejected the submission or could not be reached
    SubmissionFailed { reason: String },
    /// User dismissed the success or error line
    Retry,
}

/// Events delivered to a rotation (carousel or tab set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMessage {
    /// Auto-advance timer fired
    Tick,
    /// User picked an item directly (dot, tab)
    GoTo(usize),
    /// User pressed the forward arrow
    Next,
    /// User pressed the back arrow
    Previous,
    /// Quiet period after the last manual navigation ran out
    CooldownElapsed,
    /// The item collection was replaced
    ReplaceItems(NonZeroUsize),
}

impl RotationMessage {
    /// Whether this message is a user navigation (as opposed to a timer)
    pub fn is_manual(&self) -> bool {
        matches!(
            self,
            RotationMessage::GoTo(_) | RotationMessage::Next | RotationMessage::Previous
        )
    }
}
