//! Update functions for the interaction state machines (TEA pattern)
//!
//! Handlers are pure: they mutate state and describe side effects as
//! actions. The controllers in [`crate::form`] and [`crate::rotation`]
//! own the runtime and perform those actions.

pub mod form;
pub mod rotation;


use atile_relay::RelayPayload;

/// Side effect requested by the form handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Issue exactly one relay request with this payload
    SendLead(RelayPayload),
}

/// Side effect requested by the rotation handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAction {
    /// Cancel the auto-advance timer
    StopTicker,
    /// (Re)start the auto-advance timer from a full interval
    StartTicker,
    /// Cancel any pending cooldown and start a new one
    RestartCooldown,
    /// Cancel any pending cooldown
    CancelCooldown,
}

/// Result of processing a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult<A> {
    /// Actions for the controller to perform, in order
    pub actions: Vec<A>,
}

impl<A> Default for UpdateResult<A> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<A> UpdateResult<A> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
        }
    }

    pub fn actions(actions: Vec<A>) -> Self {
        Self { actions }
    }

    pub fn is_none(&self) -> bool {
        self.actions.is_empty()
    }
}
