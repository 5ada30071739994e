//! Rotation handler
//!
//! Shared by the testimonial carousel and the tab explorer. Any manual
//! navigation pauses auto-advance and (re)starts the cooldown, so repeated
//! clicks debounce the resume.

use atile_core::prelude::*;

use super::{RotationAction, UpdateResult};
use crate::message::RotationMessage;
use crate::state::RotationState;

/// Process one rotation message
pub fn update(state: &mut RotationState, message: RotationMessage) -> UpdateResult<RotationAction> {
    match message {
        RotationMessage::Tick => {
            if !state.is_auto_advancing() {
                trace!("Tick ignored while paused");
                return UpdateResult::none();
            }
            state.advance();
            UpdateResult::none()
        }
        RotationMessage::GoTo(index) => manual_navigation(state, index),
        RotationMessage::Next => manual_navigation(state, state.next_index()),
        RotationMessage::Previous => manual_navigation(state, state.previous_index()),
        RotationMessage::CooldownElapsed => {
            if state.is_auto_advancing() {
                return UpdateResult::none();
            }
            state.resume();
            debug!("Cooldown elapsed, resuming auto-advance at {}", state.active_index());
            UpdateResult::action(RotationAction::StartTicker)
        }
        RotationMessage::ReplaceItems(len) => {
            debug!("Rotation items replaced ({} items)", len);
            state.reset(len);
            UpdateResult::actions(vec![
                RotationAction::CancelCooldown,
                RotationAction::StartTicker,
            ])
        }
    }
}

fn manual_navigation(state: &mut RotationState, index: usize) -> UpdateResult<RotationAction> {
    state.select(index);
    state.pause();
    UpdateResult::actions(vec![
        RotationAction::StopTicker,
        RotationAction::RestartCooldown,
    ])
}
