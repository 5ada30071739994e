//! Lead form handler
//!
//! Validation runs on submit only; typing never produces errors. Field
//! errors are replaced wholesale on every submit attempt.

use atile_core::prelude::*;
use atile_core::{validate, LeadField, SubmissionStatus};
use atile_relay::RelayPayload;

use super::{FormAction, UpdateResult};
use crate::message::FormMessage;
use crate::state::FormState;

/// Process one form message
pub fn update(state: &mut FormState, message: FormMessage) -> UpdateResult<FormAction> {
    match message {
        FormMessage::EditField { field, value } => handle_edit(state, field, value),
        FormMessage::Submit => handle_submit(state),
        FormMessage::SubmissionSucceeded => handle_succeeded(state),
        FormMessage::SubmissionFailed { reason } => handle_failed(state, reason),
        FormMessage::Retry => handle_retry(state),
    }
}

fn handle_edit(state: &mut FormState, field: LeadField, value: String) -> UpdateResult<FormAction> {
    if !state.config.field_set.includes(field) {
        trace!("Ignoring edit of {} on a form without that field", field);
        return UpdateResult::none();
    }
    state.draft.set(field, value);
    UpdateResult::none()
}

fn handle_submit(state: &mut FormState) -> UpdateResult<FormAction> {
    if state.status.is_submitting() {
        debug!("Submit ignored: a submission is already in flight");
        return UpdateResult::none();
    }

    match validate(&state.draft, &state.config) {
        Ok(submission) => {
            state.errors.clear();
            state.status = SubmissionStatus::Submitting;
            debug!("Lead validated, sending to relay");
            UpdateResult::action(FormAction::SendLead(RelayPayload::from(submission)))
        }
        Err(errors) => {
            debug!("Lead rejected by validation: {}", errors);
            state.errors = errors;
            UpdateResult::none()
        }
    }
}

fn handle_succeeded(state: &mut FormState) -> UpdateResult<FormAction> {
    if !state.status.is_submitting() {
        warn!("Ignoring relay success with no submission in flight");
        return UpdateResult::none();
    }
    state.draft.clear();
    state.status = SubmissionStatus::Success;
    info!("Lead submitted ({})", state.config.subject);
    UpdateResult::none()
}

fn handle_failed(state: &mut FormState, reason: String) -> UpdateResult<FormAction> {
    if !state.status.is_submitting() {
        warn!("Ignoring relay failure with no submission in flight: {}", reason);
        return UpdateResult::none();
    }
    // Draft is kept so the user can resubmit without retyping
    state.status = SubmissionStatus::Error;
    debug!("Submission settled with error: {}", reason);
    UpdateResult::none()
}

fn handle_retry(state: &mut FormState) -> UpdateResult<FormAction> {
    if state.status.is_settled() {
        state.status = SubmissionStatus::Idle;
    }
    UpdateResult::none()
}
