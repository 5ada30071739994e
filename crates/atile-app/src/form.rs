//! Lead form controller
//!
//! Owns one form instance: the draft, the submission status, and at most
//! one in-flight relay request. State changes are published on a watch
//! channel so a view can re-render from [`FormController::subscribe`].
//!
//! Dropping the controller aborts the in-flight request; a relay answer
//! arriving afterwards is never applied.

use std::sync::{Arc, Mutex, PoisonError};

use atile_core::prelude::*;
use atile_core::{FieldErrors, FormConfig, LeadField, SubmissionStatus};
use atile_relay::{LeadRelay, RelayPayload};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::handler::{self, FormAction};
use crate::message::FormMessage;
use crate::state::FormState;

/// What happened to a submit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the relay request was issued
    Sent,
    /// Validation failed; nothing was sent
    Invalid(FieldErrors),
    /// A submission was already in flight; nothing was sent
    AlreadySubmitting,
}

/// Controller for one lead form.
///
/// Must be used from within a tokio runtime: submitting spawns the relay
/// request as a task.
pub struct FormController<R> {
    relay: Arc<R>,
    state: Arc<watch::Sender<FormState>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl<R> FormController<R>
where
    R: LeadRelay + Sync + 'static,
{
    pub fn new(config: FormConfig, relay: Arc<R>) -> Self {
        let (state, _) = watch::channel(FormState::new(config));
        Self {
            relay,
            state: Arc::new(state),
            in_flight: Mutex::new(None),
        }
    }

    /// Update one field of the draft
    pub fn edit(&self, field: LeadField, value: impl Into<String>) {
        self.dispatch(FormMessage::EditField {
            field,
            value: value.into(),
        });
    }

    /// Validate the draft and, if valid, send it to the relay.
    ///
    /// Returns immediately; the relay answer arrives asynchronously and is
    /// observable through [`Self::subscribe`] or [`Self::settled`].
    pub fn submit(&self) -> SubmitOutcome {
        let result = self.dispatch(FormMessage::Submit);

        let Some(FormAction::SendLead(payload)) = result.actions.into_iter().next() else {
            let state = self.state.borrow();
            return if state.status.is_submitting() {
                SubmitOutcome::AlreadySubmitting
            } else {
                SubmitOutcome::Invalid(state.errors.clone())
            };
        };

        self.spawn_send(payload);
        SubmitOutcome::Sent
    }

    /// Dismiss the success or error line
    pub fn retry(&self) {
        self.dispatch(FormMessage::Retry);
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state.borrow().status
    }

    /// Copy of the full form state
    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Wait until no submission is in flight and return the status
    pub async fn settled(&self) -> SubmissionStatus {
        let mut rx = self.state.subscribe();
        let settled = rx
            .wait_for(|state| !state.status.is_submitting())
            .await
            .map(|state| state.status);
        settled.unwrap_or_else(|_| self.status())
    }

    fn dispatch(&self, message: FormMessage) -> handler::UpdateResult<FormAction> {
        let mut result = handler::UpdateResult::none();
        self.state.send_modify(|state| {
            result = handler::form::update(state, message);
        });
        result
    }

    fn spawn_send(&self, payload: RelayPayload) {
        let relay = Arc::clone(&self.relay);
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            let message = match relay.submit(&payload).await.context("Lead submission failed") {
                Ok(()) => FormMessage::SubmissionSucceeded,
                Err(e) => FormMessage::SubmissionFailed {
                    reason: e.to_string(),
                },
            };
            state.send_modify(|state| {
                handler::form::update(state, message);
            });
        });

        let previous = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            // Only reachable once the earlier request settled
            previous.abort();
        }
    }
}

impl<R> Drop for FormController<R> {
    fn drop(&mut self) {
        let handle = self
            .in_flight
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if !handle.is_finished() {
                debug!("Form dropped with a submission in flight, abandoning it");
            }
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atile_core::FieldSet;
    use atile_relay::test_utils::{ScriptedOutcome, ScriptedRelay};
    use std::time::Duration;
    use tokio_test::{assert_pending, task};

    fn filled(relay: ScriptedRelay) -> (FormController<ScriptedRelay>, Arc<ScriptedRelay>) {
        let relay = Arc::new(relay);
        let form = FormController::new(
            FormConfig::new(FieldSet::Base, "Test Subject"),
            Arc::clone(&relay),
        );
        form.edit(LeadField::Name, "John Doe");
        form.edit(LeadField::Email, "john@example.com");
        form.edit(LeadField::Message, "This is a test message for the form");
        (form, relay)
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let (form, relay) = filled(ScriptedRelay::accepting());

        assert_eq!(form.submit(), SubmitOutcome::Sent);
        assert_eq!(form.status(), SubmissionStatus::Submitting);

        assert_eq!(form.settled().await, SubmissionStatus::Success);
        assert!(form.snapshot().draft.is_empty());
        assert_eq!(relay.calls(), 1);
        assert_eq!(relay.received()[0].subject, "Test Subject");
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_draft() {
        let (form, relay) = filled(ScriptedRelay::rejecting(500));

        form.submit();

        assert_eq!(form.settled().await, SubmissionStatus::Error);
        assert_eq!(form.snapshot().draft.name, "John Doe");
        assert_eq!(relay.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let (form, relay) = filled(ScriptedRelay::accepting());
        form.edit(LeadField::Email, "john@");

        let outcome = form.submit();

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation errors, got {outcome:?}");
        };
        assert!(errors.contains(LeadField::Email));
        assert_eq!(form.status(), SubmissionStatus::Idle);
        tokio::task::yield_now().await;
        assert_eq!(relay.calls(), 0);
    }

    #[tokio::test]
    async fn test_double_submit_sends_once() {
        let (relay, gate) = ScriptedRelay::accepting().gated();
        let (form, relay) = filled(relay);

        assert_eq!(form.submit(), SubmitOutcome::Sent);
        assert_eq!(form.submit(), SubmitOutcome::AlreadySubmitting);

        let mut settled = task::spawn(form.settled());
        assert_pending!(settled.poll());

        gate.release();
        assert_eq!(settled.await, SubmissionStatus::Success);
        assert_eq!(relay.calls(), 1);
    }

    #[tokio::test]
    async fn test_retry_after_error_then_success() {
        let relay = ScriptedRelay::accepting().then(ScriptedOutcome::Unreachable("offline".into()));
        let (form, relay) = filled(relay);

        form.submit();
        assert_eq!(form.settled().await, SubmissionStatus::Error);

        form.retry();
        assert_eq!(form.status(), SubmissionStatus::Idle);

        assert_eq!(form.submit(), SubmitOutcome::Sent);
        assert_eq!(form.settled().await, SubmissionStatus::Success);
        assert_eq!(relay.calls(), 2);
    }

    #[tokio::test]
    async fn test_answer_after_drop_is_not_applied() {
        let (relay, gate) = ScriptedRelay::accepting().gated();
        let (form, relay) = filled(relay);
        let mut rx = form.subscribe();

        form.submit();
        tokio::task::yield_now().await;
        drop(form);

        gate.release();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(rx.borrow_and_update().status, SubmissionStatus::Submitting);
        assert!(rx.changed().await.is_err());
        assert_eq!(relay.calls(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_each_transition() {
        let (relay, gate) = ScriptedRelay::accepting().gated();
        let (form, _relay) = filled(relay);
        let mut rx = form.subscribe();
        rx.borrow_and_update();

        form.submit();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().status.submit_label(),
            "Sending..."
        );

        gate.release();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().status, SubmissionStatus::Success);
    }
}
