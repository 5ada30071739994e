//! Test utilities for relay consumers
//!
//! Provides [`ScriptedRelay`], an in-memory relay whose answers are scripted
//! ahead of time and which records every payload it receives.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use atile_core::prelude::*;
use tokio::sync::Semaphore;

use crate::client::LeadRelay;
use crate::payload::RelayPayload;

/// Scripted answer for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedOutcome {
    /// Relay answers with an ok status
    Accept,
    /// Relay answers with a non-success status
    Reject(u16),
    /// Request never reaches the relay
    Unreachable(String),
}

impl ScriptedOutcome {
    fn into_result(self) -> Result<()> {
        match self {
            ScriptedOutcome::Accept => Ok(()),
            ScriptedOutcome::Reject(status) => Err(Error::relay_status(status)),
            ScriptedOutcome::Unreachable(message) => Err(Error::relay_transport(message)),
        }
    }
}

/// Releases gated submissions one at a time
#[derive(Debug, Clone)]
pub struct RelayGate(Arc<Semaphore>);

impl RelayGate {
    /// Let the oldest waiting submission answer
    pub fn release(&self) {
        self.0.add_permits(1);
    }
}

/// In-memory relay with scripted outcomes.
///
/// Outcomes are consumed in order; once the script is exhausted every
/// submission gets the fallback outcome.
#[derive(Debug)]
pub struct ScriptedRelay {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    fallback: ScriptedOutcome,
    received: Mutex<Vec<RelayPayload>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedRelay {
    /// Relay that accepts everything
    pub fn accepting() -> Self {
        Self::with_fallback(ScriptedOutcome::Accept)
    }

    /// Relay that rejects everything with `status`
    pub fn rejecting(status: u16) -> Self {
        Self::with_fallback(ScriptedOutcome::Reject(status))
    }

    /// Relay that cannot be reached
    pub fn unreachable() -> Self {
        Self::with_fallback(ScriptedOutcome::Unreachable("connection refused".into()))
    }

    pub fn with_fallback(fallback: ScriptedOutcome) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            received: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Queue outcomes answered before the fallback applies
    pub fn then(self, outcome: ScriptedOutcome) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(outcome);
        self
    }

    /// Hold every answer until the returned gate releases it
    pub fn gated(mut self) -> (Self, RelayGate) {
        let semaphore = Arc::new(Semaphore::new(0));
        self.gate = Some(semaphore.clone());
        (self, RelayGate(semaphore))
    }

    /// Number of submissions received so far (answered or not)
    pub fn calls(&self) -> usize {
        self.received.lock().expect("received lock poisoned").len()
    }

    /// Copies of every payload received so far
    pub fn received(&self) -> Vec<RelayPayload> {
        self.received
            .lock()
            .expect("received lock poisoned")
            .clone()
    }
}

impl LeadRelay for ScriptedRelay {
    async fn submit(&self, payload: &RelayPayload) -> Result<()> {
        self.received
            .lock()
            .expect("received lock poisoned")
            .push(payload.clone());

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|_| Error::ChannelClosed)?
                .forget();
        }

        let outcome = self
            .script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        outcome.into_result()
    }
}
