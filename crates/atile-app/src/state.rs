//! State owned by each interaction controller

use std::num::NonZeroUsize;

use atile_core::{FieldErrors, FormConfig, LeadDraft, LeadField, SubmissionStatus};

// ─────────────────────────────────────────────────────────────────
// Lead form
// ─────────────────────────────────────────────────────────────────

/// Complete state of one lead form instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub config: FormConfig,
    pub draft: LeadDraft,
    pub status: SubmissionStatus,
    pub errors: FieldErrors,
}

impl FormState {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Validation message shown under a field, if any
    pub fn field_error(&self, field: LeadField) -> Option<&str> {
        self.errors.get(field)
    }

    /// The submit button is disabled while a request is in flight
    pub fn can_submit(&self) -> bool {
        !self.status.is_submitting()
    }
}

// ─────────────────────────────────────────────────────────────────
// Rotation
// ─────────────────────────────────────────────────────────────────

/// Active item of a rotating collection.
///
/// `active_index` is always in `[0, len)`; the collection is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    active_index: usize,
    len: NonZeroUsize,
    auto_advancing: bool,
    /// Bumped every time the collection is replaced
    generation: u64,
}

impl RotationState {
    /// Start at the first item, auto-advancing
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            active_index: 0,
            len,
            auto_advancing: true,
            generation: 0,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advancing
    }

    /// Number of collection replacements so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_index == index
    }

    pub fn next_index(&self) -> usize {
        (self.active_index + 1) % self.len()
    }

    pub fn previous_index(&self) -> usize {
        (self.active_index + self.len() - 1) % self.len()
    }

    /// Move to `index`, wrapping indices past the end
    pub(crate) fn select(&mut self, index: usize) {
        self.active_index = index % self.len();
    }

    pub(crate) fn advance(&mut self) {
        self.active_index = self.next_index();
    }

    pub(crate) fn pause(&mut self) {
        self.auto_advancing = false;
    }

    pub(crate) fn resume(&mut self) {
        self.auto_advancing = true;
    }

    /// Start over for a new collection
    pub(crate) fn reset(&mut self, len: NonZeroUsize) {
        *self = Self {
            generation: self.generation.wrapping_add(1),
            ..Self::new(len)
        };
    }
}
