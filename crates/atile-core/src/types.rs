//! Core domain types for lead capture and gallery selection

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Subject tag used when a form instance does not configure its own
pub const DEFAULT_SUBJECT: &str = "Aesthetic Tile — New Website Inquiry";

// ─────────────────────────────────────────────────────────────────
// Lead fields
// ─────────────────────────────────────────────────────────────────

/// A single user-editable field of the lead-capture form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Message,
}

impl LeadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::Phone => "phone",
            LeadField::Message => "message",
        }
    }

    /// Label rendered next to the input
    pub fn label(&self) -> &'static str {
        match self {
            LeadField::Name => "Name",
            LeadField::Email => "Email",
            LeadField::Phone => "Phone",
            LeadField::Message => "Message",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which fields a form instance requires.
///
/// Chosen once when the form is configured and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSet {
    /// Name, email and message
    #[default]
    Base,
    /// Name, email, phone and message
    BaseWithPhone,
}

impl FieldSet {
    /// Every field-set variant, for exhaustive checks
    pub const ALL: [FieldSet; 2] = [FieldSet::Base, FieldSet::BaseWithPhone];

    /// Fields in render order
    pub fn fields(&self) -> &'static [LeadField] {
        match self {
            FieldSet::Base => &[LeadField::Name, LeadField::Email, LeadField::Message],
            FieldSet::BaseWithPhone => &[
                LeadField::Name,
                LeadField::Email,
                LeadField::Phone,
                LeadField::Message,
            ],
        }
    }

    pub fn includes(&self, field: LeadField) -> bool {
        self.fields().contains(&field)
    }

    pub fn includes_phone(&self) -> bool {
        matches!(self, FieldSet::BaseWithPhone)
    }

    /// Rows of the message textarea; the phone layout is taller
    pub fn message_rows(&self) -> u8 {
        match self {
            FieldSet::Base => 4,
            FieldSet::BaseWithPhone => 5,
        }
    }
}

/// Immutable per-instance form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    pub field_set: FieldSet,
    pub subject: String,
}

impl FormConfig {
    pub fn new(field_set: FieldSet, subject: impl Into<String>) -> Self {
        Self {
            field_set,
            subject: subject.into(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::new(FieldSet::Base, DEFAULT_SUBJECT)
    }
}

// ─────────────────────────────────────────────────────────────────
// Draft & validated submission
// ─────────────────────────────────────────────────────────────────

/// Raw, unvalidated form input as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: String,
}

impl LeadDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            phone: String::new(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Phone => &self.phone,
            LeadField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LeadField::Name => self.name = value,
            LeadField::Email => self.email = value,
            LeadField::Phone => self.phone = value,
            LeadField::Message => self.message = value,
        }
    }

    /// Reset every field to empty (after a successful submission)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.message.is_empty()
            && self.phone.is_empty()
    }
}

/// A lead that passed validation, trimmed and ready for the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
}

/// Per-field human-readable validation messages, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<LeadField, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: LeadField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: LeadField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: LeadField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Submission lifecycle
// ─────────────────────────────────────────────────────────────────

/// Lifecycle of one form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    /// Whether the request has resolved one way or the other
    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionStatus::Success | SubmissionStatus::Error)
    }

    /// Status line shown under the submit button
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            SubmissionStatus::Success => Some("Thanks! Your message has been sent."),
            SubmissionStatus::Error => {
                Some("Sorry—something went wrong. Please try again or email us directly.")
            }
            SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Sending..."
        } else {
            "Send Message"
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Gallery
// ─────────────────────────────────────────────────────────────────

/// One image in a gallery grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl GalleryItem {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}
