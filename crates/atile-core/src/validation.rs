//! Lead validation rules
//!
//! Validation is a pure function of the draft and the form configuration.
//! It runs on every submit attempt and never on individual keystrokes.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{FieldErrors, FieldSet, FormConfig, LeadDraft, LeadField, LeadSubmission};

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const PHONE_MIN_CHARS: usize = 10;

pub const NAME_TOO_SHORT: &str = "Please enter at least two characters";
pub const EMAIL_INVALID: &str = "Enter a valid email address";
pub const MESSAGE_TOO_SHORT: &str = "Tell us a little more about your project";
pub const PHONE_BAD_CHARS: &str = "Only numbers and basic phone characters allowed";
pub const PHONE_TOO_SHORT: &str = "Enter a valid phone number";

/// Lightweight RFC 5322 address grammar: a dotted local part, `@`, and one or
/// more DNS labels ending in an alphabetic TLD of two or more letters.
///
/// Leading dots and consecutive dots in the local part are rejected
/// separately since the regex engine has no look-around.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("Email regex pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9()+\-\s]*$").expect("Phone regex pattern is valid"));

/// Check a single address against the lightweight grammar
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}

/// Validate a draft against a form configuration.
///
/// Returns the trimmed submission, or every failing field with its message.
pub fn validate(draft: &LeadDraft, config: &FormConfig) -> Result<LeadSubmission, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = draft.name.trim();
    if name.chars().count() < NAME_MIN_CHARS {
        errors.insert(LeadField::Name, NAME_TOO_SHORT);
    }

    let email = draft.email.trim();
    if !is_valid_email(email) {
        errors.insert(LeadField::Email, EMAIL_INVALID);
    }

    let message = draft.message.trim();
    if message.chars().count() < MESSAGE_MIN_CHARS {
        errors.insert(LeadField::Message, MESSAGE_TOO_SHORT);
    }

    let phone = match config.field_set {
        FieldSet::Base => None,
        FieldSet::BaseWithPhone => {
            let phone = draft.phone.trim();
            if let Some(message) = phone_error(phone) {
                errors.insert(LeadField::Phone, message);
            }
            Some(phone.to_string())
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LeadSubmission {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        phone,
        subject: config.subject.clone(),
    })
}

/// First failing phone rule, checked in order: charset then length
fn phone_error(phone: &str) -> Option<&'static str> {
    if !PHONE_PATTERN.is_match(phone) {
        Some(PHONE_BAD_CHARS)
    } else if phone.chars().count() < PHONE_MIN_CHARS {
        Some(PHONE_TOO_SHORT)
    } else {
        None
    }
}
