//! # atile-core - Core Domain Types
//!
//! Foundation crate for the Aesthetic Tile interaction layer. Provides the
//! lead-capture domain types, validation rules, the navigation route tables
//! and active-state resolver, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`LeadDraft`] - Raw form input as typed by the user
//! - [`LeadSubmission`] - A validated, trimmed lead ready for the relay
//! - [`FieldSet`] - Closed set of form shapes (Base, BaseWithPhone)
//! - [`SubmissionStatus`] - Idle / Submitting / Success / Error
//! - [`FieldErrors`] - Per-field validation messages
//! - [`GalleryItem`] - One image of a gallery grid
//!
//! ### Validation (`validation`)
//! - [`validate()`] - Pure draft -> submission check, run on submit only
//!
//! ### Navigation (`navigation`)
//! - [`is_active()`], [`is_services_group_active()`] - Link highlighting rules
//! - [`ActiveNavSet`] - Highlight state derived from the current path
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use atile_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod navigation;
pub mod prelude;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use navigation::{
    current_label, is_active, is_services_group_active, ActiveNavSet, ExternalLink, NavItem,
    PRIMARY_NAV, SERVICE_NAV, SOCIAL_LINKS,
};
pub use types::{
    FieldErrors, FieldSet, FormConfig, GalleryItem, LeadDraft, LeadField, LeadSubmission,
    SubmissionStatus, DEFAULT_SUBJECT,
};
pub use validation::{is_valid_email, validate};
