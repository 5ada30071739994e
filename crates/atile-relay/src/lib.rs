//! # atile-relay - Lead Relay Boundary
//!
//! Delivers validated leads to the external form-relay service over HTTP.
//! The relay owns storage and spam filtering; this crate only shapes the
//! wire payload and reports success or failure.
//!
//! Depends on [`atile_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Wire Format
//! - [`RelayPayload`] - JSON body (`name`, `email`, `message`, `phone?`, `_subject`, `_gotcha`)
//!
//! ### Client
//! - [`LeadRelay`] - Send-able relay trait used by the form controller
//! - [`HttpLeadRelay`] - reqwest-backed implementation

pub mod client;
pub mod payload;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{parse_endpoint, HttpLeadRelay, LeadRelay, FORM_RELAY_ENDPOINT};
pub use payload::RelayPayload;
