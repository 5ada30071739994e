//! Configuration types for the interaction layer
//!
//! Defines:
//! - `Settings` - Everything read from `.atile/config.toml`
//! - One section struct per concern (relay, rotation, scroll, observer, contact)

use std::time::Duration;

use atile_core::prelude::*;
use atile_core::DEFAULT_SUBJECT;
use atile_relay::FORM_RELAY_ENDPOINT;
use serde::{Deserialize, Serialize};

use crate::viewport::RootMargin;

/// Global interaction settings (from `.atile/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub relay: RelaySettings,

    #[serde(default)]
    pub rotation: RotationSettings,

    #[serde(default)]
    pub scroll: ScrollSettings,

    #[serde(default)]
    pub observer: ObserverSettings,

    #[serde(default)]
    pub contact: ContactSettings,
}

impl Settings {
    /// Reject settings the controllers cannot run with.
    ///
    /// Parsing accepts any well-typed file; this catches values that are
    /// well-typed but meaningless (a zero interval, a ratio above one).
    pub fn validate(&self) -> Result<()> {
        atile_relay::parse_endpoint(&self.relay.endpoint)?;

        if self.rotation.interval_ms == 0 {
            return Err(Error::config_invalid("rotation.interval_ms must be positive"));
        }
        if self.rotation.cooldown_ms == 0 {
            return Err(Error::config_invalid("rotation.cooldown_ms must be positive"));
        }
        if self.scroll.shadow_threshold.is_nan() || self.scroll.shadow_threshold < 0.0 {
            return Err(Error::config_invalid(
                "scroll.shadow_threshold must not be negative",
            ));
        }
        if !(self.scroll.back_to_top_ratio > 0.0 && self.scroll.back_to_top_ratio <= 1.0) {
            return Err(Error::config_invalid(
                "scroll.back_to_top_ratio must be in (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.observer.threshold) {
            return Err(Error::config_invalid("observer.threshold must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Form-relay endpoint and the subject line attached to every lead
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelaySettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Default `_subject` for forms that do not set their own
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            subject: default_subject(),
        }
    }
}

fn default_endpoint() -> String {
    FORM_RELAY_ENDPOINT.to_string()
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

/// Carousel and tab rotation timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RotationSettings {
    /// Time between automatic advances
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Quiet period after manual navigation before auto-advance resumes
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl RotationSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    8_000
}

fn default_cooldown_ms() -> u64 {
    15_000
}

/// Scroll-derived indicators
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScrollSettings {
    /// Header shadow appears once scrolled strictly past this many pixels
    #[serde(default = "default_shadow_threshold")]
    pub shadow_threshold: f64,

    /// Back-to-top appears past this fraction of the scrollable distance
    #[serde(default = "default_back_to_top_ratio")]
    pub back_to_top_ratio: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            shadow_threshold: default_shadow_threshold(),
            back_to_top_ratio: default_back_to_top_ratio(),
        }
    }
}

fn default_shadow_threshold() -> f64 {
    100.0
}

fn default_back_to_top_ratio() -> f64 {
    0.75
}

/// Defaults for intersection observers created by the site
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ObserverSettings {
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_root_margin")]
    pub root_margin: RootMargin,
}

impl Default for ObserverSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            root_margin: default_root_margin(),
        }
    }
}

fn default_threshold() -> f64 {
    0.1
}

fn default_root_margin() -> RootMargin {
    RootMargin::bottom(-50.0)
}

/// Business contact details rendered in the header, footer and CTAs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactSettings {
    #[serde(default = "default_phone_label")]
    pub phone_label: String,

    #[serde(default = "default_phone_href")]
    pub phone_href: String,

    #[serde(default = "default_email")]
    pub email: String,
}

impl ContactSettings {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            phone_label: default_phone_label(),
            phone_href: default_phone_href(),
            email: default_email(),
        }
    }
}

fn default_phone_label() -> String {
    "(502) 650-7014".to_string()
}

fn default_phone_href() -> String {
    "tel:+15026507014".to_string()
}

fn default_email() -> String {
    "office@aesthetictile.com".to_string()
}
