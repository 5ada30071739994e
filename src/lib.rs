//! Aesthetic Tile - client-side interaction layer
//!
//! Composition root for the website's interaction state. [`Site`] loads the
//! settings, connects the lead relay, and hands out the widget controllers
//! (forms, carousels, observers, menu, lightbox) wired to one shared
//! viewport and one document scroll lock.
//!
//! The building blocks live in the workspace crates, re-exported here:
//! - [`atile_core`] - domain types, validation, navigation tables, errors, logging
//! - [`atile_relay`] - the form-relay HTTP client
//! - [`atile_app`] - state machines, controllers and observers

use std::path::Path;
use std::sync::Arc;

pub use atile_app;
pub use atile_core;
pub use atile_relay;

use atile_app::carousel::KITCHEN_TABS;
use atile_app::config::{load_settings, Settings};
use atile_app::{
    BackToTop, Carousel, FormController, IntersectionEntry, IntersectionObserver, Lightbox,
    MobileMenu, RotationConfig, ScrollLock, ScrollShadow, TabExplorer, Testimonial, Viewport,
};
use atile_core::prelude::*;
use atile_core::{ActiveNavSet, FieldSet, FormConfig};
use atile_relay::{HttpLeadRelay, LeadRelay};

/// Initialize file logging (see [`atile_core::logging::init`])
pub fn init_logging() -> Result<()> {
    atile_core::logging::init()
}

/// One page session: settings, relay, viewport and scroll lock
pub struct Site<R = HttpLeadRelay> {
    settings: Settings,
    relay: Arc<R>,
    viewport: Viewport,
    scroll_lock: ScrollLock,
}

impl Site<HttpLeadRelay> {
    /// Load `.atile/config.toml` under `project_path` and connect the HTTP relay
    pub fn load(project_path: &Path, viewport: Viewport) -> Result<Self> {
        let settings = load_settings(project_path);
        let relay = HttpLeadRelay::new(&settings.relay.endpoint).context("Connecting lead relay")?;
        info!("Lead relay at {}", relay.endpoint());
        Ok(Self::with_relay(settings, relay, viewport))
    }
}

impl<R> Site<R>
where
    R: LeadRelay + Sync + 'static,
{
    pub fn with_relay(settings: Settings, relay: R, viewport: Viewport) -> Self {
        Self {
            settings,
            relay: Arc::new(relay),
            viewport,
            scroll_lock: ScrollLock::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn relay(&self) -> &Arc<R> {
        &self.relay
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    fn rotation_config(&self) -> RotationConfig {
        self.settings.rotation.into()
    }

    // ─────────────────────────────────────────────────────────
    // Lead capture
    // ─────────────────────────────────────────────────────────

    /// The general contact form (name, email, message)
    pub fn contact_form(&self) -> FormController<R> {
        self.lead_form(FieldSet::Base, None)
    }

    /// A lead form with its own field set and optional subject line
    pub fn lead_form(&self, field_set: FieldSet, subject: Option<&str>) -> FormController<R> {
        let subject = subject.unwrap_or(&self.settings.relay.subject);
        FormController::new(FormConfig::new(field_set, subject), Arc::clone(&self.relay))
    }

    // ─────────────────────────────────────────────────────────
    // Rotations
    // ─────────────────────────────────────────────────────────

    pub fn testimonials(&self, items: Vec<Testimonial>) -> Result<Carousel<Testimonial>> {
        Carousel::new(items, self.rotation_config())
    }

    pub fn kitchen_tabs(&self) -> Result<TabExplorer<&'static str>> {
        TabExplorer::new(KITCHEN_TABS.to_vec(), self.rotation_config())
    }

    // ─────────────────────────────────────────────────────────
    // Viewport observers
    // ─────────────────────────────────────────────────────────

    pub fn scroll_shadow(&self) -> ScrollShadow {
        ScrollShadow::from_settings(&self.viewport, &self.settings.scroll)
    }

    pub fn back_to_top(&self) -> BackToTop {
        BackToTop::from_settings(&self.viewport, &self.settings.scroll)
    }

    /// Intersection observer with the site's reveal threshold and margin
    pub fn reveal_observer<F>(&self, callback: F) -> IntersectionObserver
    where
        F: Fn(&IntersectionEntry) + Send + Sync + 'static,
    {
        IntersectionObserver::new(&self.viewport, self.settings.observer.into(), callback)
    }

    // ─────────────────────────────────────────────────────────
    // Navigation and overlays
    // ─────────────────────────────────────────────────────────

    pub fn mobile_menu(&self) -> MobileMenu {
        MobileMenu::new(self.scroll_lock.clone())
    }

    pub fn navigation(&self, current_path: &str) -> ActiveNavSet {
        ActiveNavSet::resolve(current_path)
    }

    pub fn lightbox(&self) -> Lightbox {
        Lightbox::new()
    }
}
