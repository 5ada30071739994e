//! atile-app - Interaction state for the Aesthetic Tile website
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the lead
//! form and the timed rotations, the tokio-driven controllers around them,
//! the viewport model with its scroll and intersection observers, the mobile
//! menu and its scroll lock, the gallery lightbox, and configuration loading.

pub mod carousel;
pub mod config;
pub mod form;
pub mod handler;
pub mod lightbox;
pub mod menu;
pub mod message;
pub mod observer;
pub mod rotation;
pub mod scroll_lock;
pub mod state;
pub mod viewport;

// Re-export primary types
pub use carousel::{Carousel, TabExplorer, Testimonial};
pub use config::Settings;
pub use form::{FormController, SubmitOutcome};
pub use handler::{FormAction, RotationAction, UpdateResult};
pub use lightbox::{ClickTarget, Lightbox};
pub use menu::MobileMenu;
pub use message::{FormMessage, RotationMessage};
pub use observer::{BackToTop, IntersectionEntry, IntersectionObserver, IntersectionOptions, ScrollShadow};
pub use rotation::{RotationConfig, RotationController};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use state::{FormState, RotationState};
pub use viewport::{ElementId, Rect, RootMargin, Subscription, Viewport, ViewportMetrics};
