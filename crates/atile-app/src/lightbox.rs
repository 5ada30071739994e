//! Gallery lightbox selection

use atile_core::prelude::*;
use atile_core::GalleryItem;

/// Where a click inside the open overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the image
    Backdrop,
    /// The image or its caption
    Content,
    CloseButton,
}

/// Single-selection overlay over a gallery.
///
/// Selecting while open replaces the selection; overlays never stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox<T = GalleryItem> {
    selected: Option<T>,
}

impl<T> Lightbox<T> {
    pub fn new() -> Self {
        Self { selected: None }
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Open the overlay on `item`
    pub fn select(&mut self, item: T) {
        if self.selected.replace(item).is_some() {
            trace!("Lightbox selection replaced");
        }
    }

    /// Close the overlay
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Route a click; content clicks never reach the close handler.
    ///
    /// Returns whether the overlay closed.
    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop | ClickTarget::CloseButton if self.is_open() => {
                self.clear();
                true
            }
            _ => false,
        }
    }
}
