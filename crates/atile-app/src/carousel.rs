//! Testimonial carousel and tab explorer
//!
//! Both are thin views over a [`RotationController`]: the items live here,
//! the active index and timers live in the rotation task.

use std::borrow::Cow;

use atile_core::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::rotation::{RotationConfig, RotationController};
use crate::state::RotationState;

/// Quotes longer than this many characters are cut and given an ellipsis
pub const MAX_QUOTE_CHARS: usize = 280;

/// Viewport width below which one card is shown
pub const SINGLE_CARD_BELOW: f64 = 768.0;

/// Viewport width below which two cards are shown
pub const DOUBLE_CARD_BELOW: f64 = 1280.0;

/// Tab ids of the kitchen backsplash explorer, in display order
pub const KITCHEN_TABS: [&str; 3] = ["materials", "styles", "layouts"];

/// One customer quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Testimonial {
    pub fn new(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Quote as displayed on a card
    pub fn display_quote(&self) -> Cow<'_, str> {
        truncate_quote(&self.quote)
    }
}

/// Number of cards that fit side by side at a viewport width
pub fn visible_cards(viewport_width: f64) -> usize {
    if viewport_width < SINGLE_CARD_BELOW {
        1
    } else if viewport_width < DOUBLE_CARD_BELOW {
        2
    } else {
        3
    }
}

/// Shorten a quote to [`MAX_QUOTE_CHARS`] characters.
///
/// The cut is trimmed of trailing whitespace before `...` is appended.
/// Quotes at or under the limit are returned unchanged.
pub fn truncate_quote(quote: &str) -> Cow<'_, str> {
    match quote.char_indices().nth(MAX_QUOTE_CHARS) {
        None => Cow::Borrowed(quote),
        Some((cut, _)) => Cow::Owned(format!("{}...", quote[..cut].trim())),
    }
}

// ─────────────────────────────────────────────────────────────────
// Carousel
// ─────────────────────────────────────────────────────────────────

/// Auto-advancing carousel over a non-empty list of items
pub struct Carousel<T> {
    items: Vec<T>,
    rotation: RotationController,
}

impl<T> Carousel<T> {
    /// Start rotating `items`; fails on an empty list.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(items: Vec<T>, config: RotationConfig) -> Result<Self> {
        let rotation = RotationController::start(items.len(), config)?;
        Ok(Self { items, rotation })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn active_index(&self) -> usize {
        self.rotation.active_index()
    }

    pub fn active(&self) -> Option<&T> {
        self.items.get(self.active_index())
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.rotation.is_auto_advancing()
    }

    /// One flag per item; exactly one is set
    pub fn dots(&self) -> Vec<bool> {
        let active = self.active_index();
        (0..self.items.len()).map(|i| i == active).collect()
    }

    /// Items on screen, starting at the active one and wrapping around
    pub fn visible_window(&self, viewport_width: f64) -> Vec<&T> {
        let count = visible_cards(viewport_width).min(self.items.len());
        let start = self.active_index();
        (0..count)
            .map(|offset| &self.items[(start + offset) % self.items.len()])
            .collect()
    }

    pub fn next(&self) -> Result<()> {
        self.rotation.next()
    }

    pub fn previous(&self) -> Result<()> {
        self.rotation.previous()
    }

    pub fn go_to(&self, index: usize) -> Result<()> {
        self.rotation.go_to(index)
    }

    /// Swap in a new item list; the rotation starts over from the first item.
    ///
    /// The items are swapped only after the rotation has reset, so the
    /// active index always points into the current list.
    pub async fn set_items(&mut self, items: Vec<T>) -> Result<()> {
        self.rotation.replace_items(items.len()).await?;
        self.items = items;
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<RotationState> {
        self.rotation.subscribe()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tab explorer
// ─────────────────────────────────────────────────────────────────

/// Auto-cycling tab set addressed by tab id
pub struct TabExplorer<T> {
    tabs: Vec<T>,
    rotation: RotationController,
}

impl<T: PartialEq + std::fmt::Debug> TabExplorer<T> {
    pub fn new(tabs: Vec<T>, config: RotationConfig) -> Result<Self> {
        let rotation = RotationController::start(tabs.len(), config)?;
        Ok(Self { tabs, rotation })
    }

    pub fn tabs(&self) -> &[T] {
        &self.tabs
    }

    pub fn active_tab(&self) -> Option<&T> {
        self.tabs.get(self.rotation.active_index())
    }

    pub fn is_active(&self, tab: &T) -> bool {
        self.active_tab() == Some(tab)
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.rotation.is_auto_advancing()
    }

    /// Select a tab by id.
    ///
    /// Returns `false` (and changes nothing) for an unknown id.
    pub fn select(&self, tab: &T) -> Result<bool> {
        match self.tabs.iter().position(|t| t == tab) {
            Some(index) => {
                self.rotation.go_to(index)?;
                Ok(true)
            }
            None => {
                debug!("Ignoring unknown tab {:?}", tab);
                Ok(false)
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RotationState> {
        self.rotation.subscribe()
    }
}

impl TabExplorer<&'static str> {
    /// Materials / styles / layouts explorer of the kitchen page
    pub fn kitchen(config: RotationConfig) -> Result<Self> {
        Self::new(KITCHEN_TABS.to_vec(), config)
    }
}
