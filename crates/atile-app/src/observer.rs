//! Visibility and scroll observers
//!
//! - [`IntersectionObserver`] - reports elements entering or leaving the viewport
//! - [`ScrollShadow`] - header shadow once the page is scrolled past a threshold
//! - [`BackToTop`] - button shown near the end of long pages
//! - [`scroll_to_hash`] / [`scroll_to_top`] - programmatic scrolling
//!
//! Every observer registers with the [`Viewport`] on creation and
//! unregisters when dropped.

use std::sync::Arc;

use atile_core::prelude::*;
use tokio::sync::watch;

use crate::config::{ObserverSettings, ScrollSettings};
use crate::viewport::{ElementId, Rect, RootMargin, Subscription, Viewport, ViewportMetrics};

// ─────────────────────────────────────────────────────────────────
// Intersection
// ─────────────────────────────────────────────────────────────────

/// Intersection test parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionOptions {
    /// Fraction of the element that must be visible, in `[0, 1]`
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        ObserverSettings::default().into()
    }
}

impl From<ObserverSettings> for IntersectionOptions {
    fn from(settings: ObserverSettings) -> Self {
        Self {
            threshold: settings.threshold,
            root_margin: settings.root_margin,
        }
    }
}

/// One visibility report for one element
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
    pub bounding_rect: Rect,
}

/// Reports visibility changes of observed elements.
///
/// The callback receives an initial entry for each element once it is laid
/// out, then one entry every time the element crosses the threshold. Entries
/// for one element always arrive in order. Dropping the observer
/// disconnects it.
pub struct IntersectionObserver {
    viewport: Viewport,
    id: u64,
}

impl IntersectionObserver {
    pub fn new<F>(viewport: &Viewport, options: IntersectionOptions, callback: F) -> Self
    where
        F: Fn(&IntersectionEntry) + Send + Sync + 'static,
    {
        let id = viewport.connect_observer(options, Arc::new(callback));
        Self {
            viewport: viewport.clone(),
            id,
        }
    }

    /// Start observing an element; observing it twice has no effect
    pub fn observe(&self, element: impl Into<ElementId>) {
        self.viewport.observe(self.id, element.into());
    }

    /// Stop observing an element; unknown elements are ignored
    pub fn unobserve(&self, element: &str) {
        self.viewport.unobserve(self.id, element);
    }

    pub fn disconnect(self) {}
}

impl Drop for IntersectionObserver {
    fn drop(&mut self) {
        self.viewport.disconnect_observer(self.id);
    }
}

// ─────────────────────────────────────────────────────────────────
// Scroll shadow
// ─────────────────────────────────────────────────────────────────

/// Scroll position and whether it is past the shadow threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedViewportState {
    pub scroll_y: f64,
    pub exceeds_threshold: bool,
}

impl ObservedViewportState {
    pub fn at(scroll_y: f64, threshold: f64) -> Self {
        Self {
            scroll_y,
            exceeds_threshold: scroll_y > threshold,
        }
    }
}

/// Header shadow flag, true while scrolled strictly past the threshold.
///
/// Computed eagerly on creation so a page restored mid-scroll starts with
/// the right value.
pub struct ScrollShadow {
    state: watch::Receiver<ObservedViewportState>,
    _scroll: Subscription,
}

impl ScrollShadow {
    pub fn new(viewport: &Viewport, threshold: f64) -> Self {
        let (tx, state) = watch::channel(ObservedViewportState::at(viewport.scroll_y(), threshold));
        let scroll = viewport.on_scroll(move |metrics| {
            tx.send_replace(ObservedViewportState::at(metrics.scroll_y, threshold));
        });
        Self {
            state,
            _scroll: scroll,
        }
    }

    pub fn from_settings(viewport: &Viewport, settings: &ScrollSettings) -> Self {
        Self::new(viewport, settings.shadow_threshold)
    }

    pub fn has_shadow(&self) -> bool {
        self.state.borrow().exceeds_threshold
    }

    pub fn state(&self) -> ObservedViewportState {
        *self.state.borrow()
    }

    /// Receiver notified on every scroll move
    pub fn subscribe(&self) -> watch::Receiver<ObservedViewportState> {
        self.state.clone()
    }
}

// ─────────────────────────────────────────────────────────────────
// Back to top
// ─────────────────────────────────────────────────────────────────

/// Whether the back-to-top button shows for these metrics
pub fn back_to_top_visible(metrics: &ViewportMetrics, ratio: f64) -> bool {
    metrics.scroll_y > metrics.max_scroll() * ratio
}

/// Back-to-top button visibility, tracked across scroll and resize
pub struct BackToTop {
    viewport: Viewport,
    visible: watch::Receiver<bool>,
    _scroll: Subscription,
    _resize: Subscription,
}

impl BackToTop {
    pub fn new(viewport: &Viewport, ratio: f64) -> Self {
        let (tx, visible) = watch::channel(back_to_top_visible(&viewport.metrics(), ratio));
        let tx = Arc::new(tx);

        let update = move |tx: &watch::Sender<bool>, metrics: &ViewportMetrics| {
            tx.send_if_modified(|shown| {
                let next = back_to_top_visible(metrics, ratio);
                let changed = *shown != next;
                *shown = next;
                changed
            });
        };

        let scroll_tx = Arc::clone(&tx);
        let scroll = viewport.on_scroll(move |metrics| update(scroll_tx.as_ref(), metrics));
        let resize = viewport.on_resize(move |metrics| update(tx.as_ref(), metrics));

        Self {
            viewport: viewport.clone(),
            visible,
            _scroll: scroll,
            _resize: resize,
        }
    }

    pub fn from_settings(viewport: &Viewport, settings: &ScrollSettings) -> Self {
        Self::new(viewport, settings.back_to_top_ratio)
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.clone()
    }

    /// The button's click handler
    pub fn activate(&self) {
        scroll_to_top(&self.viewport);
    }
}

// ─────────────────────────────────────────────────────────────────
// Programmatic scrolling
// ─────────────────────────────────────────────────────────────────

/// Scroll so the element named by `hash` sits `offset` pixels below the top.
///
/// `hash` must start with `#`; anything else, and ids with no laid-out
/// element, are ignored. Returns the resulting scroll offset.
pub fn scroll_to_hash(viewport: &Viewport, hash: &str, offset: f64) -> Option<f64> {
    let id = hash.strip_prefix('#')?;
    let Some(rect) = viewport.element_rect(id) else {
        debug!("No element for anchor {}", hash);
        return None;
    };
    Some(viewport.scroll_to(rect.y - offset))
}

pub fn scroll_to_top(viewport: &Viewport) {
    viewport.scroll_to(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn page() -> Viewport {
        Viewport::new(1280.0, 800.0, 4000.0)
    }

    fn recorder() -> (
        Arc<Mutex<Vec<(String, bool)>>>,
        impl Fn(&IntersectionEntry) + Send + Sync + 'static,
    ) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let callback = move |entry: &IntersectionEntry| {
            sink.lock()
                .unwrap()
                .push((entry.target.to_string(), entry.is_intersecting));
        };
        (log, callback)
    }

    #[test]
    fn test_initial_entry_then_changes_only() {
        let viewport = page();
        viewport.place_element("hero", Rect::new(0.0, 0.0, 1280.0, 600.0));
        viewport.place_element("gallery", Rect::new(0.0, 2000.0, 1280.0, 600.0));
        let (log, callback) = recorder();
        let observer = IntersectionObserver::new(&viewport, IntersectionOptions::default(), callback);

        observer.observe("hero");
        observer.observe("gallery");
        viewport.scroll_to(10.0);
        viewport.scroll_to(1800.0);

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                ("hero".to_string(), true),
                ("gallery".to_string(), false),
                ("hero".to_string(), false),
                ("gallery".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_negative_bottom_margin_delays_entry() {
        let viewport = page();
        // Top edge 20px above the viewport bottom: inside the 50px margin
        viewport.place_element("cta", Rect::new(0.0, 780.0, 1280.0, 100.0));
        let (log, callback) = recorder();
        let observer = IntersectionObserver::new(&viewport, IntersectionOptions::default(), callback);

        observer.observe("cta");
        assert_eq!(log.lock().unwrap().last(), Some(&("cta".to_string(), false)));

        viewport.scroll_to(100.0);
        assert_eq!(log.lock().unwrap().last(), Some(&("cta".to_string(), true)));
    }

    #[test]
    fn test_threshold_ratio() {
        let viewport = page();
        viewport.place_element("card", Rect::new(0.0, 700.0, 1280.0, 1000.0));
        let options = IntersectionOptions {
            threshold: 0.5,
            root_margin: RootMargin::default(),
        };
        let entries = Arc::new(Mutex::new(Vec::new()));
        let sink = entries.clone();
        let observer = IntersectionObserver::new(&viewport, options, move |e| {
            sink.lock().unwrap().push(e.clone())
        });

        observer.observe("card");
        viewport.scroll_to(500.0);

        let entries = entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_intersecting);
        assert!((entries[0].intersection_ratio - 0.1).abs() < 1e-9);
        assert!(entries[1].is_intersecting);
        assert!((entries[1].intersection_ratio - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_element_laid_out_after_observe() {
        let viewport = page();
        let (log, callback) = recorder();
        let observer = IntersectionObserver::new(&viewport, IntersectionOptions::default(), callback);

        observer.observe("late");
        assert!(log.lock().unwrap().is_empty());

        viewport.place_element("late", Rect::new(0.0, 100.0, 100.0, 100.0));
        assert_eq!(*log.lock().unwrap(), vec![("late".to_string(), true)]);

        viewport.remove_element("late");
        assert_eq!(log.lock().unwrap().last(), Some(&("late".to_string(), false)));
    }

    #[test]
    fn test_unobserve_and_disconnect() {
        let viewport = page();
        viewport.place_element("a", Rect::new(0.0, 0.0, 100.0, 100.0));
        let (log, callback) = recorder();
        let observer = IntersectionObserver::new(&viewport, IntersectionOptions::default(), callback);
        observer.observe("a");
        observer.observe("a");
        observer.unobserve("missing");
        assert_eq!(log.lock().unwrap().len(), 1);

        observer.unobserve("a");
        viewport.scroll_to(2000.0);
        assert_eq!(log.lock().unwrap().len(), 1);

        assert_eq!(viewport.observer_count(), 1);
        observer.disconnect();
        assert_eq!(viewport.observer_count(), 0);
    }

    #[test]
    fn test_callback_may_reenter_viewport() {
        let viewport = page();
        viewport.place_element("a", Rect::new(0.0, 0.0, 100.0, 100.0));
        let handle = viewport.clone();
        let observer = IntersectionObserver::new(&viewport, IntersectionOptions::default(), move |_| {
            handle.scroll_y();
        });
        observer.observe("a");
        viewport.scroll_to(3000.0);
    }

    #[test]
    fn test_scroll_shadow_threshold_is_strict() {
        let viewport = page();
        let shadow = ScrollShadow::new(&viewport, 100.0);
        assert!(!shadow.has_shadow());

        viewport.scroll_to(100.0);
        assert!(!shadow.has_shadow());

        viewport.scroll_to(101.0);
        assert!(shadow.has_shadow());
        assert_eq!(shadow.state().scroll_y, 101.0);

        viewport.scroll_to(0.0);
        assert!(!shadow.has_shadow());
    }

    #[test]
    fn test_scroll_shadow_is_eager() {
        let viewport = page();
        viewport.scroll_to(450.0);
        let shadow = ScrollShadow::from_settings(&viewport, &ScrollSettings::default());
        assert!(shadow.has_shadow());
    }

    #[test]
    fn test_scroll_shadow_unregisters_on_drop() {
        let viewport = page();
        let shadow = ScrollShadow::new(&viewport, 100.0);
        assert_eq!(viewport.listener_count(), 1);
        drop(shadow);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_back_to_top_past_three_quarters() {
        let viewport = page();
        let button = BackToTop::from_settings(&viewport, &ScrollSettings::default());
        assert_eq!(viewport.listener_count(), 2);

        // Scrollable distance is 3200, so the cut-off is 2400
        viewport.scroll_to(2400.0);
        assert!(!button.is_visible());
        viewport.scroll_to(2401.0);
        assert!(button.is_visible());

        button.activate();
        assert_eq!(viewport.scroll_y(), 0.0);
        assert!(!button.is_visible());
    }

    #[test]
    fn test_back_to_top_recomputed_on_resize() {
        let viewport = page();
        viewport.scroll_to(2300.0);
        let button = BackToTop::new(&viewport, 0.75);
        assert!(!button.is_visible());

        // Taller window: scrollable distance 2800, cut-off 2100
        viewport.resize(1280.0, 1200.0);
        assert!(button.is_visible());
    }

    #[test]
    fn test_short_page_never_shows_back_to_top() {
        let viewport = Viewport::new(1280.0, 800.0, 600.0);
        let button = BackToTop::new(&viewport, 0.75);
        viewport.scroll_to(300.0);
        assert!(!button.is_visible());
    }

    #[test]
    fn test_scroll_to_hash() {
        let viewport = page();
        viewport.place_element("estimate", Rect::new(0.0, 1500.0, 1280.0, 300.0));

        assert_eq!(scroll_to_hash(&viewport, "#estimate", 80.0), Some(1420.0));
        assert_eq!(viewport.scroll_y(), 1420.0);

        assert_eq!(scroll_to_hash(&viewport, "estimate", 0.0), None);
        assert_eq!(scroll_to_hash(&viewport, "#missing", 0.0), None);
        assert_eq!(viewport.scroll_y(), 1420.0);
    }

    #[test]
    fn test_scroll_to_hash_clamps_near_top() {
        let viewport = page();
        viewport.scroll_to(900.0);
        viewport.place_element("top", Rect::new(0.0, 20.0, 1280.0, 100.0));
        assert_eq!(scroll_to_hash(&viewport, "#top", 80.0), Some(0.0));
    }
}
