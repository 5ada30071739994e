//! Viewport model
//!
//! Stands in for the browser window: scroll position, viewport size,
//! document height and the layout rectangles of observed elements.
//! Scroll and resize listeners are registered through RAII
//! [`Subscription`] guards, and intersection observers are evaluated
//! against the same geometry.
//!
//! Callbacks always run after the internal lock is released, so a callback
//! may call back into the viewport.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use atile_core::prelude::*;
use serde::{Deserialize, Serialize};

use crate::observer::{IntersectionEntry, IntersectionOptions};

// ─────────────────────────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in document coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap with `other`; edge contact yields a zero-area rectangle
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left > right || top > bottom {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow by a margin; negative sides shrink
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        Rect::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

/// Pixel offsets applied to the viewport before intersection tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub const fn bottom(px: f64) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: px,
            left: 0.0,
        }
    }

    /// Parse a CSS-style margin such as `"0px 0px -50px 0px"`.
    ///
    /// Accepts one to four pixel values with the usual shorthand expansion.
    pub fn parse(css: &str) -> Result<Self> {
        let values = css
            .split_whitespace()
            .map(|part| {
                let number = part.strip_suffix("px").unwrap_or(part);
                number
                    .parse::<f64>()
                    .map_err(|_| Error::config_invalid(format!("Bad root margin value '{part}'")))
            })
            .collect::<Result<Vec<f64>>>()?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => {
                return Err(Error::config_invalid(format!(
                    "Root margin needs 1 to 4 values, got '{css}'"
                )))
            }
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

/// Identifier of a laid-out element (the DOM `id`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scroll position and sizes, as a browser window reports them
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportMetrics {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
    pub document_height: f64,
}

impl ViewportMetrics {
    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }

    /// Visible part of the document
    pub fn visible_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

// ─────────────────────────────────────────────────────────────────
// Viewport
// ─────────────────────────────────────────────────────────────────

type Listener = Arc<dyn Fn(&ViewportMetrics) + Send + Sync>;
pub(crate) type EntryCallback = Arc<dyn Fn(&IntersectionEntry) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerKind {
    Scroll,
    Resize,
}

struct ObserverRecord {
    options: IntersectionOptions,
    callback: EntryCallback,
    /// Observed elements in observe order, with the last delivered state
    targets: Vec<(ElementId, Option<bool>)>,
}

#[derive(Default)]
struct ViewportInner {
    metrics: ViewportMetrics,
    elements: HashMap<ElementId, Rect>,
    scroll_listeners: BTreeMap<u64, Listener>,
    resize_listeners: BTreeMap<u64, Listener>,
    observers: BTreeMap<u64, ObserverRecord>,
    next_id: u64,
}

/// Callbacks collected under the lock and run after it is released
struct Dispatch {
    metrics: ViewportMetrics,
    listeners: Vec<Listener>,
    entries: Vec<(EntryCallback, IntersectionEntry)>,
}

impl Dispatch {
    fn run(self) {
        for listener in &self.listeners {
            listener(&self.metrics);
        }
        for (callback, entry) in &self.entries {
            callback(entry);
        }
    }
}

impl ViewportInner {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn listeners(&self, kind: ListenerKind) -> Vec<Listener> {
        let map = match kind {
            ListenerKind::Scroll => &self.scroll_listeners,
            ListenerKind::Resize => &self.resize_listeners,
        };
        map.values().cloned().collect()
    }

    fn entry_for(&self, element: &ElementId, options: &IntersectionOptions) -> IntersectionEntry {
        let Some(rect) = self.elements.get(element).copied() else {
            return IntersectionEntry {
                target: element.clone(),
                is_intersecting: false,
                intersection_ratio: 0.0,
                bounding_rect: Rect::default(),
            };
        };

        let root = self.metrics.visible_rect().expand(&options.root_margin);
        let overlap = rect.intersection(&root);
        let intersection_ratio = match overlap {
            None => 0.0,
            Some(_) if rect.area() == 0.0 => 1.0,
            Some(overlap) => (overlap.area() / rect.area()).min(1.0),
        };
        let is_intersecting = if options.threshold <= 0.0 {
            overlap.is_some()
        } else {
            overlap.is_some() && intersection_ratio >= options.threshold
        };

        IntersectionEntry {
            target: element.clone(),
            is_intersecting,
            intersection_ratio,
            bounding_rect: rect,
        }
    }

    /// Entries for targets whose state changed, optionally for one element
    fn collect_entries(&mut self, only: Option<&ElementId>) -> Vec<(EntryCallback, IntersectionEntry)> {
        let mut pending = Vec::new();
        let ids: Vec<u64> = self.observers.keys().copied().collect();

        for id in ids {
            let Some(record) = self.observers.get(&id) else {
                continue;
            };
            let options = record.options;
            let callback = Arc::clone(&record.callback);
            let targets: Vec<ElementId> = record
                .targets
                .iter()
                .map(|(element, _)| element.clone())
                .filter(|element| only.map_or(true, |o| o == element))
                .collect();

            for element in targets {
                let placed = self.elements.contains_key(&element);
                let entry = self.entry_for(&element, &options);
                let Some(record) = self.observers.get_mut(&id) else {
                    continue;
                };
                let Some(slot) = record.targets.iter_mut().find(|(e, _)| *e == element) else {
                    continue;
                };

                let deliver = match slot.1 {
                    // Not yet delivered: wait until the element is laid out
                    None => placed,
                    Some(previous) => previous != entry.is_intersecting,
                };
                if deliver {
                    slot.1 = Some(entry.is_intersecting);
                    pending.push((Arc::clone(&callback), entry));
                }
            }
        }
        pending
    }
}

/// Shared handle to the viewport model
#[derive(Clone, Default)]
pub struct Viewport {
    inner: Arc<Mutex<ViewportInner>>,
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("metrics", &self.metrics())
            .finish_non_exhaustive()
    }
}

impl Viewport {
    /// Window of `width` x `height` over a document of `document_height`, scrolled to the top
    pub fn new(width: f64, height: f64, document_height: f64) -> Self {
        let viewport = Self::default();
        viewport.lock().metrics = ViewportMetrics {
            scroll_y: 0.0,
            width,
            height,
            document_height,
        };
        viewport
    }

    fn lock(&self) -> MutexGuard<'_, ViewportInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.lock().metrics
    }

    pub fn scroll_y(&self) -> f64 {
        self.lock().metrics.scroll_y
    }

    /// Scroll to `y`, clamped to the scrollable range.
    ///
    /// Returns the resulting offset. Listeners only hear about actual moves;
    /// a non-finite `y` leaves the offset where it is.
    pub fn scroll_to(&self, y: f64) -> f64 {
        let dispatch = {
            let mut inner = self.lock();
            if !y.is_finite() {
                return inner.metrics.scroll_y;
            }
            let target = y.clamp(0.0, inner.metrics.max_scroll());
            if target == inner.metrics.scroll_y {
                return target;
            }
            inner.metrics.scroll_y = target;
            Dispatch {
                metrics: inner.metrics,
                listeners: inner.listeners(ListenerKind::Scroll),
                entries: inner.collect_entries(None),
            }
        };
        let scroll_y = dispatch.metrics.scroll_y;
        dispatch.run();
        scroll_y
    }

    /// Change the window size
    pub fn resize(&self, width: f64, height: f64) {
        let (resize, scroll) = {
            let mut inner = self.lock();
            if inner.metrics.width == width && inner.metrics.height == height {
                return;
            }
            inner.metrics.width = width;
            inner.metrics.height = height;
            let scroll = Self::clamp_scroll(&mut inner);
            let resize = Dispatch {
                metrics: inner.metrics,
                listeners: inner.listeners(ListenerKind::Resize),
                entries: inner.collect_entries(None),
            };
            (resize, scroll)
        };
        resize.run();
        if let Some(scroll) = scroll {
            scroll.run();
        }
    }

    /// Change the document height (content loaded or collapsed)
    pub fn set_document_height(&self, document_height: f64) {
        let scroll = {
            let mut inner = self.lock();
            inner.metrics.document_height = document_height;
            Self::clamp_scroll(&mut inner)
        };
        if let Some(scroll) = scroll {
            scroll.run();
        }
    }

    /// Pull the scroll offset back into range, producing a scroll dispatch if it moved
    fn clamp_scroll(inner: &mut ViewportInner) -> Option<Dispatch> {
        let clamped = inner.metrics.scroll_y.min(inner.metrics.max_scroll());
        if clamped == inner.metrics.scroll_y {
            return None;
        }
        inner.metrics.scroll_y = clamped;
        Some(Dispatch {
            metrics: inner.metrics,
            listeners: inner.listeners(ListenerKind::Scroll),
            entries: inner.collect_entries(None),
        })
    }

    /// Lay out (or move) an element
    pub fn place_element(&self, id: impl Into<ElementId>, rect: Rect) {
        let id = id.into();
        let dispatch = {
            let mut inner = self.lock();
            inner.elements.insert(id.clone(), rect);
            Dispatch {
                metrics: inner.metrics,
                listeners: Vec::new(),
                entries: inner.collect_entries(Some(&id)),
            }
        };
        dispatch.run();
    }

    /// Remove an element from the layout
    pub fn remove_element(&self, id: &str) {
        let dispatch = {
            let mut inner = self.lock();
            let Some((id, _)) = inner.elements.remove_entry(id) else {
                return;
            };
            Dispatch {
                metrics: inner.metrics,
                listeners: Vec::new(),
                entries: inner.collect_entries(Some(&id)),
            }
        };
        dispatch.run();
    }

    /// Document-space rectangle of an element, if laid out
    pub fn element_rect(&self, id: &str) -> Option<Rect> {
        self.lock().elements.get(id).copied()
    }

    /// Listen for scroll moves until the returned guard is dropped
    pub fn on_scroll<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ViewportMetrics) + Send + Sync + 'static,
    {
        self.subscribe(ListenerKind::Scroll, Arc::new(listener))
    }

    /// Listen for size changes until the returned guard is dropped
    pub fn on_resize<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ViewportMetrics) + Send + Sync + 'static,
    {
        self.subscribe(ListenerKind::Resize, Arc::new(listener))
    }

    fn subscribe(&self, kind: ListenerKind, listener: Listener) -> Subscription {
        let mut inner = self.lock();
        let id = inner.allocate_id();
        match kind {
            ListenerKind::Scroll => inner.scroll_listeners.insert(id, listener),
            ListenerKind::Resize => inner.resize_listeners.insert(id, listener),
        };
        Subscription {
            inner: Arc::downgrade(&self.inner),
            kind,
            id,
        }
    }

    /// Registered scroll and resize listeners
    pub fn listener_count(&self) -> usize {
        let inner = self.lock();
        inner.scroll_listeners.len() + inner.resize_listeners.len()
    }

    /// Connected intersection observers
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    // ─────────────────────────────────────────────────────────
    // Intersection observer registry
    // ─────────────────────────────────────────────────────────

    pub(crate) fn connect_observer(&self, options: IntersectionOptions, callback: EntryCallback) -> u64 {
        let mut inner = self.lock();
        let id = inner.allocate_id();
        inner.observers.insert(
            id,
            ObserverRecord {
                options,
                callback,
                targets: Vec::new(),
            },
        );
        id
    }

    pub(crate) fn observe(&self, observer: u64, element: ElementId) {
        let dispatch = {
            let mut inner = self.lock();
            let Some(record) = inner.observers.get_mut(&observer) else {
                return;
            };
            if record.targets.iter().any(|(e, _)| *e == element) {
                return;
            }
            record.targets.push((element.clone(), None));
            let entries = inner.collect_entries(Some(&element));
            Dispatch {
                metrics: inner.metrics,
                listeners: Vec::new(),
                entries,
            }
        };
        dispatch.run();
    }

    pub(crate) fn unobserve(&self, observer: u64, element: &str) {
        let mut inner = self.lock();
        if let Some(record) = inner.observers.get_mut(&observer) {
            record.targets.retain(|(e, _)| e.as_str() != element);
        }
    }

    pub(crate) fn disconnect_observer(&self, observer: u64) {
        if self.lock().observers.remove(&observer).is_some() {
            trace!("Intersection observer {} disconnected", observer);
        }
    }
}

/// Registration guard for a scroll or resize listener.
///
/// Dropping the guard unregisters the listener.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    inner: Weak<Mutex<ViewportInner>>,
    kind: ListenerKind,
    id: u64,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
        match self.kind {
            ListenerKind::Scroll => inner.scroll_listeners.remove(&self.id),
            ListenerKind::Resize => inner.resize_listeners.remove(&self.id),
        };
    }
}
