//! Viewport entry notifications.
//!
//! Two sources can tell us an element scrolled into view: the browser's
//! intersection observer, or periodic layout polling where no observer is
//! available. Both sit behind [`VisibilityNotifier`] and both fire at most
//! once per element, after which the element is no longer watched.

use std::collections::BTreeSet;

use tracing::trace;

/// Identifier of an observed element.
pub type ElementId = String;

/// Margins added around the viewport before intersecting, in pixels.
///
/// Negative values shrink the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margin {
    /// The same margin on every side.
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

/// When an element counts as having entered the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Margin around the viewport.
    pub root_margin: Margin,
}

impl VisibilityOptions {
    /// Options for scroll-triggered reveal animations.
    pub fn reveal() -> Self {
        Self {
            threshold: 0.15,
            root_margin: Margin {
                bottom: -100.0,
                ..Margin::default()
            },
        }
    }

    /// Options for lazily loaded images, which start loading just before
    /// they scroll into view.
    pub fn lazy_images() -> Self {
        Self {
            threshold: 0.01,
            root_margin: Margin::uniform(50.0),
        }
    }
}

/// An element's bounding box relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// Viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Returns whether any part of a rectangle is on screen.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.top < self.height
            && rect.bottom() > 0.0
            && rect.left < self.width
            && rect.right() > 0.0
    }

    /// Fraction of `rect` inside the viewport grown by `margin`.
    pub fn intersection_ratio(&self, rect: &Rect, margin: &Margin) -> f64 {
        let top = (-margin.top).max(rect.top);
        let left = (-margin.left).max(rect.left);
        let bottom = (self.height + margin.bottom).min(rect.bottom());
        let right = (self.width + margin.right).min(rect.right());

        let visible = Rect::new(top, left, right - left, bottom - top);
        if visible.width <= 0.0 || visible.height <= 0.0 {
            return 0.0;
        }

        let area = rect.area();
        if area == 0.0 {
            // Zero-size elements count as fully visible once they touch the root.
            return 1.0;
        }
        visible.area() / area
    }
}

/// One entry reported by a native intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    /// Observed element.
    pub target: ElementId,
    /// Whether the element intersects the root.
    pub is_intersecting: bool,
    /// Visible fraction of the element.
    pub ratio: f64,
}

/// Input a notifier reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum VisibilitySignal {
    /// Entries delivered by a native observer.
    Intersections(Vec<IntersectionEntry>),
    /// A layout snapshot taken on scroll or resize.
    Layout {
        /// Current viewport.
        viewport: Viewport,
        /// Bounding boxes of elements.
        rects: Vec<(ElementId, Rect)>,
    },
}

/// Reports elements entering the viewport, once each.
pub trait VisibilityNotifier {
    /// Starts watching an element.
    fn observe(&mut self, target: ElementId);

    /// Stops watching an element.
    fn unobserve(&mut self, target: &str);

    /// Returns the number of elements still watched.
    fn pending(&self) -> usize;

    /// Processes a signal and returns the elements that just entered.
    fn notify(&mut self, signal: &VisibilitySignal) -> Vec<ElementId>;
}

/// Notifier fed by a native intersection observer.
#[derive(Debug, Clone)]
pub struct ObserverNotifier {
    options: VisibilityOptions,
    watched: BTreeSet<ElementId>,
}

impl ObserverNotifier {
    /// Creates a notifier.
    pub fn new(options: VisibilityOptions) -> Self {
        Self {
            options,
            watched: BTreeSet::new(),
        }
    }

    /// Returns the options to configure the native observer with.
    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }
}

impl VisibilityNotifier for ObserverNotifier {
    fn observe(&mut self, target: ElementId) {
        self.watched.insert(target);
    }

    fn unobserve(&mut self, target: &str) {
        self.watched.remove(target);
    }

    fn pending(&self) -> usize {
        self.watched.len()
    }

    fn notify(&mut self, signal: &VisibilitySignal) -> Vec<ElementId> {
        let VisibilitySignal::Intersections(entries) = signal else {
            return Vec::new();
        };

        let mut entered = Vec::new();
        for entry in entries {
            if entry.is_intersecting && self.watched.remove(&entry.target) {
                trace!(element = %entry.target, ratio = entry.ratio, "entered viewport");
                entered.push(entry.target.clone());
            }
        }
        entered
    }
}

/// Notifier that intersects element rectangles itself.
#[derive(Debug, Clone)]
pub struct PollingNotifier {
    options: VisibilityOptions,
    watched: BTreeSet<ElementId>,
}

impl PollingNotifier {
    /// Creates a notifier.
    pub fn new(options: VisibilityOptions) -> Self {
        Self {
            options,
            watched: BTreeSet::new(),
        }
    }
}

impl VisibilityNotifier for PollingNotifier {
    fn observe(&mut self, target: ElementId) {
        self.watched.insert(target);
    }

    fn unobserve(&mut self, target: &str) {
        self.watched.remove(target);
    }

    fn pending(&self) -> usize {
        self.watched.len()
    }

    fn notify(&mut self, signal: &VisibilitySignal) -> Vec<ElementId> {
        let VisibilitySignal::Layout { viewport, rects } = signal else {
            return Vec::new();
        };

        let mut entered = Vec::new();
        for (target, rect) in rects {
            if !self.watched.contains(target) {
                continue;
            }
            let ratio = viewport.intersection_ratio(rect, &self.options.root_margin);
            if ratio > 0.0 && ratio >= self.options.threshold {
                trace!(element = %target, ratio, "entered viewport");
                self.watched.remove(target);
                entered.push(target.clone());
            }
        }
        entered
    }
}

/// Creates the notifier to use given what the page supports.
pub fn notifier(native_observer: bool, options: VisibilityOptions) -> Box<dyn VisibilityNotifier> {
    if native_observer {
        Box::new(ObserverNotifier::new(options))
    } else {
        Box::new(PollingNotifier::new(options))
    }
}
