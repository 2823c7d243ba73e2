//! Scroll-triggered reveal animations and lazily loaded images.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::visibility::{ElementId, VisibilityNotifier, VisibilitySignal};

/// Class added to an element once it has scrolled into view.
pub const VISIBLE_CLASS: &str = "is-visible";

/// Class added to an image once its source has been swapped in.
pub const LOADED_CLASS: &str = "loaded";

/// Reveals `data-animate` elements as they enter the viewport.
pub struct Reveal {
    notifier: Box<dyn VisibilityNotifier>,
    revealed: Vec<ElementId>,
}

impl Reveal {
    /// Creates a reveal controller watching the given elements.
    pub fn new(
        mut notifier: Box<dyn VisibilityNotifier>,
        targets: impl IntoIterator<Item = ElementId>,
    ) -> Self {
        for target in targets {
            notifier.observe(target);
        }
        Self {
            notifier,
            revealed: Vec::new(),
        }
    }

    /// Returns the elements that should get [`VISIBLE_CLASS`] now.
    pub fn handle(&mut self, signal: &VisibilitySignal) -> Vec<ElementId> {
        let entered = self.notifier.notify(signal);
        self.revealed.extend(entered.iter().cloned());
        entered
    }

    /// Returns whether an element has been revealed.
    pub fn is_revealed(&self, target: &str) -> bool {
        self.revealed.iter().any(|r| r == target)
    }

    /// Returns the number of elements still hidden.
    pub fn pending(&self) -> usize {
        self.notifier.pending()
    }
}

impl std::fmt::Debug for Reveal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reveal")
            .field("revealed", &self.revealed)
            .field("pending", &self.notifier.pending())
            .finish()
    }
}

/// An image whose real source is deferred in data attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyImage {
    /// Element id.
    pub id: ElementId,
    /// Value of `data-src`.
    pub data_src: String,
    /// Value of `data-srcset`, if any.
    #[serde(default)]
    pub data_srcset: Option<String>,
}

/// Attribute changes that load a deferred image.
///
/// The page sets `src` (and `srcset`), removes both data attributes and
/// adds [`LOADED_CLASS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoad {
    /// Element id.
    pub id: ElementId,
    /// New `src`.
    pub src: String,
    /// New `srcset`, if any.
    pub srcset: Option<String>,
}

/// Loads deferred images as they approach the viewport.
pub struct LazyImages {
    notifier: Box<dyn VisibilityNotifier>,
    images: BTreeMap<ElementId, LazyImage>,
}

impl LazyImages {
    /// Creates a loader watching the given images.
    pub fn new(
        mut notifier: Box<dyn VisibilityNotifier>,
        images: impl IntoIterator<Item = LazyImage>,
    ) -> Self {
        let mut pending = BTreeMap::new();
        for image in images {
            notifier.observe(image.id.clone());
            pending.insert(image.id.clone(), image);
        }
        Self {
            notifier,
            images: pending,
        }
    }

    /// Returns the images to load now.
    pub fn handle(&mut self, signal: &VisibilitySignal) -> Vec<ImageLoad> {
        self.notifier
            .notify(signal)
            .into_iter()
            .filter_map(|id| self.images.remove(&id))
            .map(|image| {
                debug!(id = %image.id, src = %image.data_src, "loading image");
                ImageLoad {
                    id: image.id,
                    src: image.data_src,
                    srcset: image.data_srcset,
                }
            })
            .collect()
    }

    /// Returns the number of images not yet loaded.
    pub fn remaining(&self) -> usize {
        self.images.len()
    }
}

impl std::fmt::Debug for LazyImages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyImages")
            .field("images", &self.images)
            .finish_non_exhaustive()
    }
}
