//! Mobile navigation menu, active-section highlighting and scroll helpers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::keys::KeyPress;

/// Scroll offset past which the navbar gets its `scrolled` shadow.
pub const NAVBAR_SHADOW_OFFSET: f64 = 20.0;

/// Scroll offset past which the back-to-top button shows.
pub const BACK_TO_TOP_OFFSET: f64 = 300.0;

/// Extra distance above a section at which it already counts as active.
pub const SECTION_LEAD: f64 = 100.0;

/// Returns whether the navbar should carry the `scrolled` class.
pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SHADOW_OFFSET
}

/// Returns whether the back-to-top button should be visible.
pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_OFFSET
}

/// How far down the page the reader has scrolled, as a percentage.
///
/// Clamped to `0.0..=100.0`. A page that does not scroll reports `0.0`.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Returns whether a key press is the jump-to-top shortcut (Ctrl/Cmd+Home).
pub fn is_back_to_top_shortcut(key: &KeyPress) -> bool {
    key.command() && key.is("Home")
}

/// Scroll position for an in-page anchor link.
///
/// Returns `None` for bare `#` links and for hrefs that are not in-page
/// anchors; those keep their default behavior. The target lands just
/// below the fixed navbar.
pub fn anchor_scroll_target(href: &str, target_top: f64, navbar_height: f64) -> Option<f64> {
    if href == "#" || !href.starts_with('#') {
        return None;
    }
    Some(target_top - navbar_height)
}

/// Where a click landed relative to the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// The menu toggle button.
    Toggle,
    /// A link inside the menu.
    Link,
    /// Somewhere else inside the navbar container.
    Navbar,
    /// Anywhere outside the navbar container.
    Outside,
}

/// Effect of a menu event on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuUpdate {
    /// Whether the menu is now open.
    pub open: bool,
    /// Whether focus should move back to the toggle.
    pub focus_toggle: bool,
}

/// The collapsible mobile menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Creates a closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Value of the toggle's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    /// Flips the menu.
    pub fn toggle(&mut self) -> MenuUpdate {
        self.open = !self.open;
        debug!(open = self.open, "navigation menu toggled");
        self.update(false)
    }

    /// Handles a click anywhere on the page.
    pub fn on_click(&mut self, click: Click) -> MenuUpdate {
        match click {
            Click::Toggle => self.toggle(),
            Click::Link | Click::Outside => {
                self.open = false;
                self.update(false)
            }
            Click::Navbar => self.update(false),
        }
    }

    /// Handles a key press; Escape closes an open menu and returns focus.
    pub fn on_key(&mut self, key: &KeyPress) -> Option<MenuUpdate> {
        if !key.is("Escape") || !self.open {
            return None;
        }
        self.open = false;
        Some(self.update(true))
    }

    fn update(&self, focus_toggle: bool) -> MenuUpdate {
        MenuUpdate {
            open: self.open,
            focus_toggle,
        }
    }
}

/// A page section linked from the navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section id, linked as `#id`.
    pub id: String,
    /// Offset of the section from the top of the document.
    pub top: f64,
    /// Section height.
    pub height: f64,
}

impl Section {
    /// Creates a section.
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// State of one navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    /// The link's href.
    pub href: String,
    /// Whether the link carries the `active` class.
    pub active: bool,
}

impl LinkState {
    /// Value of the `aria-current` attribute, or `None` to remove it.
    pub fn aria_current(&self) -> Option<&'static str> {
        self.active.then_some("page")
    }
}

/// Highlights the link of the section currently scrolled to.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<Section>,
    links: Vec<String>,
    active: Option<String>,
}

impl ScrollSpy {
    /// Creates a scroll spy over sections and navigation link hrefs.
    pub fn new(sections: Vec<Section>, links: Vec<String>) -> Self {
        Self {
            sections,
            links,
            active: None,
        }
    }

    /// Returns the id of the active section.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recomputes the active section for a scroll offset.
    ///
    /// When several sections match, the last one in document order wins.
    /// When none matches, the previous highlight stays.
    pub fn on_scroll(&mut self, scroll_y: f64, navbar_height: f64) -> Option<&str> {
        let current = self
            .sections
            .iter()
            .rev()
            .find(|section| {
                let top = section.top - navbar_height - SECTION_LEAD;
                scroll_y > top && scroll_y <= top + section.height
            });

        if let Some(section) = current {
            if self.active.as_deref() != Some(section.id.as_str()) {
                debug!(section = %section.id, "active section changed");
                self.active = Some(section.id.clone());
            }
        }
        self.active()
    }

    /// Returns the state of each link.
    pub fn links(&self) -> Vec<LinkState> {
        self.links
            .iter()
            .map(|href| LinkState {
                href: href.clone(),
                active: self
                    .active
                    .as_deref()
                    .is_some_and(|id| href.strip_prefix('#') == Some(id)),
            })
            .collect()
    }
}
