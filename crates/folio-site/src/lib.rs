//! # folio-site
//!
//! The page behaviors around the contact form: theme preference, the
//! mobile navigation menu and scroll spy, scroll-triggered reveals, lazy
//! images and the project category filter.
//!
//! Nothing here touches a DOM. Each behavior is a small state machine fed
//! page events (clicks, key presses, scroll offsets, intersection reports)
//! and returning the attribute and class changes to apply.
//!
//! ```rust
//! use folio_site::{MemoryStore, Theme, ThemeController};
//!
//! let mut theme = ThemeController::init(MemoryStore::new(), false);
//! assert_eq!(theme.theme(), Theme::Light);
//! assert_eq!(theme.toggle().unwrap(), Theme::Dark);
//! assert_eq!(theme.aria_label(), "Switch to light mode");
//! ```

mod error;
pub mod filter;
mod keys;
pub mod navigation;
pub mod reveal;
mod store;
pub mod theme;
pub mod throttle;
pub mod visibility;

pub use error::{Result, SiteError};
pub use filter::{ButtonState, CardUpdate, ProjectCard, ProjectFilter};
pub use keys::KeyPress;
pub use navigation::{scroll_progress, Click, LinkState, MenuUpdate, NavMenu, ScrollSpy, Section};
pub use reveal::{ImageLoad, LazyImage, LazyImages, Reveal};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore};
pub use theme::{Theme, ThemeController};
pub use throttle::{Debounce, Throttle};
pub use visibility::{
    notifier, IntersectionEntry, ObserverNotifier, PollingNotifier, Rect, Viewport,
    VisibilityNotifier, VisibilityOptions, VisibilitySignal,
};
