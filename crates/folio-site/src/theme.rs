//! Light/dark theme preference.
//!
//! The theme comes from the stored preference when one exists, otherwise
//! from the system color scheme. Only explicit user actions are persisted,
//! so a visitor who never touched the toggle keeps following the system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SiteError};
use crate::keys::KeyPress;
use crate::store::PreferenceStore;

/// Storage key of the theme preference.
pub const STORAGE_KEY: &str = "theme-preference";

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// Returns the value stored and set as `data-theme`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Theme matching a system color-scheme preference.
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Accessible label of the toggle while this theme is active.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(SiteError::InvalidTheme(other.to_string())),
        }
    }
}

/// Returns whether a key press is the theme toggle shortcut (Ctrl/Cmd+Shift+T).
pub fn is_toggle_shortcut(key: &KeyPress) -> bool {
    key.command() && key.shift && key.is("T")
}

/// Owns the active theme and its persistence.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolves the initial theme.
    pub fn init(store: S, system_prefers_dark: bool) -> Self {
        let theme = match stored_theme(&store) {
            Some(theme) => theme,
            None => Theme::from_system(system_prefers_dark),
        };
        debug!(%theme, "initial theme");
        Self { store, theme }
    }

    /// Returns the active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns the toggle's accessible label.
    pub fn aria_label(&self) -> &'static str {
        self.theme.toggle_label()
    }

    /// Returns whether the visitor has chosen a theme explicitly.
    pub fn has_explicit_preference(&self) -> bool {
        stored_theme(&self.store).is_some()
    }

    /// Sets the theme as an explicit user choice.
    pub fn set(&mut self, theme: Theme) -> Result<Theme> {
        self.store.set(STORAGE_KEY, theme.as_str())?;
        info!(%theme, "theme set");
        self.theme = theme;
        Ok(theme)
    }

    /// Flips the theme as an explicit user choice.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.theme.toggled())
    }

    /// Handles a key press; toggles on the shortcut.
    pub fn on_key(&mut self, key: &KeyPress) -> Result<Option<Theme>> {
        if is_toggle_shortcut(key) {
            self.toggle().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Follows a system color-scheme change unless the visitor chose a theme.
    pub fn on_system_change(&mut self, prefers_dark: bool) -> Theme {
        if !self.has_explicit_preference() {
            self.theme = Theme::from_system(prefers_dark);
            debug!(theme = %self.theme, "following system theme");
        }
        self.theme
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn stored_theme<S: PreferenceStore>(store: &S) -> Option<Theme> {
    let raw = store.get(STORAGE_KEY)?;
    match raw.parse() {
        Ok(theme) => Some(theme),
        Err(err) => {
            warn!(%err, "ignoring stored theme");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_system_preference_when_nothing_stored() {
        let controller = ThemeController::init(MemoryStore::new(), true);
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.aria_label(), "Switch to light mode");
        assert!(!controller.has_explicit_preference());
    }

    #[test]
    fn test_stored_preference_wins() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "light").unwrap();
        let controller = ThemeController::init(store, true);
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn test_invalid_stored_value_ignored() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "sepia").unwrap();
        let controller = ThemeController::init(store, true);
        assert_eq!(controller.theme(), Theme::Dark);
        assert!(!controller.has_explicit_preference());
    }

    #[test]
    fn test_toggle_persists() {
        let mut controller = ThemeController::init(MemoryStore::new(), false);
        assert_eq!(controller.toggle().unwrap(), Theme::Dark);
        assert_eq!(
            controller.store().get(STORAGE_KEY).as_deref(),
            Some("dark")
        );
        assert_eq!(controller.toggle().unwrap(), Theme::Light);
    }

    #[test]
    fn test_system_change_respects_explicit_choice() {
        let mut controller = ThemeController::init(MemoryStore::new(), false);
        assert_eq!(controller.on_system_change(true), Theme::Dark);

        controller.set(Theme::Light).unwrap();
        assert_eq!(controller.on_system_change(true), Theme::Light);
    }

    #[test]
    fn test_shortcut() {
        let mut controller = ThemeController::init(MemoryStore::new(), false);
        let shortcut = KeyPress::new("T").ctrl().shift();
        assert_eq!(controller.on_key(&shortcut).unwrap(), Some(Theme::Dark));
        assert_eq!(
            controller.on_key(&KeyPress::new("T").meta().shift()).unwrap(),
            Some(Theme::Light)
        );
        assert_eq!(controller.on_key(&KeyPress::new("T").shift()).unwrap(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!(matches!(
            "Dark".parse::<Theme>(),
            Err(SiteError::InvalidTheme(v)) if v == "Dark"
        ));
    }
}
