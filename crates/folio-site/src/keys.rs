//! Keyboard input as delivered by the page.

/// A key press with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    /// The key value, e.g. `"Escape"`, `"ArrowRight"`, `"T"`.
    pub key: String,
    /// Control held.
    pub ctrl: bool,
    /// Command/meta held.
    pub meta: bool,
    /// Shift held.
    pub shift: bool,
}

impl KeyPress {
    /// Creates an unmodified key press.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Adds the control modifier.
    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Adds the meta modifier.
    #[must_use]
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Adds the shift modifier.
    #[must_use]
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Control on most platforms, Command on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Returns whether the key matches.
    pub fn is(&self, key: &str) -> bool {
        self.key == key
    }
}
