//! Project category filtering.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SiteError};
use crate::keys::KeyPress;

/// Filter value that shows every project.
pub const ALL: &str = "all";

/// Query parameter mirroring the active filter.
pub const QUERY_PARAM: &str = "filter";

/// Delay between consecutive cards fading in.
pub const STAGGER: Duration = Duration::from_millis(50);

/// Delay before a hidden card is taken out of the layout.
pub const HIDE_DELAY: Duration = Duration::from_millis(300);

/// A project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    /// Card title.
    pub title: String,
    /// Category the card belongs to.
    pub category: String,
}

impl ProjectCard {
    /// Creates a card.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
        }
    }
}

/// What to do with one card after a filter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardUpdate {
    /// Card index in document order.
    pub index: usize,
    /// Whether the card ends up visible.
    pub visible: bool,
    /// When to apply the class/display change.
    pub delay: Duration,
}

/// State of one filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    /// The button's filter value.
    pub filter: String,
    /// Whether this is the active filter.
    pub active: bool,
}

impl ButtonState {
    /// Value of the button's `aria-pressed` attribute.
    pub fn aria_pressed(&self) -> &'static str {
        if self.active {
            "true"
        } else {
            "false"
        }
    }
}

/// Filter buttons plus the cards they filter.
#[derive(Debug, Clone)]
pub struct ProjectFilter {
    buttons: Vec<String>,
    cards: Vec<ProjectCard>,
    active: usize,
}

impl ProjectFilter {
    /// Creates a filter. The first button starts active.
    pub fn new(buttons: Vec<String>, cards: Vec<ProjectCard>) -> Self {
        Self {
            buttons,
            cards,
            active: 0,
        }
    }

    /// Creates a filter with an "all" button followed by each distinct category.
    pub fn from_cards(cards: Vec<ProjectCard>) -> Self {
        let mut buttons = vec![ALL.to_string()];
        for card in &cards {
            if !buttons.contains(&card.category) {
                buttons.push(card.category.clone());
            }
        }
        Self::new(buttons, cards)
    }

    /// Returns the cards.
    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    /// Returns the active filter value.
    pub fn active(&self) -> &str {
        self.buttons.get(self.active).map_or(ALL, String::as_str)
    }

    /// Returns the state of each button.
    pub fn buttons(&self) -> Vec<ButtonState> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, filter)| ButtonState {
                filter: filter.clone(),
                active: i == self.active,
            })
            .collect()
    }

    /// Activates a filter and returns the card updates.
    pub fn apply(&mut self, filter: &str) -> Result<Vec<CardUpdate>> {
        let index = self
            .buttons
            .iter()
            .position(|b| b == filter)
            .ok_or_else(|| SiteError::UnknownCategory(filter.to_string()))?;
        Ok(self.activate(index))
    }

    /// Restores the filter from a page query string such as `?filter=web`.
    ///
    /// Returns `None` when the query names no known filter.
    pub fn apply_query(&mut self, query: &str) -> Option<Vec<CardUpdate>> {
        let wanted = query_value(query, QUERY_PARAM)?;
        self.apply(wanted).ok()
    }

    /// Query parameter to set for the active filter, or `None` to remove it.
    pub fn query_param(&self) -> Option<(&'static str, &str)> {
        let active = self.active();
        if active == ALL {
            None
        } else {
            Some((QUERY_PARAM, active))
        }
    }

    /// Handles a key press on the focused button.
    ///
    /// Arrows move to (and activate) the neighbouring button, wrapping at
    /// the ends. Enter and Space activate the focused button. Returns the
    /// button to focus and the resulting card updates.
    pub fn on_key(&mut self, focused: usize, key: &KeyPress) -> Option<(usize, Vec<CardUpdate>)> {
        let count = self.buttons.len();
        if count == 0 || focused >= count {
            return None;
        }

        let target = match key.key.as_str() {
            "ArrowRight" | "ArrowDown" => (focused + 1) % count,
            "ArrowLeft" | "ArrowUp" => (focused + count - 1) % count,
            "Enter" | " " => focused,
            _ => return None,
        };
        Some((target, self.activate(target)))
    }

    fn activate(&mut self, button: usize) -> Vec<CardUpdate> {
        self.active = button;
        let filter = self.active().to_string();
        debug!(%filter, "filtering projects");

        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let visible = filter == ALL || card.category == filter;
                let delay = if visible {
                    STAGGER * u32::try_from(index).unwrap_or(u32::MAX)
                } else {
                    HIDE_DELAY
                };
                CardUpdate {
                    index,
                    visible,
                    delay,
                }
            })
            .collect()
    }
}

fn query_value<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}
