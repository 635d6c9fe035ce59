#![forbid(unsafe_code)]

//! Input decoding: keyboard keys and popover button clicks.
//!
//! Arrow keys navigate through a debounce, Escape closes immediately, and
//! popover buttons are recognized by their CSS class.

use crate::popover::{CLOSE_CLASS, FINISH_CLASS, NEXT_CLASS, PREV_CLASS};

/// Keys the tour cares about, decoded from `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Left,
    Right,
    Escape,
    /// Any key the tour does not react to.
    Other,
}

impl KeyCode {
    /// Decode a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// A navigation request for the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Previous,
    Next,
    Close,
}

/// How a key press reaches the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRoute {
    /// Goes through the trailing-edge debounce.
    Debounced(NavAction),
    /// Applied right away.
    Immediate(NavAction),
    Ignored,
}

/// Routing table: arrows debounced, Escape immediate, the rest ignored.
#[must_use]
pub const fn route_key(key: KeyCode) -> KeyRoute {
    match key {
        KeyCode::Left => KeyRoute::Debounced(NavAction::Previous),
        KeyCode::Right => KeyRoute::Debounced(NavAction::Next),
        KeyCode::Escape => KeyRoute::Immediate(NavAction::Close),
        _ => KeyRoute::Ignored,
    }
}

/// A click on one of the popover's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopoverAction {
    Prev,
    Next,
    Finish,
    Close,
}

impl PopoverAction {
    /// Decode the click target's class list. When several tour classes are
    /// present, prev wins over next, next over finish, finish over close.
    #[must_use]
    pub fn from_classes<'a, I>(classes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found: Option<Self> = None;
        for class in classes {
            let action = match class {
                PREV_CLASS => Self::Prev,
                NEXT_CLASS => Self::Next,
                FINISH_CLASS => Self::Finish,
                CLOSE_CLASS => Self::Close,
                _ => continue,
            };
            found = Some(match found {
                Some(prev) if prev.priority() <= action.priority() => prev,
                _ => action,
            });
        }
        found
    }

    /// Decode a whitespace-separated `class` attribute.
    #[must_use]
    pub fn from_class_attr(attr: &str) -> Option<Self> {
        Self::from_classes(attr.split_ascii_whitespace())
    }

    #[must_use]
    pub const fn nav(self) -> NavAction {
        match self {
            Self::Prev => NavAction::Previous,
            Self::Next => NavAction::Next,
            Self::Finish | Self::Close => NavAction::Close,
        }
    }

    const fn priority(self) -> u8 {
        match self {
            Self::Prev => 0,
            Self::Next => 1,
            Self::Finish => 2,
            Self::Close => 3,
        }
    }
}
