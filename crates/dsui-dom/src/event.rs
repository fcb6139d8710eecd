#![forbid(unsafe_code)]

//! Canonical input, signal and swap events.
//!
//! The embedding layer (the browser binding or a test) turns raw document
//! events into these values before handing them to a component. Events are
//! generic over the node handle type `N` of the [`Dom`](crate::Dom) they
//! refer to.
//!
//! # Design Notes
//!
//! - Only `keydown` is modelled; key repeat and release are irrelevant to
//!   dismissal and focus trapping.
//! - `Modifiers` use bitflags for easy combination.
//! - Swap events carry only the two facts components consume: the target
//!   element and whether the incoming payload is empty.

use bitflags::bitflags;

/// A materialized document event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<N> {
    /// A pointer click whose innermost target is `target`.
    Click {
        /// The element the click landed on.
        target: N,
    },

    /// A key press delivered to the document.
    Key(KeyEvent),

    /// A form control's `change` event.
    Change {
        /// The control whose value changed.
        target: N,
    },

    /// A named custom event dispatched on the document body.
    Signal(String),

    /// The replacement transport is about to swap content into `target`.
    BeforeSwap(SwapEvent<N>),

    /// The replacement transport has swapped content into `target`.
    AfterSwap {
        /// The element whose content was replaced.
        target: N,
    },

    /// The transport pushed a new location into history.
    HistoryPush {
        /// Path (possibly with query string) that became current.
        path: String,
    },
}

impl<N> Event<N> {
    /// Short, stable name used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::Key(_) => "keydown",
            Self::Change { .. } => "change",
            Self::Signal(_) => "signal",
            Self::BeforeSwap(_) => "before-swap",
            Self::AfterSwap { .. } => "after-swap",
            Self::HistoryPush { .. } => "history-push",
        }
    }

    /// Convenience constructor for a click.
    #[must_use]
    pub fn click(target: N) -> Self {
        Self::Click { target }
    }

    /// Convenience constructor for a signal event.
    #[must_use]
    pub fn signal(name: impl Into<String>) -> Self {
        Self::Signal(name.into())
    }
}

/// Payload of a before-swap event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapEvent<N> {
    /// Element whose content is about to be replaced.
    pub target: N,
    /// Whether the server responded with an empty body.
    pub empty_payload: bool,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes the components distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Escape key.
    Escape,
    /// Tab key (Shift+Tab arrives as `Tab` with [`Modifiers::SHIFT`]).
    Tab,
    /// Enter/Return key.
    Enter,
    /// Any other named key.
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value onto a key code.
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
