//! Panel, focus and key types for the controller state machine.
//!
//! # State Machine
//!
//! A controller is in one of two panel states:
//! - **Closed**: Only the trigger is interactive
//! - **Open**: The panel is shown and keyboard commands are active
//!
//! While open, Tab cycles focus among [`FocusStop`]s inside the panel and
//! never leaves it.
//!
//! # Example
//!
//! ```rust
//! use selectree::app::modes::{FocusStop, PanelState};
//!
//! let panel = PanelState::Open;
//! assert!(panel.is_open());
//! assert_ne!(FocusStop::SearchInput, FocusStop::OptionList);
//! ```

/// Whether the panel is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Focusable controls inside an open panel, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusStop {
    /// The search box, present when the controller is searchable.
    SearchInput,
    /// The option list, present when it has visible rows.
    OptionList,
    /// Multi-select footer button.
    SelectAllButton,
    /// Multi-select footer button.
    ClearButton,
}

/// Keyboard keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
    /// Shift+Tab.
    BackTab,
}

impl Key {
    /// Parses a key name as used in scripts, e.g. `"down"` or `"shift+tab"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "down" | "arrowdown" => Some(Self::ArrowDown),
            "up" | "arrowup" => Some(Self::ArrowUp),
            "left" | "arrowleft" => Some(Self::ArrowLeft),
            "right" | "arrowright" => Some(Self::ArrowRight),
            "home" => Some(Self::Home),
            "end" => Some(Self::End),
            "enter" => Some(Self::Enter),
            "space" | " " => Some(Self::Space),
            "escape" | "esc" => Some(Self::Escape),
            "tab" => Some(Self::Tab),
            "backtab" | "shift+tab" => Some(Self::BackTab),
            _ => None,
        }
    }
}
