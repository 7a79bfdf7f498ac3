//! Actions representing side effects for the rendering host.
//!
//! The controller owns selection, expansion and search state, but focus
//! movement and panel placement belong to the host. Whenever a transition needs
//! one of those, the controller queues an [`Action`]; [`handle_event`] returns
//! the queue alongside its render flag.
//!
//! [`handle_event`]: crate::app::handle_event
//!
//! # Example
//!
//! ```rust
//! use selectree::app::{Action, modes::FocusStop};
//!
//! let actions = vec![Action::ComputePlacement, Action::MoveFocus(FocusStop::SearchInput)];
//! assert_eq!(actions.len(), 2);
//! ```

use super::modes::FocusStop;

/// Commands for the host after an event has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Position the panel relative to its trigger.
    ///
    /// Emitted on every `Closed → Open` transition.
    ComputePlacement,

    /// Move keyboard focus to a control inside the panel.
    MoveFocus(FocusStop),

    /// Scroll the option list so the row at this visible index is shown.
    ScrollToRow(usize),

    /// Return keyboard focus to the trigger after the panel closed.
    ReturnFocusToTrigger,
}
