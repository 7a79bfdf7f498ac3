//! Event handling and state transition logic.
//!
//! This module translates gestures routed in by the rendering host into
//! controller transitions. It is the only entry point a host needs besides the
//! programmatic API on [`Select`].
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. The host turns a key press, click or timer into an [`Event`]
//! 2. [`handle_event`] pattern-matches the event and calls `Select` methods
//! 3. The controller mutates its state and raises notifications
//! 4. The render flag and queued [`Action`]s are returned to the host
//!
//! # Event Types
//!
//! - **Keyboard**: [`Event::Key`], active only while the panel is open, except
//!   Enter/Space which open it from the trigger
//! - **Pointer**: trigger, outside press, options, groups, tags, footer
//! - **Input**: [`Event::SearchInput`] with the full search box text
//! - **Time**: [`Event::Tick`] advancing the controller's clock
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use selectree::{handle_event, Config, Event, Key, Registry, Select};
//! use selectree::app::Action;
//! use selectree::infrastructure::NativeSelect;
//!
//! let select = Select::create(&Registry::new(), Rc::new(NativeSelect::new("s")), Config::single())?;
//! let (render, actions) = handle_event(&mut select.borrow_mut(), &Event::Key(Key::Enter));
//! assert!(render);
//! assert_eq!(actions[0], Action::ComputePlacement);
//! # Ok::<(), selectree::SelectreeError>(())
//! ```

use super::actions::Action;
use super::modes::Key;
use super::state::Select;

/// Gestures and clock ticks routed in by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press while the trigger or the panel has focus.
    Key(Key),

    /// Click on the trigger. Toggles the panel.
    TriggerActivated,

    /// Pointer press outside both trigger and panel.
    OutsidePointerDown,

    /// The panel's close button.
    CloseButton,

    /// Click on an option row, by value.
    OptionClicked(String),

    /// Click on a group's disclosure control, by group value or label.
    GroupToggled(String),

    /// Remove button on a tag chip, by value.
    TagRemoved(String),

    /// Footer select-all button.
    SelectAllClicked,

    /// Footer clear button.
    ClearClicked,

    /// New text in the search box.
    SearchInput(String),

    /// Host clock, in milliseconds since an arbitrary epoch.
    Tick {
        now_ms: u64,
    },
}

/// Processes an event, mutates the controller, and returns the render flag
/// with the actions queued for the host.
///
/// The returned actions belong to this event only. Actions queued by earlier
/// programmatic calls and never taken with [`Select::take_actions`] are
/// discarded first.
///
/// Events that change nothing return `(false, vec![])`: a closed panel ignores
/// navigation keys, a disabled controller ignores everything but ticks, and a
/// destroyed one ignores everything.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event.
pub fn handle_event(select: &mut Select, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event = ?event).entered();

    let stale = select.take_actions();
    if !stale.is_empty() {
        tracing::trace!(count = stale.len(), "discarding actions left by programmatic calls");
    }

    let render = match event {
        Event::Key(key) => handle_key(select, *key),
        Event::TriggerActivated => select.toggle(),
        Event::OutsidePointerDown | Event::CloseButton => select.close(),
        Event::OptionClicked(value) => select.click_option(value),
        Event::GroupToggled(group) => select.is_open() && select.toggle_group(group),
        Event::TagRemoved(value) => select.remove_tag(value),
        Event::SelectAllClicked => select.is_open() && select.select_all(),
        Event::ClearClicked => select.is_open() && select.clear(),
        Event::SearchInput(text) => select.input_search(text),
        Event::Tick { now_ms } => select.tick(*now_ms),
    };

    let actions = select.take_actions();
    if !render && actions.is_empty() {
        tracing::trace!("event had no effect");
    }
    (render, actions)
}

fn handle_key(select: &mut Select, key: Key) -> bool {
    if !select.is_open() {
        return match key {
            Key::Enter | Key::Space => select.open(),
            _ => false,
        };
    }

    match key {
        Key::ArrowDown => select.move_focus(true),
        Key::ArrowUp => select.move_focus(false),
        Key::Home => select.focus_edge(true),
        Key::End => select.focus_edge(false),
        Key::Enter | Key::Space => select.activate_focused(),
        Key::ArrowRight => select.expand_focused(true),
        Key::ArrowLeft => select.expand_focused(false),
        Key::Escape => select.escape(),
        Key::Tab => select.cycle_focus(true),
        Key::BackTab => select.cycle_focus(false),
    }
}
