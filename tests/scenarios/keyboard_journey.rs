//! Scenario: Keyboard-only use
//!
//! Journey: A user opens the control with the keyboard, walks into a group,
//! picks an option and lets the panel close.
//!
//! Steps:
//! 1. Open with Enter on the trigger
//! 2. Arrow into a group and expand it
//! 3. Skip over a disabled option
//! 4. Select with Enter and let the panel close
//!
//! Success Criteria:
//! - Arrow keys never land on disabled options
//! - Expansion changes raise expand/collapse with the group value
//! - Focus returns to the trigger on close

use selectree::app::FocusStop;
use selectree::domain::Notification;
use selectree::{Action, Config, Event, Key, NotificationKind, SelectionValue};

use crate::common::*;

fn focused(h: &Harness) -> Option<String> {
    h.select.borrow().focused_value()
}

/// SCENARIO: Open, expand, navigate past a disabled option, select.
#[test]
fn scenario_keyboard_selection() {
    let h = Harness::new(groceries(), Config::single());

    let (_, actions) = h.key(Key::Enter);
    assert_eq!(
        actions,
        vec![Action::ComputePlacement, Action::MoveFocus(FocusStop::SearchInput)]
    );

    let (_, actions) = h.key(Key::ArrowDown);
    assert_eq!(actions, vec![Action::ScrollToRow(0)]);
    assert_eq!(focused(&h).as_deref(), Some("__group__:0"));

    h.key(Key::ArrowRight);
    assert_eq!(
        h.last(NotificationKind::Expand),
        Some(Notification::Expand {
            group: "__group__:0".into()
        })
    );
    assert_eq!(h.rows(), vec!["Fruits", "Apple", "Banana", "Cherry", "Vegetables", "Bread"]);

    h.key(Key::ArrowDown);
    h.key(Key::ArrowDown);
    assert_eq!(focused(&h).as_deref(), Some("banana"));
    h.key(Key::ArrowDown);
    assert_eq!(focused(&h).as_deref(), Some("__group__:1"));
    h.key(Key::ArrowUp);
    assert_eq!(focused(&h).as_deref(), Some("banana"));

    h.key(Key::Enter);
    assert_eq!(
        h.select.borrow().value(),
        SelectionValue::Single(Some("banana".into()))
    );

    let (_, actions) = h.send(Event::Tick { now_ms: 150 });
    assert_eq!(actions, vec![Action::ReturnFocusToTrigger]);
    assert!(!h.select.borrow().is_open());
}

/// SCENARIO: Collapsing the group that contains the focus moves focus onto
/// the group row.
#[test]
fn scenario_collapse_from_inside() {
    let h = Harness::new(groceries(), Config::single());
    h.key(Key::Space);

    h.key(Key::ArrowDown);
    h.key(Key::ArrowRight);
    h.key(Key::ArrowDown);
    assert_eq!(focused(&h).as_deref(), Some("apple"));

    h.send(Event::GroupToggled("Fruits".into()));
    assert_eq!(focused(&h).as_deref(), Some("__group__:0"));
    assert_eq!(h.count(NotificationKind::Collapse), 1);

    // In single-select, activating a group row toggles its expansion.
    h.key(Key::Enter);
    assert_eq!(h.count(NotificationKind::Expand), 2);
    assert!(h.select.borrow().value().is_empty());
}

/// SCENARIO: Home and End jump to the first and last enabled rows, and
/// arrows wrap around.
#[test]
fn scenario_edges_and_wrapping() {
    let h = Harness::new(flat_fruits(), Config::single());
    h.key(Key::Enter);

    h.key(Key::End);
    assert_eq!(focused(&h).as_deref(), Some("cherry"));
    h.key(Key::ArrowDown);
    assert_eq!(focused(&h).as_deref(), Some("apple"));
    h.key(Key::ArrowUp);
    assert_eq!(focused(&h).as_deref(), Some("cherry"));
    h.key(Key::Home);
    assert_eq!(focused(&h).as_deref(), Some("apple"));
}

/// SCENARIO: Tab keeps focus inside the open panel.
#[test]
fn scenario_tab_cycles_panel_controls() {
    let h = Harness::new(flat_fruits(), Config::single());
    h.key(Key::Enter);
    h.key(Key::ArrowDown);
    assert_eq!(h.select.borrow().focus_stop(), Some(FocusStop::OptionList));

    let (_, actions) = h.key(Key::Tab);
    assert_eq!(actions, vec![Action::MoveFocus(FocusStop::SearchInput)]);
    let (_, actions) = h.key(Key::BackTab);
    assert_eq!(actions, vec![Action::MoveFocus(FocusStop::OptionList)]);
}

/// SCENARIO: Navigation keys do nothing while the panel is closed.
#[test]
fn scenario_closed_panel_ignores_navigation() {
    let h = Harness::new(flat_fruits(), Config::single());

    for key in [Key::ArrowDown, Key::ArrowUp, Key::Home, Key::End, Key::Escape, Key::Tab] {
        assert_eq!(h.key(key), (false, vec![]));
    }
    assert!(h.kinds().is_empty());
}
