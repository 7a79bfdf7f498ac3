//! Scenario: Controller lifecycle
//!
//! Journey: The host page changes a control's options while it is enhanced,
//! temporarily disables it, and finally tears it down.
//!
//! Steps:
//! 1. Replace the control's items and refresh
//! 2. Disable and re-enable the controller
//! 3. Destroy it with a search still pending
//!
//! Success Criteria:
//! - Refresh keeps group expansion and raises nothing
//! - A disabled controller ignores gestures and marks the control disabled
//! - A destroyed controller never fires pending timers

use selectree::domain::{OptionItem, SourceEntry};
use selectree::{Config, Event, NotificationKind, SelectionValue};

use crate::common::*;

/// SCENARIO: Refresh picks up new items and keeps expanded groups expanded.
#[test]
fn scenario_refresh_after_items_change() {
    let h = Harness::new(groceries(), Config::multi());
    h.send(Event::TriggerActivated);
    h.send(Event::GroupToggled("Fruits".into()));
    h.send(Event::OptionClicked("apple".into()));
    h.clear_events();

    h.control.set_entries(vec![
        SourceEntry::group(
            "Fruits",
            vec![
                OptionItem::new("apple", "Apple").selected(),
                OptionItem::new("fig", "Fig"),
            ],
        ),
        SourceEntry::group("Vegetables", vec![OptionItem::new("leek", "Leek")]),
    ]);
    h.select.borrow_mut().refresh();

    assert_eq!(h.rows(), vec!["Fruits", "Apple", "Fig", "Vegetables"]);
    assert_eq!(h.select.borrow().value(), SelectionValue::Multi(vec!["apple".into()]));
    assert!(h.kinds().is_empty());
}

/// SCENARIO: An empty control shows the no-options message.
#[test]
fn scenario_refresh_to_empty() {
    let h = Harness::new(flat_fruits(), Config::single());
    h.control.set_entries(Vec::new());
    h.select.borrow_mut().refresh();
    h.send(Event::TriggerActivated);

    let view = h.select.borrow().compute_viewmodel();
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message.as_deref(), Some("No options available"));
}

/// SCENARIO: Disabling closes the panel and blocks gestures until enabled.
#[test]
fn scenario_disable_and_enable() {
    let h = Harness::new(flat_fruits(), Config::single());
    h.send(Event::TriggerActivated);

    assert!(h.select.borrow_mut().disable());
    assert!(!h.select.borrow().is_open());
    assert!(h.control.is_disabled());
    assert_eq!(h.kinds(), vec![NotificationKind::Open, NotificationKind::Close]);

    assert_eq!(h.send(Event::TriggerActivated), (false, vec![]));
    assert!(h.select.borrow().compute_viewmodel().disabled);

    assert!(h.select.borrow_mut().enable());
    assert!(!h.control.is_disabled());
    h.send(Event::TriggerActivated);
    assert!(h.select.borrow().is_open());
}

/// SCENARIO: Destroy cancels pending timers and turns every call into a
/// no-op.
#[test]
fn scenario_destroy_with_pending_search() {
    let config = Config {
        search_debounce_ms: 100,
        ..Config::multi()
    };
    let h = Harness::new(groceries(), config);
    h.send(Event::TriggerActivated);
    h.send(Event::SearchInput("leek".into()));
    h.clear_events();

    h.select.borrow_mut().destroy();
    assert!(h.select.borrow().is_destroyed());
    assert_eq!(h.registry.live_count(), 0);

    assert_eq!(h.send(Event::Tick { now_ms: 1_000 }), (false, vec![]));
    assert_eq!(h.send(Event::TriggerActivated), (false, vec![]));
    assert!(!h.select.borrow_mut().set_value(["leek"]));
    assert!(h.kinds().is_empty());
}
