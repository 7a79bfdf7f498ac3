//! Scenario: Several controls on one page
//!
//! Journey: A form carries two enhanced controls. The user opens one, then
//! the other.
//!
//! Steps:
//! 1. Open the first control
//! 2. Open the second control
//! 3. Destroy the second control
//!
//! Success Criteria:
//! - At most one panel is open at a time
//! - The displaced panel raises close
//! - Destroyed controllers leave the registry

use selectree::{Config, Event, NotificationKind, Registry};

use crate::common::*;

/// SCENARIO: Opening a second panel closes the first.
#[test]
fn scenario_only_one_panel_open() {
    let registry = Registry::new();
    let first = Harness::with_registry(&registry, "first", flat_fruits(), Config::single());
    let second = Harness::with_registry(&registry, "second", groceries(), Config::multi());
    assert_eq!(registry.live_count(), 2);

    first.send(Event::TriggerActivated);
    assert_eq!(registry.open_instance(), Some(first.select.borrow().id()));

    second.send(Event::TriggerActivated);
    assert!(!first.select.borrow().is_open());
    assert!(second.select.borrow().is_open());
    assert_eq!(first.kinds(), vec![NotificationKind::Open, NotificationKind::Close]);
    assert_eq!(second.kinds(), vec![NotificationKind::Open]);
    assert_eq!(registry.open_instance(), Some(second.select.borrow().id()));

    second.send(Event::CloseButton);
    assert_eq!(registry.open_instance(), None);
    assert_eq!(first.count(NotificationKind::Close), 1);
}

/// SCENARIO: Destroying the open instance frees the registry slot.
#[test]
fn scenario_destroy_leaves_registry() {
    let registry = Registry::new();
    let first = Harness::with_registry(&registry, "first", flat_fruits(), Config::single());
    let second = Harness::with_registry(&registry, "second", flat_fruits(), Config::single());

    second.send(Event::TriggerActivated);
    second.select.borrow_mut().destroy();

    assert_eq!(registry.live_count(), 1);
    assert_eq!(registry.open_instance(), None);
    assert_eq!(second.kinds(), vec![NotificationKind::Open]);

    first.send(Event::TriggerActivated);
    assert!(first.select.borrow().is_open());
    assert_eq!(registry.open_instance(), Some(first.select.borrow().id()));
}

/// SCENARIO: Dropped controllers are not counted as live.
#[test]
fn scenario_dropped_instances_are_pruned() {
    let registry = Registry::new();
    let kept = Harness::with_registry(&registry, "kept", flat_fruits(), Config::single());
    {
        let _dropped = Harness::with_registry(&registry, "dropped", flat_fruits(), Config::single());
        assert_eq!(registry.live_count(), 2);
    }
    assert_eq!(registry.live_count(), 1);
    assert_eq!(registry.instances().len(), 1);
    assert_eq!(registry.instances()[0].borrow().id(), kept.select.borrow().id());
}
