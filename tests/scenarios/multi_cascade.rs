//! Scenario: Multi-select with cascading groups
//!
//! Journey: A user picks produce from grouped options, relying on group rows to
//! select whole groups and on tags to remove single picks.
//!
//! Steps:
//! 1. Open the panel and click a group row
//! 2. Deselect one member and observe the tri-state group
//! 3. Clear the selection from the footer
//! 4. Hit the selection limit and remove picks from tags
//!
//! Success Criteria:
//! - Group selection cascades and derives tri-state flags
//! - The backing control mirrors every change
//! - Change payloads carry group labels; clear reports the previous value

use selectree::domain::{Notification, OptionItem, SourceEntry};
use selectree::{Config, DisplayMode, Event, MultiOptions, NotificationKind, SelectionMode, SelectionValue};

use crate::common::*;

fn fruits() -> Vec<SourceEntry> {
    vec![SourceEntry::group(
        "Fruits",
        vec![OptionItem::new("apple", "Apple"), OptionItem::new("banana", "Banana")],
    )]
}

fn multi_with(options: MultiOptions) -> Config {
    Config {
        selection: SelectionMode::Multi(options),
        ..Config::default()
    }
}

fn group_flags(harness: &Harness, label: &str) -> (bool, bool) {
    let select = harness.select.borrow();
    let id = select.tree().find_group(label).expect("group exists");
    let node = select.tree().node(id).expect("group node");
    (node.selected, node.indeterminate)
}

/// SCENARIO: Clicking a group selects every member, deselecting one leaves
/// the group indeterminate.
#[test]
fn scenario_group_click_cascades_and_tracks_tri_state() {
    let h = Harness::new(fruits(), Config::multi());

    h.send(Event::TriggerActivated);
    h.send(Event::OptionClicked("__group__:0".into()));

    assert_eq!(
        h.select.borrow().value(),
        SelectionValue::Multi(vec!["apple".into(), "banana".into()])
    );
    assert_eq!(group_flags(&h, "Fruits"), (true, false));
    assert_eq!(h.control.selected_values(), vec!["apple", "banana"]);

    let Some(Notification::Change { options, .. }) = h.last(NotificationKind::Change) else {
        panic!("expected a change notification");
    };
    assert!(options.iter().all(|o| o.group.as_deref() == Some("Fruits")));

    h.send(Event::OptionClicked("apple".into()));
    assert_eq!(h.select.borrow().value(), SelectionValue::Multi(vec!["banana".into()]));
    assert_eq!(group_flags(&h, "Fruits"), (false, true));
    assert_eq!(h.control.selected_values(), vec!["banana"]);

    // A partially selected group completes on the next click.
    h.send(Event::OptionClicked("__group__:0".into()));
    assert_eq!(group_flags(&h, "Fruits"), (true, false));
    assert_eq!(h.count(NotificationKind::Change), 3);
}

/// SCENARIO: Select all skips disabled options, clear reports what was
/// selected before.
#[test]
fn scenario_select_all_then_clear() {
    let h = Harness::new(groceries(), Config::multi());
    h.send(Event::TriggerActivated);
    h.clear_events();

    h.send(Event::SelectAllClicked);
    let everything: Vec<String> = ["apple", "banana", "carrot", "leek", "bread"]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(h.select.borrow().value(), SelectionValue::Multi(everything.clone()));
    assert_eq!(group_flags(&h, "Fruits"), (false, true));
    assert_eq!(group_flags(&h, "Vegetables"), (true, false));

    h.send(Event::ClearClicked);
    assert_eq!(
        h.kinds(),
        vec![NotificationKind::Change, NotificationKind::Clear, NotificationKind::Change]
    );
    assert_eq!(
        h.last(NotificationKind::Clear),
        Some(Notification::Clear {
            previous: SelectionValue::Multi(everything)
        })
    );
    assert!(h.select.borrow().value().is_empty());
    assert!(h.control.selected_values().is_empty());

    // Nothing left to clear.
    let (render, _) = h.send(Event::ClearClicked);
    assert!(!render);
}

/// SCENARIO: The selection limit rejects additions beyond the maximum.
#[test]
fn scenario_selection_limit() {
    let h = Harness::new(
        groceries(),
        multi_with(MultiOptions {
            max_selections: Some(2),
            ..MultiOptions::default()
        }),
    );
    h.send(Event::TriggerActivated);

    h.send(Event::OptionClicked("apple".into()));
    h.send(Event::OptionClicked("carrot".into()));
    let (render, _) = h.send(Event::OptionClicked("bread".into()));

    assert!(!render);
    assert_eq!(
        h.select.borrow().value(),
        SelectionValue::Multi(vec!["apple".into(), "carrot".into()])
    );

    // The Vegetables group would add leek on top of the two picks.
    h.send(Event::OptionClicked("apple".into()));
    let (render, _) = h.send(Event::OptionClicked("__group__:1".into()));
    assert!(render);
    assert_eq!(
        h.select.borrow().value(),
        SelectionValue::Multi(vec!["carrot".into(), "leek".into()])
    );
}

/// SCENARIO: Tags summarize the selection and remove picks without opening
/// the panel.
#[test]
fn scenario_tags_display_and_removal() {
    let entries = vec![
        OptionItem::new("apple", "Apple").into(),
        OptionItem::new("banana", "Banana").into(),
        OptionItem::new("carrot", "Carrot").into(),
        OptionItem::new("locked", "Locked").disabled().selected().into(),
    ];
    let h = Harness::new(
        entries,
        multi_with(MultiOptions {
            display_mode: DisplayMode::Tags,
            max_tags: 2,
            ..MultiOptions::default()
        }),
    );

    assert!(h.select.borrow_mut().set_value(["apple", "banana", "carrot"]));
    let summary = h.select.borrow().summary();
    assert_eq!(summary.tags.len(), 2);
    assert_eq!(summary.overflow, 2);
    assert_eq!(summary.text, "Apple, Banana +2 more");

    let (render, _) = h.send(Event::TagRemoved("apple".into()));
    assert!(render);
    assert_eq!(
        h.select.borrow().value(),
        SelectionValue::Multi(vec!["banana".into(), "carrot".into(), "locked".into()])
    );

    // Disabled picks stay selected and their chips cannot be removed.
    let (render, _) = h.send(Event::TagRemoved("locked".into()));
    assert!(!render);
    h.send(Event::TagRemoved("banana".into()));
    let summary = h.select.borrow().summary();
    let chips: Vec<(String, bool)> = summary.tags.iter().map(|t| (t.label.clone(), t.removable)).collect();
    assert_eq!(chips, vec![("Carrot".to_string(), true), ("Locked".to_string(), false)]);
    assert_eq!(summary.overflow, 0);
}

/// SCENARIO: Setting the same value twice raises a single change.
#[test]
fn scenario_set_value_emits_only_on_change() {
    let h = Harness::new(groceries(), Config::multi());

    assert!(h.select.borrow_mut().set_value(["leek", "apple", "unknown"]));
    assert_eq!(
        h.select.borrow().value(),
        SelectionValue::Multi(vec!["apple".into(), "leek".into()])
    );
    assert!(!h.select.borrow_mut().set_value(["apple", "leek"]));
    assert_eq!(h.count(NotificationKind::Change), 1);
}

/// SCENARIO: A group row with a disabled, unselected member selects its
/// enabled members on the first click and clears them on the second.
#[test]
fn scenario_group_with_disabled_member_clears_from_row() {
    let entries = vec![SourceEntry::group(
        "G",
        vec![OptionItem::new("a", "A"), OptionItem::new("b", "B").disabled()],
    )];
    let h = Harness::new(entries, Config::multi());
    h.send(Event::TriggerActivated);

    h.send(Event::OptionClicked("__group__:0".into()));
    assert_eq!(h.select.borrow().value(), SelectionValue::Multi(vec!["a".into()]));

    h.send(Event::OptionClicked("__group__:0".into()));
    assert!(h.select.borrow().value().is_empty());
    assert!(h.control.selected_values().is_empty());
    assert_eq!(h.count(NotificationKind::Change), 2);
}
