//! Common test utilities for Selectree property and scenario tests.
//!
//! This module provides:
//! - `Harness`: A controller attached to an in-memory control, with every
//!   notification recorded
//! - Fixtures: Reusable item lists

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use selectree::domain::{Notification, NotificationKind, OptionItem, SourceEntry};
use selectree::infrastructure::NativeSelect;
use selectree::{handle_event, Action, Config, Event, Key, Registry, Select, SelectHandle};

/// Two groups and a bare item. Cherry is disabled.
pub fn groceries() -> Vec<SourceEntry> {
    vec![
        SourceEntry::group(
            "Fruits",
            vec![
                OptionItem::new("apple", "Apple"),
                OptionItem::new("banana", "Banana"),
                OptionItem::new("cherry", "Cherry").disabled(),
            ],
        ),
        SourceEntry::group(
            "Vegetables",
            vec![OptionItem::new("carrot", "Carrot"), OptionItem::new("leek", "Leek")],
        ),
        OptionItem::new("bread", "Bread").into(),
    ]
}

/// Apple, Banana, Cherry without groups.
pub fn flat_fruits() -> Vec<SourceEntry> {
    vec![
        OptionItem::new("apple", "Apple").into(),
        OptionItem::new("banana", "Banana").into(),
        OptionItem::new("cherry", "Cherry").into(),
    ]
}

/// A controller with its control and a log of every notification raised.
pub struct Harness {
    pub registry: Registry,
    pub control: Rc<NativeSelect>,
    pub select: SelectHandle,
    pub events: Rc<RefCell<Vec<Notification>>>,
}

impl Harness {
    pub fn new(entries: Vec<SourceEntry>, config: Config) -> Self {
        Self::with_registry(&Registry::new(), "select", entries, config)
    }

    pub fn with_registry(registry: &Registry, id: &str, entries: Vec<SourceEntry>, config: Config) -> Self {
        let mut control = NativeSelect::new(id).with_entries(entries);
        if config.is_multiple() {
            control = control.multiple();
        }
        let control = Rc::new(control);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        control.on_any(move |n| sink.borrow_mut().push(n.clone()));

        let select = Select::create(registry, control.clone(), config).expect("controller should attach");
        Self {
            registry: registry.clone(),
            control,
            select,
            events,
        }
    }

    /// Routes an event through the handler.
    pub fn send(&self, event: Event) -> (bool, Vec<Action>) {
        handle_event(&mut self.select.borrow_mut(), &event)
    }

    pub fn key(&self, key: Key) -> (bool, Vec<Action>) {
        self.send(Event::Key(key))
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.events.borrow().iter().map(Notification::kind).collect()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.events.borrow().iter().filter(|n| n.kind() == kind).count()
    }

    pub fn last(&self, kind: NotificationKind) -> Option<Notification> {
        self.events.borrow().iter().rev().find(|n| n.kind() == kind).cloned()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    /// Labels of the visible rows.
    pub fn rows(&self) -> Vec<String> {
        self.select
            .borrow()
            .compute_viewmodel()
            .rows
            .into_iter()
            .map(|row| row.label)
            .collect()
    }
}
