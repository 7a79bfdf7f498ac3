//! Scenario: Enhancing controls on a page
//!
//! Journey: A host page enhances its select elements by selector, some of
//! them carrying per-element `data-*` overrides.
//!
//! Steps:
//! 1. Enhance by id, by class and by tag
//! 2. Try selectors that match nothing or the wrong kind of element
//! 3. Read back per-element configuration
//!
//! Success Criteria:
//! - Every matched select gets exactly one controller
//! - Construction errors name the problem and leave nothing registered
//! - `data-*` attributes override the shared configuration

use std::collections::BTreeMap;

use selectree::domain::OptionItem;
use selectree::infrastructure::{Document, NativeSelect};
use selectree::{enhance, Config, DisplayMode, Registry, SelectionMode, SelectreeError};

use crate::common::*;

fn page() -> Document {
    let mut document = Document::new();
    document.add(
        NativeSelect::new("country")
            .with_class("enhance")
            .with_entries(flat_fruits())
            .with_attribute("data-placeholder", "Pick a country")
            .with_attribute("data-searchable", "false"),
    );
    document.add(
        NativeSelect::new("toppings")
            .multiple()
            .with_class("enhance")
            .with_entries(groceries())
            .with_attribute("data-display-mode", "tags")
            .with_attribute("data-max-selections", "2"),
    );
    document.add(NativeSelect::element("notes", "textarea").with_class("notes"));
    document
}

/// SCENARIO: Enhancing by id applies the element's overrides.
#[test]
fn scenario_enhance_by_id_with_overrides() {
    let document = page();
    let registry = Registry::new();

    let handles = enhance(&registry, &document, "#country", &Config::single()).unwrap();
    assert_eq!(handles.len(), 1);

    let select = handles[0].borrow();
    assert_eq!(select.config().placeholder, "Pick a country");
    assert!(!select.config().searchable);
    assert_eq!(select.summary().text, "Pick a country");
    assert_eq!(registry.live_count(), 1);
}

/// SCENARIO: Multi-select overrides apply to the multi variant only.
#[test]
fn scenario_enhance_multi_overrides() {
    let document = page();
    let registry = Registry::new();

    let handles = enhance(&registry, &document, "#toppings", &Config::multi()).unwrap();
    let select = handles[0].borrow();
    let SelectionMode::Multi(options) = &select.config().selection else {
        panic!("expected the multi variant");
    };
    assert_eq!(options.display_mode, DisplayMode::Tags);
    assert_eq!(options.max_selections, Some(2));
}

/// SCENARIO: Bad selectors and mismatched elements fail with a named error.
#[test]
fn scenario_enhance_errors() {
    let document = page();
    let registry = Registry::new();

    assert!(matches!(
        enhance(&registry, &document, "#missing", &Config::single()),
        Err(SelectreeError::TargetNotFound { selector }) if selector == "#missing"
    ));
    assert!(matches!(
        enhance(&registry, &document, "div > select", &Config::single()),
        Err(SelectreeError::InvalidSelector(_))
    ));
    assert!(matches!(
        enhance(&registry, &document, ".notes", &Config::single()),
        Err(SelectreeError::WrongElementKind { .. })
    ));
    assert!(matches!(
        enhance(&registry, &document, "#toppings", &Config::single()),
        Err(SelectreeError::WrongMultiplicity {
            expected_multiple: false
        })
    ));
    assert_eq!(registry.live_count(), 0);
}

/// SCENARIO: A failure partway through a batch undoes the controllers it
/// already created.
#[test]
fn scenario_failed_batch_rolls_back() {
    let document = page();
    let registry = Registry::new();

    let result = enhance(&registry, &document, ".enhance", &Config::single());
    assert!(matches!(result, Err(SelectreeError::WrongMultiplicity { .. })));
    assert_eq!(registry.live_count(), 0);
    assert_eq!(registry.open_instance(), None);
}

/// SCENARIO: Attribute-only configuration picks the variant from `multiple`.
#[test]
fn scenario_config_from_attributes() {
    let mut attributes = BTreeMap::new();
    attributes.insert("multiple".to_string(), String::new());
    attributes.insert("data-cascade".to_string(), "false".to_string());

    let config = Config::from_attributes(&attributes);
    assert!(config.is_multiple());
    assert_eq!(config.multi_options().map(|o| o.cascade), Some(false));

    let control = NativeSelect::new("plain").with_entries(vec![OptionItem::new("a", "A").into()]);
    let mut document = Document::new();
    document.add(control);
    let handles = enhance(&Registry::new(), &document, "select", &Config::from_attributes(&BTreeMap::new())).unwrap();
    assert_eq!(handles.len(), 1);
    assert!(!handles[0].borrow().config().is_multiple());
}
