//! The native control a controller enhances.
//!
//! The controller reads items from the backing control at construction and on
//! refresh, mirrors its selection back so form submission sees engine state,
//! and raises notifications on it. [`NativeSelect`] is the in-memory control
//! used by hosts without a real widget toolkit and by the test suite.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::domain::{Notification, NotificationKind, OptionItem, SourceEntry};

/// What kind of element backs a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    /// A native selection control.
    Select,
    /// Anything else, by tag name.
    Other(String),
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "select"),
            Self::Other(tag) => write!(f, "{tag}"),
        }
    }
}

/// Narrow interface the controller needs from its native control.
///
/// All methods take `&self`; implementations use interior mutability since the
/// control is shared between the controller and host code that attaches
/// listeners.
pub trait BackingControl: fmt::Debug {
    /// Identifier used in logs.
    fn id(&self) -> String;

    fn kind(&self) -> ControlKind;

    /// Whether the control accepts multiple values.
    fn is_multiple(&self) -> bool;

    /// Current items, read at construction and on refresh.
    fn entries(&self) -> Vec<SourceEntry>;

    /// Mirrors the engine's selection onto the control.
    fn mirror_selection(&self, values: &[String]);

    /// Raises a notification to the control's listeners.
    fn dispatch(&self, notification: &Notification);

    /// Mirrors the controller's enabled state.
    fn set_disabled(&self, disabled: bool);
}

/// Callback attached to a [`NativeSelect`].
pub type Listener = Rc<dyn Fn(&Notification)>;

/// Returned by [`NativeSelect::on`], used to detach a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Subscription {
    id: ListenerId,
    kind: Option<NotificationKind>,
    listener: Listener,
}

#[derive(Default)]
struct NativeState {
    entries: Vec<SourceEntry>,
    disabled: bool,
    next_listener: u64,
    subscriptions: Vec<Subscription>,
}

/// In-memory selection control with an event listener bus.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use selectree::domain::{Notification, NotificationKind, OptionItem};
/// use selectree::infrastructure::NativeSelect;
/// use selectree::infrastructure::backing::BackingControl;
///
/// let control = NativeSelect::new("fruit")
///     .with_entries(vec![OptionItem::new("apple", "Apple").into()]);
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// control.on(NotificationKind::Open, move |n| sink.borrow_mut().push(n.clone()));
///
/// control.dispatch(&Notification::Open);
/// control.dispatch(&Notification::Close);
/// assert_eq!(seen.borrow().len(), 1);
/// ```
pub struct NativeSelect {
    id: String,
    kind: ControlKind,
    multiple: bool,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    state: RefCell<NativeState>,
}

impl NativeSelect {
    /// Creates a single-value select control.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ControlKind::Select,
            multiple: false,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            state: RefCell::new(NativeState::default()),
        }
    }

    /// Creates a non-select element, which controllers refuse to attach to.
    #[must_use]
    pub fn element(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Other(tag.into()),
            ..Self::new(id)
        }
    }

    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    #[must_use]
    pub fn with_entries(self, entries: Vec<SourceEntry>) -> Self {
        self.state.borrow_mut().entries = entries;
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Element attributes, e.g. `data-*` configuration overrides.
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Replaces the items. Controllers pick the change up on `refresh()`.
    pub fn set_entries(&self, entries: Vec<SourceEntry>) {
        self.state.borrow_mut().entries = entries;
    }

    /// Values currently marked selected on the control itself.
    #[must_use]
    pub fn selected_values(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut values = Vec::new();
        for entry in &state.entries {
            match entry {
                SourceEntry::Item(item) if item.selected => values.push(item.value.clone()),
                SourceEntry::Item(_) => {}
                SourceEntry::Group { items, .. } => values.extend(
                    items.iter().filter(|i| i.selected).map(|i| i.value.clone()),
                ),
            }
        }
        values
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    /// Attaches a listener for one notification kind.
    pub fn on(&self, kind: NotificationKind, listener: impl Fn(&Notification) + 'static) -> ListenerId {
        self.subscribe(Some(kind), Rc::new(listener))
    }

    /// Attaches a listener for every notification.
    pub fn on_any(&self, listener: impl Fn(&Notification) + 'static) -> ListenerId {
        self.subscribe(None, Rc::new(listener))
    }

    /// Detaches a listener. Returns `false` if it was not attached.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.subscriptions.len();
        state.subscriptions.retain(|s| s.id != id);
        before != state.subscriptions.len()
    }

    fn subscribe(&self, kind: Option<NotificationKind>, listener: Listener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.subscriptions.push(Subscription { id, kind, listener });
        id
    }
}

impl fmt::Debug for NativeSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("NativeSelect")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("multiple", &self.multiple)
            .field("classes", &self.classes)
            .field("entries", &state.entries.len())
            .field("disabled", &state.disabled)
            .field("listeners", &state.subscriptions.len())
            .finish()
    }
}

impl BackingControl for NativeSelect {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn kind(&self) -> ControlKind {
        self.kind.clone()
    }

    fn is_multiple(&self) -> bool {
        self.multiple
    }

    fn entries(&self) -> Vec<SourceEntry> {
        self.state.borrow().entries.clone()
    }

    fn mirror_selection(&self, values: &[String]) {
        let mut state = self.state.borrow_mut();
        let mark = |item: &mut OptionItem| {
            item.selected = values.iter().any(|v| v == &item.value);
        };
        for entry in &mut state.entries {
            match entry {
                SourceEntry::Item(item) => mark(item),
                SourceEntry::Group { items, .. } => items.iter_mut().for_each(&mark),
            }
        }
    }

    fn dispatch(&self, notification: &Notification) {
        let kind = notification.kind();
        // Listeners may attach or detach others while running.
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .subscriptions
            .iter()
            .filter(|s| s.kind.map_or(true, |k| k == kind))
            .map(|s| Rc::clone(&s.listener))
            .collect();

        tracing::debug!(control = %self.id, event = kind.name(), listeners = listeners.len(), "dispatching notification");
        for listener in listeners {
            listener(notification);
        }
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
    }
}
