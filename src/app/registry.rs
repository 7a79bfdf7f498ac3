//! Registry of live controllers.
//!
//! At most one panel is open per registry. Controllers register on
//! construction and deregister on destroy; opening a panel closes whichever
//! other instance currently has its panel open. The registry holds weak
//! references only, so dropping a controller without destroying it leaves a
//! dead entry that is skipped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::state::{Select, SelectHandle};

/// Identifies one controller within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    instances: Vec<(InstanceId, Weak<RefCell<Select>>)>,
    open: Option<InstanceId>,
}

/// Shared instance registry, cloned into every controller it creates.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use selectree::{Config, Registry, Select};
/// use selectree::infrastructure::NativeSelect;
///
/// let registry = Registry::new();
/// let a = Select::create(&registry, Rc::new(NativeSelect::new("a")), Config::single())?;
/// let b = Select::create(&registry, Rc::new(NativeSelect::new("b")), Config::single())?;
///
/// a.borrow_mut().open();
/// b.borrow_mut().open();
/// assert!(!a.borrow().is_open());
/// assert_eq!(registry.open_instance(), Some(b.borrow().id()));
/// # Ok::<(), selectree::SelectreeError>(())
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate(&self) -> InstanceId {
        let mut inner = self.inner.borrow_mut();
        let id = InstanceId(inner.next_id);
        inner.next_id += 1;
        id
    }

    pub(crate) fn insert(&self, id: InstanceId, instance: &SelectHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.instances.retain(|(_, weak)| weak.strong_count() > 0);
        inner.instances.push((id, Rc::downgrade(instance)));
        tracing::debug!(instance = id.0, live = inner.instances.len(), "instance registered");
    }

    pub(crate) fn deregister(&self, id: InstanceId) {
        let mut inner = self.inner.borrow_mut();
        inner.instances.retain(|(other, _)| *other != id);
        if inner.open == Some(id) {
            inner.open = None;
        }
        tracing::debug!(instance = id.0, live = inner.instances.len(), "instance deregistered");
    }

    /// Marks `id` as the open instance and returns the previously open one,
    /// which the caller must close.
    pub(crate) fn claim_open(&self, id: InstanceId) -> Option<SelectHandle> {
        let mut inner = self.inner.borrow_mut();
        let previous = inner.open.replace(id).filter(|&prev| prev != id)?;
        inner
            .instances
            .iter()
            .find(|(other, _)| *other == previous)
            .and_then(|(_, weak)| weak.upgrade())
    }

    /// Clears the open marker if it still points at `id`.
    pub(crate) fn release_open(&self, id: InstanceId) {
        let mut inner = self.inner.borrow_mut();
        if inner.open == Some(id) {
            inner.open = None;
        }
    }

    /// The instance whose panel is open, if any.
    #[must_use]
    pub fn open_instance(&self) -> Option<InstanceId> {
        self.inner.borrow().open
    }

    /// Number of registered instances that are still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner
            .borrow()
            .instances
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    /// Every live instance in registration order.
    #[must_use]
    pub fn instances(&self) -> Vec<SelectHandle> {
        self.inner
            .borrow()
            .instances
            .iter()
            .filter_map(|(_, weak)| weak.upgrade())
            .collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Registry")
            .field("instances", &inner.instances.len())
            .field("open", &inner.open)
            .finish()
    }
}
