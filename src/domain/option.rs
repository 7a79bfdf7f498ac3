//! Option node model and the item source it is parsed from.
//!
//! A backing control describes its items as a flat list of [`SourceEntry`]
//! values, optionally grouped one level deep. [`OptionTree`](super::OptionTree)
//! turns that list into [`OptionNode`]s stored in an index arena, where each
//! node is addressed by a [`NodeId`].

use serde::{Deserialize, Serialize};

/// Prefix for the synthesized value of a group node.
///
/// Real option values never carry this prefix in practice, which keeps the
/// group keys out of the selectable value namespace.
pub const GROUP_VALUE_PREFIX: &str = "__group__:";

/// One selectable item as read from the backing control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub selected: bool,
}

impl OptionItem {
    /// Creates an enabled, unselected item.
    ///
    /// ```
    /// use selectree::domain::OptionItem;
    ///
    /// let item = OptionItem::new("apple", "Apple");
    /// assert!(!item.disabled);
    /// assert!(!item.selected);
    /// ```
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            selected: false,
        }
    }

    /// Marks the item as disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Marks the item as pre-selected.
    #[must_use]
    pub const fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// Top-level entry of a backing control: a bare item or a labeled group.
///
/// Deserializes untagged: a table with a `value` is an item, a table with
/// `items` is a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceEntry {
    Item(OptionItem),
    Group {
        label: String,
        /// A disabled group disables every member.
        #[serde(default)]
        disabled: bool,
        items: Vec<OptionItem>,
    },
}

impl SourceEntry {
    /// Convenience constructor for an enabled group.
    #[must_use]
    pub fn group(label: impl Into<String>, items: Vec<OptionItem>) -> Self {
        Self::Group {
            label: label.into(),
            disabled: false,
            items,
        }
    }
}

impl From<OptionItem> for SourceEntry {
    fn from(item: OptionItem) -> Self {
        Self::Item(item)
    }
}

/// Index of a node inside an [`OptionTree`](super::OptionTree) arena.
///
/// Ids are only meaningful for the tree that produced them and are invalidated
/// when the tree is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A selectable option or a group of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionNode {
    /// Unique key. Synthesized with [`GROUP_VALUE_PREFIX`] for groups.
    pub value: String,
    pub label: String,
    pub disabled: bool,
    pub selected: bool,
    pub expanded: bool,
    /// Some but not all descendant leaves are selected.
    pub indeterminate: bool,
    /// Depth from the root, 0 for top-level nodes.
    pub level: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl OptionNode {
    pub(crate) fn leaf(item: &OptionItem, level: usize, parent: Option<NodeId>) -> Self {
        Self {
            value: item.value.clone(),
            label: item.label.clone(),
            disabled: item.disabled,
            selected: item.selected,
            expanded: false,
            indeterminate: false,
            level,
            parent,
            children: Vec::new(),
        }
    }

    /// Whether the node has children.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Back-reference to the parent node, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Option data enriched with its group, as carried by change notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionData {
    pub value: String,
    pub label: String,
    pub disabled: bool,
    /// Label of the enclosing group, if the option is nested.
    pub group: Option<String>,
}
