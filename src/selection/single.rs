//! Single-value selection.

use crate::domain::OptionTree;

/// Makes `value` the only selected node and returns the resulting selection.
///
/// Unknown, disabled and group targets leave the tree untouched. Re-selecting
/// the current sole selection clears it when `allow_deselect` is set.
///
/// ```
/// use selectree::domain::{OptionItem, OptionTree};
/// use selectree::selection::single::select_exclusive;
///
/// let mut tree = OptionTree::parse(&[
///     OptionItem::new("v1", "One").into(),
///     OptionItem::new("v2", "Two").into(),
/// ], false);
///
/// assert_eq!(select_exclusive(&mut tree, "v1", true).as_deref(), Some("v1"));
/// assert_eq!(select_exclusive(&mut tree, "v1", true), None);
/// ```
pub fn select_exclusive(tree: &mut OptionTree, value: &str, allow_deselect: bool) -> Option<String> {
    let Some(target) = tree.find(value) else {
        tracing::debug!(value = %value, "select on unknown value ignored");
        return current(tree);
    };

    let Some(node) = tree.node(target) else {
        return current(tree);
    };
    if node.disabled || node.is_group() {
        tracing::debug!(value = %value, "target is not selectable");
        return current(tree);
    }

    let sole_selection = node.selected && tree.selected_leaves() == vec![target];
    clear_flags(tree);

    if sole_selection && allow_deselect {
        tracing::debug!(value = %value, "deselected on reclick");
        return None;
    }

    if let Some(node) = tree.node_mut(target) {
        node.selected = true;
    }
    Some(value.to_string())
}

/// The currently selected value, if any.
#[must_use]
pub fn current(tree: &OptionTree) -> Option<String> {
    tree.selected_values().into_iter().next()
}

/// Clears the selection and returns what was selected before.
pub fn clear(tree: &mut OptionTree) -> Option<String> {
    let previous = current(tree);
    clear_flags(tree);
    previous
}

/// Reduces a parsed tree to at most one selected leaf, keeping the last one in
/// source order the way a native single-value control does.
pub fn enforce_exclusive(tree: &mut OptionTree) {
    let selected = tree.selected_leaves();
    let keep = selected.last().copied();
    clear_flags(tree);
    if let Some(node) = keep.and_then(|id| tree.node_mut(id)) {
        node.selected = true;
    }
}

fn clear_flags(tree: &mut OptionTree) {
    for id in tree.flatten() {
        if let Some(node) = tree.node_mut(id) {
            node.selected = false;
            node.indeterminate = false;
        }
    }
}
