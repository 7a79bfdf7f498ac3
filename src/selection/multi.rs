//! Multi-value selection with cascading and tri-state groups.
//!
//! A group's `selected` and `indeterminate` flags are derived from its
//! descendant leaves: none selected clears both, all selected sets `selected`,
//! anything in between sets `indeterminate`. Every mutation here leaves those
//! flags consistent along the whole parent chain.

use crate::domain::{NodeId, OptionTree};

/// Selects `id`, and with `cascade` every descendant as well.
///
/// Disabled nodes are skipped silently. Ancestors are recomputed afterwards.
pub fn select(tree: &mut OptionTree, id: NodeId, cascade: bool) {
    apply(tree, id, true, cascade);
    settle(tree, id, cascade);
}

/// Deselects `id`, and with `cascade` every descendant as well.
pub fn deselect(tree: &mut OptionTree, id: NodeId, cascade: bool) {
    apply(tree, id, false, cascade);
    settle(tree, id, cascade);
}

/// Flips the selection of `id`.
///
/// A cascading group deselects its members once every enabled member is
/// selected and otherwise selects them, so a partially selected group moves to
/// fully selected. Disabled members do not count, which keeps a group with a
/// disabled, unselected member clearable from its row. Without cascade a group
/// is not a selection target and this is a no-op for it.
pub fn toggle(tree: &mut OptionTree, id: NodeId, cascade: bool) {
    let Some(node) = tree.node(id) else {
        return;
    };

    if node.is_group() {
        if !cascade {
            return;
        }
        if toggle_selects(tree, id, true) {
            select(tree, id, true);
        } else {
            deselect(tree, id, true);
        }
    } else if node.selected {
        deselect(tree, id, false);
    } else {
        select(tree, id, false);
    }
}

fn apply(tree: &mut OptionTree, id: NodeId, selected: bool, cascade: bool) {
    let Some(node) = tree.node_mut(id) else {
        return;
    };
    if node.disabled {
        tracing::trace!(value = %node.value, "skipping disabled node");
        return;
    }
    node.selected = selected;
    node.indeterminate = false;

    if cascade {
        let children = node.children().to_vec();
        for child in children {
            apply(tree, child, selected, true);
        }
    }
}

fn settle(tree: &mut OptionTree, id: NodeId, cascade: bool) {
    let is_group = tree.node(id).is_some_and(|n| n.is_group());
    if cascade && is_group {
        // Disabled members may have kept their state, so the group itself is
        // derived from its leaves rather than from the requested flag.
        recompute_group(tree, id);
    }
    update_parent_state(tree, id);
}

/// Recomputes the tri-state flags of every ancestor of `id`, nearest first.
pub fn update_parent_state(tree: &mut OptionTree, id: NodeId) {
    let chain = tree.parent_chain(id);
    for &ancestor in chain.iter().rev() {
        recompute_group(tree, ancestor);
    }
}

/// Derives `selected` / `indeterminate` of a group from its descendant leaves.
pub(crate) fn recompute_group(tree: &mut OptionTree, id: NodeId) {
    let leaves = tree.leaves_under(id);
    let Some(node) = tree.node(id) else {
        return;
    };
    if node.is_leaf() {
        return;
    }

    let total = leaves.len();
    let selected = leaves
        .iter()
        .filter(|&&leaf| tree.node(leaf).is_some_and(|n| n.selected))
        .count();

    if let Some(node) = tree.node_mut(id) {
        node.selected = total > 0 && selected == total;
        node.indeterminate = selected > 0 && selected < total;
    }
}

/// Recomputes every group, deepest first. Used after parsing or bulk edits.
pub fn refresh_all_groups(tree: &mut OptionTree) {
    let groups = tree.groups();
    for &group in groups.iter().rev() {
        recompute_group(tree, group);
    }
}

/// Selects every enabled leaf and returns the resulting leaf values.
pub fn select_all_leaves(tree: &mut OptionTree) -> Vec<String> {
    for leaf in tree.leaves() {
        if let Some(node) = tree.node_mut(leaf) {
            if !node.disabled {
                node.selected = true;
            }
        }
    }
    refresh_all_groups(tree);
    tree.selected_values()
}

/// Deselects every enabled leaf and returns the values selected before.
pub fn clear_all(tree: &mut OptionTree) -> Vec<String> {
    let previous = tree.selected_values();
    for leaf in tree.leaves() {
        if let Some(node) = tree.node_mut(leaf) {
            if !node.disabled {
                node.selected = false;
            }
        }
    }
    refresh_all_groups(tree);
    previous
}

/// Whether [`toggle`] on `id` selects rather than deselects.
///
/// A leaf selects when it is unselected. A cascading group selects unless all
/// of its enabled leaves are already selected.
#[must_use]
pub fn toggle_selects(tree: &OptionTree, id: NodeId, cascade: bool) -> bool {
    let Some(node) = tree.node(id) else {
        return false;
    };
    if node.is_leaf() {
        return !node.selected;
    }
    if !cascade {
        return false;
    }
    tree.leaves_under(id)
        .into_iter()
        .filter_map(|leaf| tree.node(leaf))
        .any(|n| !n.disabled && !n.selected)
}

/// Number of enabled, unselected leaves that selecting `id` would add.
#[must_use]
pub fn pending_additions(tree: &OptionTree, id: NodeId, cascade: bool) -> usize {
    let Some(node) = tree.node(id) else {
        return 0;
    };
    let candidates = if node.is_group() {
        if cascade {
            tree.leaves_under(id)
        } else {
            Vec::new()
        }
    } else {
        vec![id]
    };
    candidates
        .into_iter()
        .filter_map(|leaf| tree.node(leaf))
        .filter(|n| !n.disabled && !n.selected)
        .count()
}
