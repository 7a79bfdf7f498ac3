//! Tree filtering for search queries.

use std::collections::HashSet;

use super::{matches, normalize, SearchStrategy};
use crate::domain::{NodeId, OptionTree};

/// Result of filtering a tree against a query.
///
/// A node is retained when it matches, when an ancestor matches, or when any
/// of its descendants matches. Members of a group that matched by label are
/// all retained; members of a group retained only through a descendant are
/// retained only if they match themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterView {
    query: String,
    roots: Vec<NodeId>,
    retained: HashSet<NodeId>,
}

impl FilterView {
    /// The normalized query that produced this view.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Retained top-level nodes in source order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Whether `id` survives the filter.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.retained.contains(&id)
    }

    /// Retained node ids in flatten order.
    #[must_use]
    pub fn retained(&self, tree: &OptionTree) -> Vec<NodeId> {
        tree.flatten()
            .into_iter()
            .filter(|id| self.retained.contains(id))
            .collect()
    }

    /// Number of retained leaves, i.e. selectable results.
    #[must_use]
    pub fn result_count(&self, tree: &OptionTree) -> usize {
        self.retained
            .iter()
            .filter(|&&id| tree.node(id).is_some_and(|n| n.is_leaf()))
            .count()
    }
}

/// Filters `tree` by `query`, returning the top-level nodes whose subtree
/// contains a match.
///
/// When `expand_on_search` is set, a group retained only because of a
/// descendant match gets `expanded = true` so the match is visible. A group
/// that matches by its own label is left as the user had it.
///
/// ```
/// use selectree::domain::{OptionItem, OptionTree};
/// use selectree::search::{filter_tree, SearchStrategy};
///
/// let mut tree = OptionTree::parse(&[
///     OptionItem::new("apple", "Apple").into(),
///     OptionItem::new("banana", "Banana").into(),
///     OptionItem::new("cherry", "Cherry").into(),
/// ], false);
///
/// let view = filter_tree(&mut tree, "an", SearchStrategy::Contains, true);
/// let values: Vec<_> = view.roots().iter()
///     .map(|&id| tree.node(id).unwrap().value.clone())
///     .collect();
/// assert_eq!(values, vec!["banana"]);
/// ```
pub fn filter_tree(
    tree: &mut OptionTree,
    query: &str,
    strategy: SearchStrategy,
    expand_on_search: bool,
) -> FilterView {
    let query = normalize(query);
    let _span = tracing::debug_span!(
        "filter_tree",
        query_len = query.len(),
        strategy = ?strategy,
        nodes = tree.len()
    )
    .entered();

    let mut view = FilterView {
        query: query.clone(),
        ..FilterView::default()
    };

    if query.is_empty() {
        view.roots = tree.roots().to_vec();
        view.retained = tree.flatten().into_iter().collect();
        return view;
    }

    let mut expand = Vec::new();
    for root in tree.roots().to_vec() {
        if retain_subtree(tree, root, &query, strategy, &mut view.retained, &mut expand) {
            view.roots.push(root);
        }
    }

    if expand_on_search {
        for group in expand {
            if tree.set_expanded(group, true) {
                tracing::trace!(group = group.index(), "expanded by search");
            }
        }
    }

    tracing::debug!(retained_roots = view.roots.len(), "tree filtered");
    view
}

fn retain_subtree(
    tree: &OptionTree,
    id: NodeId,
    query: &str,
    strategy: SearchStrategy,
    retained: &mut HashSet<NodeId>,
    expand: &mut Vec<NodeId>,
) -> bool {
    let Some(node) = tree.node(id) else {
        return false;
    };

    if matches(&node.label, query, strategy) {
        retained.insert(id);
        retained.extend(tree.children_recursive(id));
        return true;
    }

    let mut any = false;
    for &child in node.children() {
        any |= retain_subtree(tree, child, query, strategy, retained, expand);
    }

    if any {
        retained.insert(id);
        expand.push(id);
    }
    any
}
