//! Option tree: parsing, traversal and lookup.
//!
//! Nodes live in a flat arena and refer to each other through [`NodeId`]
//! indices, so selection and expansion flags can be mutated in place without
//! shared references. The hierarchy is at most two levels deep (top-level
//! nodes and one level of group members).

use super::option::{NodeId, OptionData, OptionNode, SourceEntry, GROUP_VALUE_PREFIX};

/// Arena of option nodes with ordered top-level roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTree {
    nodes: Vec<OptionNode>,
    roots: Vec<NodeId>,
}

impl OptionTree {
    /// Builds a tree from backing-control entries.
    ///
    /// With grouping disabled every item, including group members, becomes a
    /// level-0 leaf. With grouping enabled each group becomes a level-0 node
    /// whose members are level-1 children; bare items stay level-0 leaves.
    /// Groups without members are dropped since they would otherwise look like
    /// selectable leaves.
    ///
    /// ```
    /// use selectree::domain::{OptionItem, OptionTree, SourceEntry};
    ///
    /// let entries = vec![
    ///     SourceEntry::group("Fruits", vec![
    ///         OptionItem::new("apple", "Apple"),
    ///         OptionItem::new("banana", "Banana"),
    ///     ]),
    ///     OptionItem::new("bread", "Bread").into(),
    /// ];
    ///
    /// let tree = OptionTree::parse(&entries, true);
    /// assert_eq!(tree.roots().len(), 2);
    /// assert_eq!(tree.leaves().len(), 3);
    ///
    /// let flat = OptionTree::parse(&entries, false);
    /// assert_eq!(flat.roots().len(), 3);
    /// ```
    #[must_use]
    pub fn parse(entries: &[SourceEntry], grouping: bool) -> Self {
        let _span = tracing::debug_span!("parse_tree", entries = entries.len(), grouping).entered();

        let mut tree = Self::default();
        let mut group_ordinal = 0usize;

        for entry in entries {
            match entry {
                SourceEntry::Item(item) => {
                    let id = tree.push(OptionNode::leaf(item, 0, None));
                    tree.roots.push(id);
                }
                SourceEntry::Group { label, disabled, items } => {
                    let ordinal = group_ordinal;
                    group_ordinal += 1;

                    if !grouping {
                        for item in items {
                            let mut node = OptionNode::leaf(item, 0, None);
                            node.disabled |= *disabled;
                            let id = tree.push(node);
                            tree.roots.push(id);
                        }
                        continue;
                    }

                    if items.is_empty() {
                        tracing::debug!(group = %label, "skipping empty group");
                        continue;
                    }

                    let group_id = tree.push(OptionNode {
                        value: format!("{GROUP_VALUE_PREFIX}{ordinal}"),
                        label: label.clone(),
                        disabled: *disabled,
                        selected: false,
                        expanded: false,
                        indeterminate: false,
                        level: 0,
                        parent: None,
                        children: Vec::with_capacity(items.len()),
                    });
                    tree.roots.push(group_id);

                    for item in items {
                        let mut node = OptionNode::leaf(item, 1, Some(group_id));
                        node.disabled |= *disabled;
                        let child_id = tree.push(node);
                        tree.nodes[group_id.0].children.push(child_id);
                    }
                }
            }
        }

        tracing::debug!(nodes = tree.nodes.len(), roots = tree.roots.len(), "tree parsed");
        tree
    }

    fn push(&mut self, node: OptionNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Number of nodes, groups included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in source order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&OptionNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut OptionNode> {
        self.nodes.get_mut(id.0)
    }

    /// Pre-order traversal, parents before children, in source order.
    ///
    /// Every call produces a fresh sequence.
    #[must_use]
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.collect_preorder(root, &mut out);
        }
        out
    }

    fn collect_preorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        if let Some(node) = self.node(id) {
            for &child in &node.children {
                self.collect_preorder(child, out);
            }
        }
    }

    /// First node in flatten order whose value equals `value`.
    #[must_use]
    pub fn find(&self, value: &str) -> Option<NodeId> {
        self.flatten()
            .into_iter()
            .find(|&id| self.nodes[id.0].value == value)
    }

    /// Looks up a group by its synthesized value, falling back to its label.
    #[must_use]
    pub fn find_group(&self, identifier: &str) -> Option<NodeId> {
        let groups = self.groups();
        groups
            .iter()
            .copied()
            .find(|&id| self.nodes[id.0].value == identifier)
            .or_else(|| {
                groups
                    .iter()
                    .copied()
                    .find(|&id| self.nodes[id.0].label == identifier)
            })
    }

    /// Ancestors of `id`, ordered from the root down to the immediate parent.
    ///
    /// Stops early at a dangling parent link instead of failing, returning the
    /// part of the chain that could be resolved.
    #[must_use]
    pub fn parent_chain(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.node(id).and_then(OptionNode::parent);

        while let Some(parent_id) = current {
            let Some(parent) = self.node(parent_id) else {
                tracing::debug!(node = id.0, broken = parent_id.0, "broken parent link");
                break;
            };
            if chain.len() > self.nodes.len() {
                break;
            }
            chain.push(parent_id);
            current = parent.parent;
        }

        chain.reverse();
        chain
    }

    /// All strict descendants of `id` in pre-order.
    #[must_use]
    pub fn children_recursive(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(node) = self.node(id) {
            for &child in &node.children {
                self.collect_preorder(child, &mut out);
            }
        }
        out
    }

    /// Nodes without children, in flatten order.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        self.flatten()
            .into_iter()
            .filter(|&id| self.nodes[id.0].is_leaf())
            .collect()
    }

    /// Leaf descendants of `id`, or `id` itself if it is a leaf.
    #[must_use]
    pub fn leaves_under(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id) {
            Some(node) if node.is_leaf() => vec![id],
            Some(_) => self
                .children_recursive(id)
                .into_iter()
                .filter(|&d| self.nodes[d.0].is_leaf())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Nodes with children, in flatten order.
    #[must_use]
    pub fn groups(&self) -> Vec<NodeId> {
        self.flatten()
            .into_iter()
            .filter(|&id| self.nodes[id.0].is_group())
            .collect()
    }

    /// Values of every node in flatten order, groups included.
    #[must_use]
    pub fn all_values(&self) -> Vec<String> {
        self.flatten()
            .into_iter()
            .map(|id| self.nodes[id.0].value.clone())
            .collect()
    }

    /// Values of selected leaves in flatten order.
    ///
    /// This is the exported selection: a group's `selected` flag is derived
    /// from its members and never appears here.
    #[must_use]
    pub fn selected_values(&self) -> Vec<String> {
        self.selected_leaves()
            .into_iter()
            .map(|id| self.nodes[id.0].value.clone())
            .collect()
    }

    /// Selected leaves in flatten order.
    #[must_use]
    pub fn selected_leaves(&self) -> Vec<NodeId> {
        self.leaves()
            .into_iter()
            .filter(|&id| self.nodes[id.0].selected)
            .collect()
    }

    /// Enriched data for one node.
    #[must_use]
    pub fn option_data(&self, id: NodeId) -> Option<OptionData> {
        let node = self.node(id)?;
        let group = node
            .parent
            .and_then(|p| self.node(p))
            .map(|p| p.label.clone());
        Some(OptionData {
            value: node.value.clone(),
            label: node.label.clone(),
            disabled: node.disabled,
            group,
        })
    }

    /// Sets `expanded` on a group. Returns `false` for leaves, unknown ids and
    /// groups already in the requested state.
    pub(crate) fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        match self.node_mut(id) {
            Some(node) if node.is_group() && node.expanded != expanded => {
                node.expanded = expanded;
                true
            }
            _ => false,
        }
    }
}
