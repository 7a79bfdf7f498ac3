//! Property: selection operations keep tri-state, disabled and exclusivity
//! invariants under arbitrary operation sequences.

use std::collections::HashSet;

use proptest::prelude::*;

use selectree::domain::{NodeId, OptionTree};
use selectree::selection::{multi, single};

use crate::strategies;

fn multi_tree(entries: &[selectree::domain::SourceEntry]) -> OptionTree {
    let mut tree = OptionTree::parse(entries, true);
    multi::refresh_all_groups(&mut tree);
    tree
}

fn pick(tree: &OptionTree, index: usize) -> Option<NodeId> {
    let order = tree.flatten();
    if order.is_empty() {
        None
    } else {
        Some(order[index % order.len()])
    }
}

fn assert_tri_state(tree: &OptionTree) -> Result<(), TestCaseError> {
    for group in tree.groups() {
        let node = tree.node(group).unwrap();
        let leaves = tree.leaves_under(group);
        let selected = leaves
            .iter()
            .filter(|&&leaf| tree.node(leaf).unwrap().selected)
            .count();

        prop_assert_eq!(node.selected, !leaves.is_empty() && selected == leaves.len());
        prop_assert_eq!(node.indeterminate, selected > 0 && selected < leaves.len());
        prop_assert!(!(node.selected && node.indeterminate));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]

    #[test]
    fn property_tri_state_holds_after_random_toggles(
        entries in strategies::entries(),
        ops in prop::collection::vec(any::<usize>(), 0..24),
    ) {
        let mut tree = multi_tree(&entries);
        assert_tri_state(&tree)?;

        for op in ops {
            if let Some(id) = pick(&tree, op) {
                multi::toggle(&mut tree, id, true);
                assert_tri_state(&tree)?;
            }
        }
    }

    #[test]
    fn property_cascading_select_is_idempotent(entries in strategies::entries()) {
        let mut tree = multi_tree(&entries);
        for root in tree.roots().to_vec() {
            multi::select(&mut tree, root, true);
            let once = tree.clone();
            multi::select(&mut tree, root, true);
            prop_assert_eq!(&tree, &once);
        }
    }

    #[test]
    fn property_disabled_leaves_never_gain_selection(
        entries in strategies::entries(),
        ops in prop::collection::vec((0u8..4, any::<usize>()), 0..24),
    ) {
        let mut tree = multi_tree(&entries);
        let initially: HashSet<NodeId> = tree
            .leaves()
            .into_iter()
            .filter(|&id| tree.node(id).unwrap().selected)
            .collect();

        for (kind, index) in ops {
            let Some(id) = pick(&tree, index) else { continue };
            match kind {
                0 => multi::toggle(&mut tree, id, true),
                1 => multi::select(&mut tree, id, index % 2 == 0),
                2 => { multi::select_all_leaves(&mut tree); }
                _ => { multi::clear_all(&mut tree); }
            }
        }

        for leaf in tree.leaves() {
            let node = tree.node(leaf).unwrap();
            if node.disabled {
                prop_assert_eq!(node.selected, initially.contains(&leaf));
            }
        }
    }

    #[test]
    fn property_single_selection_is_exclusive(
        entries in strategies::entries(),
        picks in prop::collection::vec((0usize..24, any::<bool>()), 1..16),
    ) {
        let mut tree = OptionTree::parse(&entries, true);
        single::enforce_exclusive(&mut tree);
        prop_assert!(tree.selected_leaves().len() <= 1);

        for (n, allow_deselect) in picks {
            let value = format!("v{n}");
            let result = single::select_exclusive(&mut tree, &value, allow_deselect);

            let selected: Vec<_> = tree
                .flatten()
                .into_iter()
                .filter(|&id| tree.node(id).unwrap().selected)
                .collect();
            prop_assert!(selected.len() <= 1);
            prop_assert_eq!(result, single::current(&tree));
        }
    }
}
