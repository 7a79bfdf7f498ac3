//! Property: search filtering retains exactly the matches and their context,
//! and an empty query restores the unfiltered view.

use proptest::prelude::*;

use selectree::domain::OptionTree;
use selectree::search::{filter_tree, matches, SearchStrategy};

use crate::strategies;

fn strategy() -> impl Strategy<Value = SearchStrategy> {
    prop_oneof![
        Just(SearchStrategy::Contains),
        Just(SearchStrategy::StartsWith),
        Just(SearchStrategy::Exact),
        Just(SearchStrategy::Fuzzy),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]

    #[test]
    fn property_empty_query_restores_full_view(
        entries in strategies::entries(),
        query in "[a-z0-9 ]{0,6}",
        strategy in strategy(),
    ) {
        let mut tree = OptionTree::parse(&entries, true);
        let _ = filter_tree(&mut tree, &query, strategy, true);
        let view = filter_tree(&mut tree, "", strategy, true);

        let mut retained: Vec<String> = view
            .retained(&tree)
            .into_iter()
            .map(|id| tree.node(id).unwrap().value.clone())
            .collect();
        let mut all = tree.all_values();
        retained.sort();
        all.sort();
        prop_assert_eq!(retained, all);
        prop_assert_eq!(view.roots(), tree.roots());
    }

    #[test]
    fn property_retained_nodes_match_or_carry_context(
        entries in strategies::entries(),
        query in "(item|group|[0-9])( [0-9])?",
        strategy in strategy(),
    ) {
        let mut tree = OptionTree::parse(&entries, true);
        let view = filter_tree(&mut tree, &query, strategy, true);

        for id in tree.flatten() {
            let node = tree.node(id).unwrap();
            let self_match = matches(&node.label, &query, strategy);
            let parent_match = node
                .parent()
                .is_some_and(|p| matches(&tree.node(p).unwrap().label, &query, strategy));
            let descendant_match = tree
                .children_recursive(id)
                .into_iter()
                .any(|d| matches(&tree.node(d).unwrap().label, &query, strategy));

            prop_assert_eq!(
                view.contains(id),
                self_match || parent_match || descendant_match,
                "node {} retained incorrectly",
                node.label.clone()
            );
        }

        for &root in view.roots() {
            prop_assert!(view.contains(root));
        }
        prop_assert!(view.result_count(&tree) <= tree.leaves().len());
    }
}
