use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use showcase_core::{Catalog, MockSource, Product, SearchController, SearchOptions, TodoList};

// Strategy to generate queries biased towards catalog vocabulary
fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z ]{0,6}",
        prop::sample::select(vec!["lap", "PRO", "mini", "watch", "Tablet ", "phone", "zzz"])
            .prop_map(String::from),
    ]
}

fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec("[A-Za-z][A-Za-z ]{0,10}", 0..20).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Product::new(i as u32 + 1, name, (i as u32) * 100))
            .collect()
    })
}

proptest! {
    /// Property: results are exactly the case-insensitive substring matches, in catalog order
    #[test]
    fn prop_filter_matches_definition(products in arb_catalog(), query in arb_query()) {
        let catalog = Catalog::new(products.clone()).unwrap();
        let expected: Vec<Product> = products
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&query.to_lowercase()))
            .collect();

        prop_assert_eq!(catalog.filter(&query), expected);
    }

    /// Property: empty query returns the full catalog
    #[test]
    fn prop_empty_query_returns_everything(products in arb_catalog()) {
        let catalog = Catalog::new(products.clone()).unwrap();
        prop_assert_eq!(catalog.filter(""), products);
    }

    /// Property: filtering is insensitive to query case
    #[test]
    fn prop_filter_ignores_case(query in arb_query()) {
        let catalog = Catalog::default();
        prop_assert_eq!(catalog.filter(&query.to_uppercase()), catalog.filter(&query.to_lowercase()));
    }

    /// Property: todo ids stay unique whatever mix of adds and deletes happens
    #[test]
    fn prop_todo_ids_unique(ops in prop::collection::vec((any::<bool>(), "[a-z ]{0,5}", 0u64..8), 0..40)) {
        let mut list = TodoList::new();
        for (add, text, id) in ops {
            if add {
                list.add(text);
            } else {
                list.delete(id);
            }
        }

        let mut ids: Vec<u64> = list.items().iter().map(|t| t.id).collect();
        let len = ids.len();
        ids.dedup();
        prop_assert_eq!(ids.len(), len);
        prop_assert!(list.items().windows(2).all(|w| w[0].id < w[1].id));
    }
}

/// N queries typed faster than the debounce delay produce a single fetch with the last one
#[test]
fn test_bursts_of_any_length_coalesce() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();

    for n in 1..=12usize {
        runtime.block_on(async {
            let source = Arc::new(MockSource::new());
            let mut search = SearchController::new(source.clone(), SearchOptions::default());

            let typed: Vec<String> = (1..=n).map(|i| "laptop"[..i.min(6)].to_string()).collect();
            for query in &typed {
                search.set_query(query.clone());
                tokio::time::sleep(Duration::from_millis(749)).await;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;

            assert_eq!(source.calls(), vec![typed[n - 1].clone()], "burst of {}", n);
        });
    }
}
