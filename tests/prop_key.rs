use proptest::prelude::*;
use readthrough::intercept::derive_key;
use readthrough::query::{Filter, FindOptions, Order, Query, SortSpec};

fn path_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}"
}

fn filter_strategy() -> impl Strategy<Value = Filter> {
    let leaf = prop_oneof![
        Just(Filter::True),
        (path_strategy(), "[a-zA-Z0-9 ]{0,12}").prop_map(|(p, v)| Filter::eq(p, v)),
        (path_strategy(), any::<i32>()).prop_map(|(p, v)| Filter::eq(p, v)),
        (path_strategy(), any::<bool>())
            .prop_map(|(p, exists)| Filter::Exists { path: p, exists }),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Filter::And),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Filter::Or),
            inner.prop_map(|f| Filter::Not(Box::new(f))),
        ]
    })
}

fn options_strategy() -> impl Strategy<Value = FindOptions> {
    (
        proptest::option::of(path_strategy()),
        proptest::option::of(0usize..100),
        proptest::option::of(0usize..100),
        any::<bool>(),
    )
        .prop_map(|(sort_field, limit, skip, desc)| FindOptions {
            projection: None,
            sort: sort_field.map(|field| {
                vec![SortSpec { field, order: if desc { Order::Desc } else { Order::Asc } }]
            }),
            limit,
            skip,
            distinct: None,
        })
}

proptest! {
    #[test]
    fn derivation_is_deterministic(filter in filter_strategy(), options in options_strategy()) {
        let query = Query::find(filter, options);
        let k1 = derive_key(&query).unwrap();
        let k2 = derive_key(&query).unwrap();
        prop_assert_eq!(k1, k2);
    }

    #[test]
    fn clones_share_a_key(filter in filter_strategy(), options in options_strategy()) {
        let query = Query::find(filter, options);
        let cloned = query.clone();
        prop_assert_eq!(derive_key(&query).unwrap(), derive_key(&cloned).unwrap());
    }

    #[test]
    fn differing_string_values_separate_keys(
        path in path_strategy(),
        a in "[a-z]{1,12}",
        b in "[a-z]{1,12}",
    ) {
        prop_assume!(a != b);
        let qa = Query::find(Filter::eq(path.clone(), a), FindOptions::default());
        let qb = Query::find(Filter::eq(path, b), FindOptions::default());
        prop_assert_ne!(derive_key(&qa).unwrap(), derive_key(&qb).unwrap());
    }
}
