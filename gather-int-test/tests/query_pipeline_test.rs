use gather::{collect, value, Collection, Key, Value};
use gather_int_test::test_util::accounts;

#[test]
fn test_skip_preserves_original_indices() {
    let rest = accounts().skip(1);
    assert_eq!(rest.len(), 2);
    assert_eq!(
        rest.get(&Key::Int(1)).unwrap(),
        &value!({ account_id: "account-x11", price: "50" })
    );
    assert_eq!(
        rest.get(&Key::Int(2)).unwrap(),
        &value!({ account_id: "account-x5411", price: "40" })
    );
    assert!(rest.get(&Key::Int(0)).is_err());
}

#[test]
fn test_group_by_price() {
    let grouped = accounts().group_by("price", false);
    assert_eq!(grouped.len(), 2);
    let fifty = grouped
        .get(&Key::Int(50))
        .unwrap()
        .as_collection()
        .unwrap()
        .clone();
    assert_eq!(fifty.len(), 2);
    let forty = grouped
        .get(&Key::Int(40))
        .unwrap()
        .as_collection()
        .unwrap()
        .clone();
    assert_eq!(forty.len(), 1);
    assert_eq!(
        forty.first(),
        value!({ account_id: "account-x5411", price: "40" })
    );
}

#[test]
fn test_pluck_reindexes() {
    let ids = accounts().pluck("account_id");
    assert_eq!(ids, collect!["account-x15", "account-x11", "account-x5411"]);
    let keys: Vec<Key> = ids.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, [Key::Int(0), Key::Int(1), Key::Int(2)]);
}

#[test]
fn test_where_keeps_original_keys() {
    let matched = accounts().where_eq("price", "50");
    assert_eq!(matched.len(), 2);
    assert!(matched.contains_key(&Key::Int(0)));
    assert!(matched.contains_key(&Key::Int(1)));
    assert!(!matched.contains_key(&Key::Int(2)));
}

#[test]
fn test_chained_pipeline() {
    // filter loosely, sort stably, project a column
    let ids = accounts()
        .where_eq("price", 50)
        .sort_by("account_id")
        .pluck("account_id");
    assert_eq!(ids, collect!["account-x11", "account-x15"]);
}

#[test]
fn test_map_then_values_preserves_count() {
    let coll = accounts();
    let mapped = coll.map(|v, _| {
        value!({ wrapped: (v.clone()) })
    });
    assert_eq!(mapped.values().len(), coll.len());
}

#[test]
fn test_filter_is_idempotent() {
    let coll = accounts();
    let once = coll.filter(|v, _| {
        !v.loose_eq(&value!({ account_id: "account-x11", price: "50" }))
    });
    let twice = once.filter(|v, _| {
        !v.loose_eq(&value!({ account_id: "account-x11", price: "50" }))
    });
    assert_eq!(once, twice);
}

#[test]
fn test_reverse_reverse_is_identity() {
    let coll = accounts();
    assert_eq!(coll.reverse().reverse(), coll);
    let entries_back: Vec<Key> = coll
        .reverse()
        .reverse()
        .iter()
        .map(|(k, _)| k.clone())
        .collect();
    let entries: Vec<Key> = coll.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(entries_back, entries);
}

#[test]
fn test_sort_by_stability_on_equal_keys() {
    // both "50" items share a sort key; their relative order must survive
    let sorted = accounts().sort_by("price").pluck("account_id");
    assert_eq!(
        sorted,
        collect!["account-x5411", "account-x15", "account-x11"]
    );
}

#[test]
fn test_to_array_round_trips_through_constructor() {
    let coll = accounts();
    assert_eq!(Collection::make(coll.to_array()), coll);
}

#[test]
fn test_aggregates_over_numeric_strings() {
    let coll = accounts();
    assert_eq!(coll.sum_by("price"), Value::Int(140));
    let avg = coll.avg_by("price");
    match avg {
        Value::Float(f) => assert!((f - 140.0 / 3.0).abs() < 1e-9),
        other => panic!("expected float average, got {:?}", other),
    }
    assert_eq!(coll.min_by("price"), Value::from("40"));
    assert_eq!(coll.max_by("price"), Value::from("50"));
}

#[test]
fn test_contains_across_forms() {
    let coll = accounts();
    assert!(coll.contains_where("account_id", "=", "account-x11"));
    assert!(!coll.contains_where("account_id", "=", "account-x99"));
    assert!(coll.contains_by(|v, _| {
        matches!(v, Value::Map(m) if m.len() == 2)
    }));
}

#[test]
fn test_chunk_then_flatten_keeps_everything() {
    let coll = accounts();
    let chunks = coll.chunk(2);
    assert_eq!(chunks.len(), 2);
    let mut total = 0;
    chunks.each(|chunk, _| {
        total += chunk.as_collection().map(Collection::len).unwrap_or(0);
        true
    });
    assert_eq!(total, coll.len());
}

#[test]
fn test_key_by_then_lookup() {
    let keyed = accounts().key_by("account_id");
    assert_eq!(
        keyed
            .get(&Key::Str("account-x5411".to_string()))
            .unwrap(),
        &value!({ account_id: "account-x5411", price: "40" })
    );
}
