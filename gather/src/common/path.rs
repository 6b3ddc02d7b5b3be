use smallvec::SmallVec;

use crate::collection::Fallback;
use crate::common::{Key, Value};

/// Segment buffer sized for typical path depths.
type SegmentVec<'a> = SmallVec<[&'a str; 8]>;

/// Resolves a value from an arbitrarily nested structure given a dotted
/// path.
///
/// * `None` path returns the target itself.
/// * Segments walk left to right through mappings, sequences, nested
///   collections (keyed access) and records (property access).
/// * The wildcard segment `*` fans out over every element of the current
///   array-class value (a nested collection expands to its items first) and
///   plucks the remaining path from each; when another `*` remains in the
///   path the result is collapsed one level. The wildcard consumes the
///   remaining path and terminates resolution.
/// * A missing step resolves the `default` instead of failing; suppliers
///   are only invoked on a miss.
///
/// # Examples
///
/// ```ignore
/// let target = value!({ a: { b: { c: 5 } } });
/// assert_eq!(get_path(&target, Some("a.b.c"), Fallback::null()), Value::Int(5));
/// assert_eq!(
///     get_path(&target, Some("a.x.c"), Fallback::value("none")),
///     Value::from("none")
/// );
/// ```
pub fn get_path(target: &Value, path: Option<&str>, default: Fallback) -> Value {
    match path {
        None => target.clone(),
        Some(p) => {
            let segments: SegmentVec = p.split('.').collect();
            get_segments(target, &segments, default)
        }
    }
}

/// Pre-split variant of [get_path].
pub fn get_segments(target: &Value, segments: &[&str], default: Fallback) -> Value {
    let mut current = target;
    for (i, segment) in segments.iter().enumerate() {
        if *segment == "*" {
            let rest = &segments[i + 1..];
            let items: Vec<Value> = match current {
                Value::Collection(coll) => coll.iter().map(|(_, v)| v.clone()).collect(),
                Value::Map(map) => map.values().cloned().collect(),
                Value::Seq(seq) => seq.clone(),
                _ => return default.resolve(),
            };
            let plucked: Vec<Value> = if rest.is_empty() {
                items
            } else {
                items
                    .iter()
                    .map(|item| get_segments(item, rest, Fallback::null()))
                    .collect()
            };
            return if rest.contains(&"*") {
                Value::Seq(collapse(plucked))
            } else {
                Value::Seq(plucked)
            };
        }
        match step(current, segment) {
            Some(next) => current = next,
            None => return default.resolve(),
        }
    }
    current.clone()
}

/// Descends one segment: keyed access for the array class and nested
/// collections, property access for records.
fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Map(map) => map.get(&Key::parse(segment)),
        Value::Seq(items) => match Key::parse(segment) {
            Key::Int(i) if i >= 0 => items.get(i as usize),
            _ => None,
        },
        Value::Collection(coll) => coll.lookup(&Key::parse(segment)),
        Value::Record(record) => record.get(segment),
        _ => None,
    }
}

/// Collapses one nesting level: array-class elements and nested
/// collections splat their values into the result, everything else is
/// dropped.
pub fn collapse(items: Vec<Value>) -> Vec<Value> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Value::Seq(inner) => out.extend(inner),
            Value::Map(map) => out.extend(map.into_values()),
            Value::Collection(coll) => out.extend(coll.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn test_get_path_nested() {
        let target = value!({ a: { b: { c: 5 } } });
        assert_eq!(
            get_path(&target, Some("a.b.c"), Fallback::null()),
            Value::Int(5)
        );
        assert_eq!(
            get_path(&target, Some("a.b"), Fallback::null()),
            value!({ c: 5 })
        );
    }

    #[test]
    fn test_get_path_default_on_miss() {
        let target = value!({ a: { b: { c: 5 } } });
        assert_eq!(
            get_path(&target, Some("a.x.c"), Fallback::value("none")),
            Value::from("none")
        );
        assert_eq!(get_path(&target, Some("missing"), Fallback::null()), Value::Null);
    }

    #[test]
    fn test_get_path_none_returns_target() {
        let target = value!({ a: 1 });
        assert_eq!(get_path(&target, None, Fallback::null()), target);
    }

    #[test]
    fn test_get_path_sequence_index() {
        let target = value!({ items: ["a", "b", "c"] });
        assert_eq!(
            get_path(&target, Some("items.1"), Fallback::null()),
            Value::from("b")
        );
        assert_eq!(
            get_path(&target, Some("items.9"), Fallback::null()),
            Value::Null
        );
        // non-canonical index does not address a sequence position
        assert_eq!(
            get_path(&target, Some("items.01"), Fallback::null()),
            Value::Null
        );
    }

    #[test]
    fn test_get_path_record_property() {
        let mut user = crate::common::Record::new();
        user.set("name", "Alice");
        let target = value!({ user: (user) });
        assert_eq!(
            get_path(&target, Some("user.name"), Fallback::null()),
            Value::from("Alice")
        );
        assert_eq!(
            get_path(&target, Some("user.email"), Fallback::null()),
            Value::Null
        );
    }

    #[test]
    fn test_get_path_wildcard() {
        let target = value!({
            orders: [
                { id: 1, total: 10 },
                { id: 2, total: 20 },
            ]
        });
        assert_eq!(
            get_path(&target, Some("orders.*.total"), Fallback::null()),
            Value::Seq(vec![Value::Int(10), Value::Int(20)])
        );
        // trailing wildcard yields the elements themselves
        assert_eq!(
            get_path(&target, Some("orders.*"), Fallback::null()),
            value!([{ id: 1, total: 10 }, { id: 2, total: 20 }])
        );
    }

    #[test]
    fn test_get_path_double_wildcard_collapses() {
        let target = value!({
            teams: [
                { members: ["ann", "bob"] },
                { members: ["cid"] },
            ]
        });
        assert_eq!(
            get_path(&target, Some("teams.*.members.*"), Fallback::null()),
            Value::Seq(vec![
                Value::from("ann"),
                Value::from("bob"),
                Value::from("cid"),
            ])
        );
    }

    #[test]
    fn test_get_path_wildcard_on_scalar_returns_default() {
        let target = value!({ a: 1 });
        assert_eq!(
            get_path(&target, Some("a.*"), Fallback::value("fallback")),
            Value::from("fallback")
        );
    }

    #[test]
    fn test_get_path_wildcard_miss_fills_null() {
        let target = value!({
            rows: [{ v: 1 }, { other: 2 }]
        });
        assert_eq!(
            get_path(&target, Some("rows.*.v"), Fallback::null()),
            Value::Seq(vec![Value::Int(1), Value::Null])
        );
    }

    #[test]
    fn test_lazy_default_only_invoked_on_miss() {
        use std::cell::Cell;
        use std::rc::Rc;

        let target = value!({ a: 1 });
        let calls = Rc::new(Cell::new(0));
        let calls_probe = Rc::clone(&calls);
        let hit = get_path(
            &target,
            Some("a"),
            Fallback::supplier(move || {
                calls_probe.set(calls_probe.get() + 1);
                Value::Null
            }),
        );
        assert_eq!(hit, Value::Int(1));
        assert_eq!(calls.get(), 0);

        let calls_probe = Rc::clone(&calls);
        let miss = get_path(
            &target,
            Some("b"),
            Fallback::supplier(move || {
                calls_probe.set(calls_probe.get() + 1);
                Value::from("made")
            }),
        );
        assert_eq!(miss, Value::from("made"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_collapse() {
        let items = vec![
            value!([1, 2]),
            value!([3]),
            Value::Int(9),
            value!({ k: 4 }),
        ];
        assert_eq!(
            collapse(items),
            vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
        );
    }
}
