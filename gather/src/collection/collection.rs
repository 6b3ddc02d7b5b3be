use indexmap::IndexMap;
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::collection::predicate::where_predicate;
use crate::collection::{CompareOp, Fallback, Selector};
use crate::common::path::get_path;
use crate::common::value::pretty_entries;
use crate::common::{num_add, Key, NumVal, SortFlag, SortOrder, Value, ValueMap};
use crate::errors::{ErrorKind, GatherError, GatherResult};

/// Predicate over an entry, receiving the value and its key.
pub type PredicateFn = dyn Fn(&Value, &Key) -> bool;

/// An ordered, chainable key-value container with query, transform and
/// aggregation operations.
///
/// A `Collection` maps unique [Key]s to [Value]s and preserves insertion
/// order. Order is semantically meaningful: iteration, [first][Collection::first],
/// [last][Collection::last] and implicit-key appends all follow it.
///
/// The container is value-like: every operation that changes shape or
/// content returns a new `Collection` and leaves the receiver untouched.
/// The two exceptions, kept deliberately, are [insert][Collection::insert]
/// and [push][Collection::push], which mutate the receiver (`push` also
/// returns a snapshot of the result).
///
/// # Examples
///
/// ```ignore
/// let orders = collect!{
///     0: { account_id: "account-x15", price: "50" },
///     1: { account_id: "account-x11", price: "50" },
/// };
///
/// let expensive = orders.where_eq("price", "50");
/// let ids = orders.pluck("account_id");
/// let by_price = orders.group_by("price", false);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    items: ValueMap,
}

impl Collection {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Collection {
            items: IndexMap::new(),
        }
    }

    /// Creates a collection from anything convertible into one: an ordered
    /// mapping, a sequence, a [Value] or another collection.
    pub fn make(items: impl Into<Collection>) -> Collection {
        items.into()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Alias of [len][Collection::len], matching the counting protocol.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns a shallow copy of the underlying store.
    pub fn all(&self) -> ValueMap {
        self.items.clone()
    }

    /// Returns a shallow structural copy as a plain ordered mapping.
    pub fn to_array(&self) -> ValueMap {
        self.items.clone()
    }

    /// Returns the value under `key`.
    ///
    /// Direct keyed access fails with [ErrorKind::KeyNotFound] on a missing
    /// key. This is deliberately asymmetric with the dotted-path accessor,
    /// which returns a default instead of failing.
    pub fn get(&self, key: &Key) -> GatherResult<&Value> {
        match self.items.get(key) {
            Some(value) => Ok(value),
            None => {
                log::error!("key {} not found in collection", key);
                Err(GatherError::new(
                    &format!("Key {} not found", key),
                    ErrorKind::KeyNotFound,
                ))
            }
        }
    }

    /// Non-failing keyed lookup.
    pub fn lookup(&self, key: &Key) -> Option<&Value> {
        self.items.get(key)
    }

    /// Checks if the key exists.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.items.contains_key(key)
    }

    /// Sets a value: with a key, inserts or replaces that entry; without
    /// one, appends under the next integer key (one greater than the
    /// largest non-negative integer key present, `0` for none).
    pub fn insert(&mut self, key: Option<Key>, value: Value) {
        match key {
            Some(k) => {
                self.items.insert(k, value);
            }
            None => {
                let next = self.next_index();
                self.items.insert(Key::Int(next), value);
            }
        }
    }

    /// Removes the entry under `key`, preserving the order of the
    /// remaining entries. Removing a missing key is not an error.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.items.shift_remove(key)
    }

    /// Appends a value under the next integer key, mutating the receiver,
    /// and returns a snapshot of the result.
    ///
    /// The returned collection is an independent copy; later mutation of
    /// the receiver does not affect it.
    pub fn push(&mut self, value: Value) -> Collection {
        self.insert(None, value);
        self.clone()
    }

    /// Keyed variant of [push][Collection::push].
    pub fn push_keyed(&mut self, key: Key, value: Value) -> Collection {
        self.insert(Some(key), value);
        self.clone()
    }

    /// Returns a new collection with `value` prepended. Integer keys are
    /// renumbered sequentially; string keys survive.
    pub fn prepend(&self, value: Value) -> Collection {
        let mut items = ValueMap::new();
        let mut index = 0i64;
        items.insert(Key::Int(index), value);
        index += 1;
        for (k, v) in &self.items {
            match k {
                Key::Str(_) => {
                    items.insert(k.clone(), v.clone());
                }
                Key::Int(_) => {
                    items.insert(Key::Int(index), v.clone());
                    index += 1;
                }
            }
        }
        Collection { items }
    }

    /// Returns a new collection with the keyed entry first. When the key
    /// already exists the prepended entry wins and the original is
    /// dropped; all other keys are preserved unchanged.
    pub fn prepend_keyed(&self, key: Key, value: Value) -> Collection {
        let mut items = ValueMap::new();
        items.insert(key, value);
        for (k, v) in &self.items {
            if !items.contains_key(k) {
                items.insert(k.clone(), v.clone());
            }
        }
        Collection { items }
    }

    /// Iterates entries in store order. The iterator is finite and a new
    /// one can be obtained at any time.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.items.iter()
    }

    // ---- filtering ----

    /// Keeps entries for which the predicate holds. Original keys are
    /// preserved.
    pub fn filter<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> Collection {
        let items = self
            .items
            .iter()
            .filter(|(k, v)| predicate(v, k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Collection { items }
    }

    /// The no-predicate filter: keeps entries whose value is truthy.
    pub fn filter_truthy(&self) -> Collection {
        self.filter(|value, _| value.is_truthy())
    }

    /// Keeps entries for which the predicate does not hold.
    pub fn reject<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> Collection {
        self.filter(|value, key| !predicate(value, key))
    }

    /// Keeps entries not loosely equal to `value`.
    pub fn reject_value(&self, value: &Value) -> Collection {
        self.filter(|item, _| !item.loose_eq(value))
    }

    /// Filters by a (key, operator, value) clause.
    ///
    /// `key` is a dotted path into each item, `op` an operator symbol
    /// (`=`, `==`, `!=`, `<>`, `<`, `>`, `<=`, `>=`, `===`, `!==`; anything
    /// else means equality). Comparison follows the loose table; a
    /// loose-type mismatch against an object-like side only satisfies the
    /// inequality operators.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let cheap = orders.where_field("price", "<", 50);
    /// let named = users.where_field("profile.name", "=", "Alice");
    /// ```
    pub fn where_field(&self, key: &str, op: &str, value: impl Into<Value>) -> Collection {
        let predicate = where_predicate(key.to_string(), CompareOp::parse(op), value.into());
        self.filter(|item, _| predicate(item))
    }

    /// The two-argument where: operator defaults to equality.
    pub fn where_eq(&self, key: &str, value: impl Into<Value>) -> Collection {
        self.where_field(key, "=", value)
    }

    /// Keeps items whose value at `key` is a member of `values`; `strict`
    /// selects identity over loose membership.
    pub fn where_in(&self, key: &str, values: &[Value], strict: bool) -> Collection {
        self.filter(|item, _| {
            let retrieved = get_path(item, Some(key), Fallback::null());
            values.iter().any(|candidate| {
                if strict {
                    retrieved.strict_eq(candidate)
                } else {
                    retrieved.loose_eq(candidate)
                }
            })
        })
    }

    /// Complement of [where_in][Collection::where_in].
    pub fn where_not_in(&self, key: &str, values: &[Value], strict: bool) -> Collection {
        self.filter(|item, _| {
            let retrieved = get_path(item, Some(key), Fallback::null());
            !values.iter().any(|candidate| {
                if strict {
                    retrieved.strict_eq(candidate)
                } else {
                    retrieved.loose_eq(candidate)
                }
            })
        })
    }

    // ---- retrieval ----

    /// Returns the first value, or null when empty.
    pub fn first(&self) -> Value {
        self.first_by_or(None, Fallback::null())
    }

    /// Returns the first value matching the predicate, or null.
    pub fn first_by<F: Fn(&Value, &Key) -> bool + 'static>(&self, predicate: F) -> Value {
        self.first_by_or(Some(&predicate), Fallback::null())
    }

    /// Full form: forward scan with an optional predicate; the default is
    /// resolved lazily when nothing matches.
    pub fn first_by_or(&self, predicate: Option<&PredicateFn>, default: Fallback) -> Value {
        match predicate {
            None => match self.items.first() {
                Some((_, value)) => value.clone(),
                None => default.resolve(),
            },
            Some(predicate) => {
                for (key, value) in &self.items {
                    if predicate(value, key) {
                        return value.clone();
                    }
                }
                default.resolve()
            }
        }
    }

    /// First item satisfying a (key, operator, value) clause.
    pub fn first_where(&self, key: &str, op: &str, value: impl Into<Value>) -> Value {
        let predicate = where_predicate(key.to_string(), CompareOp::parse(op), value.into());
        self.first_by(move |item, _| predicate(item))
    }

    /// Returns the last value, or null when empty.
    pub fn last(&self) -> Value {
        self.last_by_or(None, Fallback::null())
    }

    /// Returns the last value matching the predicate, or null.
    pub fn last_by<F: Fn(&Value, &Key) -> bool + 'static>(&self, predicate: F) -> Value {
        self.last_by_or(Some(&predicate), Fallback::null())
    }

    /// Full form of [last][Collection::last]: reverse scan with an
    /// optional predicate and a lazy default.
    pub fn last_by_or(&self, predicate: Option<&PredicateFn>, default: Fallback) -> Value {
        match predicate {
            None => match self.items.last() {
                Some((_, value)) => value.clone(),
                None => default.resolve(),
            },
            Some(predicate) => {
                for (key, value) in self.items.iter().rev() {
                    if predicate(value, key) {
                        return value.clone();
                    }
                }
                default.resolve()
            }
        }
    }

    /// Loose membership test over the values.
    pub fn contains(&self, value: &Value) -> bool {
        self.items.values().any(|v| v.loose_eq(value))
    }

    /// Existence test with a predicate. A found entry counts even when its
    /// value is null, which is exactly what an existence scan should say.
    pub fn contains_by<F: Fn(&Value, &Key) -> bool>(&self, predicate: F) -> bool {
        self.items.iter().any(|(key, value)| predicate(value, key))
    }

    /// Existence test with a (key, operator, value) clause.
    pub fn contains_where(&self, key: &str, op: &str, value: impl Into<Value>) -> bool {
        let predicate = where_predicate(key.to_string(), CompareOp::parse(op), value.into());
        self.items.values().any(|item| predicate(item))
    }

    // ---- aggregation ----

    /// Numeric sum of the values. Booleans count 0/1, numeric strings
    /// parse, everything else coerces to zero; the result stays an
    /// integer until a float enters the fold.
    pub fn sum(&self) -> Value {
        self.sum_with(None)
    }

    /// Sum of the selected values.
    pub fn sum_by(&self, selector: impl Into<Selector>) -> Value {
        self.sum_with(Some(&selector.into()))
    }

    fn sum_with(&self, selector: Option<&Selector>) -> Value {
        let mut acc = NumVal::Int(0);
        for (key, value) in &self.items {
            let operand = match selector {
                Some(s) => s.select(value, key),
                None => value.clone(),
            };
            acc = num_add(acc, operand.to_number());
        }
        from_num(acc)
    }

    /// Average of the values; `0` when empty. Exact integer division
    /// stays an integer, otherwise the result is a float.
    pub fn avg(&self) -> Value {
        self.avg_with(None)
    }

    /// Average of the selected values.
    pub fn avg_by(&self, selector: impl Into<Selector>) -> Value {
        self.avg_with(Some(&selector.into()))
    }

    fn avg_with(&self, selector: Option<&Selector>) -> Value {
        let count = self.len() as i64;
        if count == 0 {
            return Value::Int(0);
        }
        match self.sum_with(selector) {
            Value::Int(total) if total % count == 0 => Value::Int(total / count),
            Value::Int(total) => Value::Float(total as f64 / count as f64),
            Value::Float(total) => Value::Float(total / count as f64),
            other => other,
        }
    }

    /// Smallest value under loose ordering, skipping nulls; null when
    /// nothing remains.
    pub fn min_value(&self) -> Value {
        self.fold_extreme(None, Ordering::Less)
    }

    /// Smallest selected value; the selector may be a dotted path or a
    /// function.
    pub fn min_by(&self, selector: impl Into<Selector>) -> Value {
        self.fold_extreme(Some(&selector.into()), Ordering::Less)
    }

    /// Largest value under loose ordering, skipping nulls.
    pub fn max_value(&self) -> Value {
        self.fold_extreme(None, Ordering::Greater)
    }

    /// Largest selected value.
    pub fn max_by(&self, selector: impl Into<Selector>) -> Value {
        self.fold_extreme(Some(&selector.into()), Ordering::Greater)
    }

    fn fold_extreme(&self, selector: Option<&Selector>, keep: Ordering) -> Value {
        let mut result: Option<Value> = None;
        for (key, value) in &self.items {
            let candidate = match selector {
                Some(s) => s.select(value, key),
                None => value.clone(),
            };
            if candidate.is_null() {
                continue;
            }
            result = Some(match result {
                None => candidate,
                Some(best) => {
                    if candidate.loose_cmp(&best) == keep {
                        candidate
                    } else {
                        best
                    }
                }
            });
        }
        result.unwrap_or(Value::Null)
    }

    /// Left fold over the values in insertion order.
    pub fn reduce<F: Fn(Value, &Value) -> Value>(&self, f: F, initial: Value) -> Value {
        let mut acc = initial;
        for value in self.items.values() {
            acc = f(acc, value);
        }
        acc
    }

    // ---- transforms ----

    /// Applies `f` to every entry, building a new collection under the
    /// original keys.
    pub fn map<F: Fn(&Value, &Key) -> Value>(&self, f: F) -> Collection {
        let items = self
            .items
            .iter()
            .map(|(k, v)| (k.clone(), f(v, k)))
            .collect();
        Collection { items }
    }

    /// Calls `f` on every entry in order. Returning `false` halts the
    /// iteration early. Nothing is mutated.
    pub fn each<F: FnMut(&Value, &Key) -> bool>(&self, mut f: F) -> &Self {
        for (key, value) in &self.items {
            if !f(value, key) {
                break;
            }
        }
        self
    }

    /// Resolves `value_path` on every item, producing a re-indexed
    /// sequence of the results.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let ids = orders.pluck("account_id");
    /// let totals = orders.pluck("invoice.total");
    /// ```
    pub fn pluck(&self, value_path: &str) -> Collection {
        let mut items = ValueMap::new();
        let mut index = 0i64;
        for item in self.items.values() {
            let plucked = get_path(item, Some(value_path), Fallback::null());
            items.insert(Key::Int(index), plucked);
            index += 1;
        }
        Collection { items }
    }

    /// [pluck][Collection::pluck] re-keyed by the value resolved at
    /// `key_path`; object-like keys are stringified, later duplicates
    /// overwrite earlier ones.
    pub fn pluck_keyed(&self, value_path: &str, key_path: &str) -> Collection {
        let mut items = ValueMap::new();
        for item in self.items.values() {
            let plucked = get_path(item, Some(value_path), Fallback::null());
            let key_value = get_path(item, Some(key_path), Fallback::null());
            items.insert(Key::from_value(&key_value), plucked);
        }
        Collection { items }
    }

    /// Re-keys the items by the selected value; later duplicate keys
    /// overwrite earlier ones.
    pub fn key_by(&self, selector: impl Into<Selector>) -> Collection {
        let selector = selector.into();
        let mut items = ValueMap::new();
        for (key, value) in &self.items {
            let resolved = selector.select(value, key);
            items.insert(Key::from_value(&resolved), value.clone());
        }
        Collection { items }
    }

    /// Groups the items by the selected key.
    ///
    /// A selector yielding a sequence fans the item out into every named
    /// group. Boolean group keys normalize to `0`/`1`. `preserve_keys`
    /// keeps the original keys inside each group; otherwise groups are
    /// re-indexed.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let by_price = orders.group_by("price", false);
    /// let by_flags = posts.group_by(Selector::func(|v, _| v.clone()), false);
    /// ```
    pub fn group_by(&self, selector: impl Into<Selector>, preserve_keys: bool) -> Collection {
        self.group_with(&selector.into(), preserve_keys)
    }

    /// Multi-level grouping: groups by the first selector, then recurses
    /// with the rest inside every group.
    pub fn group_by_many(&self, selectors: &[Selector], preserve_keys: bool) -> Collection {
        match selectors.split_first() {
            None => self.clone(),
            Some((first, rest)) => {
                let grouped = self.group_with(first, preserve_keys);
                if rest.is_empty() {
                    grouped
                } else {
                    grouped.map(|group, _| match group {
                        Value::Collection(inner) => {
                            Value::Collection(inner.group_by_many(rest, preserve_keys))
                        }
                        other => other.clone(),
                    })
                }
            }
        }
    }

    fn group_with(&self, selector: &Selector, preserve_keys: bool) -> Collection {
        let mut groups: IndexMap<Key, Collection> = IndexMap::new();
        for (key, value) in &self.items {
            let group_keys = match selector.select(value, key) {
                Value::Seq(keys) => keys,
                single => vec![single],
            };
            for group_key in group_keys {
                let group = groups.entry(Key::from_value(&group_key)).or_default();
                if preserve_keys {
                    group.items.insert(key.clone(), value.clone());
                } else {
                    group.insert(None, value.clone());
                }
            }
        }
        let items = groups
            .into_iter()
            .map(|(k, group)| (k, Value::Collection(group)))
            .collect();
        Collection { items }
    }

    // ---- ordering ----

    /// Sorts by value under loose ordering, preserving keys. Stable.
    pub fn sort(&self) -> Collection {
        self.sort_by_fn(|a, b| a.loose_cmp(b))
    }

    /// Sorts by value with a caller-supplied comparator, preserving keys.
    /// Stable.
    pub fn sort_by_fn<F: Fn(&Value, &Value) -> Ordering>(&self, compare: F) -> Collection {
        let mut entries = self.entries_vec();
        entries.sort_by(|a, b| compare(&a.1, &b.1));
        Collection {
            items: entries.into_iter().collect(),
        }
    }

    /// Sorts by the selected value, ascending under the regular rule.
    /// Equal keys retain their relative order.
    pub fn sort_by(&self, selector: impl Into<Selector>) -> Collection {
        self.sort_by_with(selector, SortFlag::Regular, SortOrder::Ascending)
    }

    /// Sorts by the selected value, descending.
    pub fn sort_by_desc(&self, selector: impl Into<Selector>) -> Collection {
        self.sort_by_with(selector, SortFlag::Regular, SortOrder::Descending)
    }

    /// Full form: sort by the selected value under an explicit comparison
    /// rule and direction. The sort is stable in both directions.
    pub fn sort_by_with(
        &self,
        selector: impl Into<Selector>,
        flag: SortFlag,
        order: SortOrder,
    ) -> Collection {
        let selector = selector.into();
        let mut entries: Vec<(Key, Value, Value)> = self
            .items
            .iter()
            .map(|(k, v)| (k.clone(), v.clone(), selector.select(v, k)))
            .collect();
        entries.sort_by(|a, b| {
            let ord = flag.compare(&a.2, &b.2);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        Collection {
            items: entries.into_iter().map(|(k, v, _)| (k, v)).collect(),
        }
    }

    /// Sorts the entries by key, ascending.
    pub fn sort_keys(&self) -> Collection {
        self.sort_keys_with(SortFlag::Regular, SortOrder::Ascending)
    }

    /// Sorts the entries by key, descending.
    pub fn sort_keys_desc(&self) -> Collection {
        self.sort_keys_with(SortFlag::Regular, SortOrder::Descending)
    }

    /// Full form of the key sort.
    pub fn sort_keys_with(&self, flag: SortFlag, order: SortOrder) -> Collection {
        let mut entries = self.entries_vec();
        entries.sort_by(|a, b| {
            let ord = flag.compare(&a.0.to_value(), &b.0.to_value());
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        Collection {
            items: entries.into_iter().collect(),
        }
    }

    // ---- slicing ----

    /// Splits into contiguous sub-collections of at most `size` entries,
    /// preserving original keys inside each chunk. A non-positive size
    /// yields an empty collection.
    pub fn chunk(&self, size: i64) -> Collection {
        if size <= 0 {
            return Collection::new();
        }
        let mut chunks = Collection::new();
        let groups = self.items.iter().chunks(size as usize);
        for chunk in &groups {
            let sub: ValueMap = chunk.map(|(k, v)| (k.clone(), v.clone())).collect();
            chunks.insert(None, Value::Collection(Collection { items: sub }));
        }
        chunks
    }

    /// Extracts a contiguous run of entries, preserving keys. A negative
    /// `offset` counts from the end; a negative `length` stops that many
    /// entries short of the end.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> Collection {
        let len = self.len() as i64;
        let start = if offset < 0 {
            (len + offset).max(0)
        } else {
            offset.min(len)
        };
        let end = match length {
            None => len,
            Some(l) if l < 0 => (len + l).max(start),
            Some(l) => (start + l).min(len),
        };
        let items = self
            .items
            .iter()
            .skip(start as usize)
            .take((end - start).max(0) as usize)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Collection { items }
    }

    /// Takes the first `limit` entries; a negative limit takes the last
    /// `|limit|` entries. Keys are preserved.
    pub fn take(&self, limit: i64) -> Collection {
        if limit < 0 {
            self.slice(limit, Some(limit.saturating_neg()))
        } else {
            self.slice(0, Some(limit))
        }
    }

    /// Skips the first `count` entries, preserving keys.
    pub fn skip(&self, count: i64) -> Collection {
        self.slice(count, None)
    }

    /// Extends the collection to `size` entries with copies of `value`:
    /// on the end for a positive size, on the start for a negative one.
    /// Never truncates. Integer keys renumber sequentially; string keys
    /// survive.
    pub fn pad(&self, size: i64, value: Value) -> Collection {
        let target = size.unsigned_abs() as usize;
        let pad_count = target.saturating_sub(self.len());
        if pad_count == 0 {
            return self.clone();
        }
        let mut entries: Vec<(Option<Key>, Value)> = Vec::with_capacity(self.len() + pad_count);
        if size < 0 {
            for _ in 0..pad_count {
                entries.push((None, value.clone()));
            }
        }
        for (k, v) in &self.items {
            let slot = match k {
                Key::Str(_) => Some(k.clone()),
                Key::Int(_) => None,
            };
            entries.push((slot, v.clone()));
        }
        if size > 0 {
            for _ in 0..pad_count {
                entries.push((None, value.clone()));
            }
        }
        let mut items = ValueMap::new();
        let mut index = 0i64;
        for (slot, v) in entries {
            match slot {
                Some(key) => {
                    items.insert(key, v);
                }
                None => {
                    items.insert(Key::Int(index), v);
                    index += 1;
                }
            }
        }
        Collection { items }
    }

    /// Re-indexes the values sequentially, discarding original keys.
    pub fn values(&self) -> Collection {
        let items = self
            .items
            .values()
            .enumerate()
            .map(|(i, v)| (Key::Int(i as i64), v.clone()))
            .collect();
        Collection { items }
    }

    /// Reverses the order, preserving key-value pairing.
    pub fn reverse(&self) -> Collection {
        let items = self
            .items
            .iter()
            .rev()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Collection { items }
    }

    /// Restricts to the given keys, returning the raw subset mapping in
    /// original order. `None` returns every item.
    ///
    /// Unlike its siblings this returns a plain [ValueMap], not a
    /// `Collection`; callers wanting to keep chaining wrap it with
    /// [Collection::make].
    pub fn only(&self, keys: Option<&[Key]>) -> ValueMap {
        match keys {
            None => self.all(),
            Some(keys) => self
                .items
                .iter()
                .filter(|(k, _)| keys.contains(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Joins the items into a string.
    ///
    /// When the first item is structured, `value` is treated as a path:
    /// the path is plucked from every item and the results joined with
    /// `glue` (empty when absent). Otherwise the items themselves are
    /// rendered and joined with `value` as the glue.
    pub fn implode(&self, value: &str, glue: Option<&str>) -> String {
        let first = self.first();
        if first.is_array_like() || first.is_object_like() {
            let glue = glue.unwrap_or("");
            self.pluck(value)
                .items
                .values()
                .map(|v| v.render())
                .join(glue)
        } else {
            self.items.values().map(|v| v.render()).join(value)
        }
    }

    fn entries_vec(&self) -> Vec<(Key, Value)> {
        self.items
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn next_index(&self) -> i64 {
        self.items
            .keys()
            .filter_map(Key::as_int)
            .max()
            .map(|max| if max < 0 { 0 } else { max + 1 })
            .unwrap_or(0)
    }

    pub(crate) fn store(&self) -> &ValueMap {
        &self.items
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        pretty_entries(
            self.items.iter().map(|(k, v)| (k.to_string(), v)),
            self.items.len(),
            indent,
        )
    }
}

fn from_num(n: NumVal) -> Value {
    match n {
        NumVal::Int(i) => Value::Int(i),
        NumVal::Float(f) => Value::Float(f),
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl From<ValueMap> for Collection {
    fn from(items: ValueMap) -> Self {
        Collection { items }
    }
}

impl From<Vec<Value>> for Collection {
    fn from(values: Vec<Value>) -> Self {
        let items = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::Int(i as i64), v))
            .collect();
        Collection { items }
    }
}

impl From<Vec<(Key, Value)>> for Collection {
    fn from(entries: Vec<(Key, Value)>) -> Self {
        Collection {
            items: entries.into_iter().collect(),
        }
    }
}

/// Normalization of arbitrary values into a container:
///
/// * a mapping, sequence or collection flattens into the store;
/// * a record becomes a string-keyed mapping of its properties;
/// * null becomes the empty collection;
/// * any scalar becomes a length-1 container under key `0`.
impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        match value {
            Value::Map(map) => Collection { items: map },
            Value::Seq(seq) => seq.into(),
            Value::Collection(coll) => coll,
            Value::Record(record) => {
                let items = record
                    .iter()
                    .map(|(name, v)| (Key::Str(name.clone()), v.clone()))
                    .collect();
                Collection { items }
            }
            Value::Null => Collection::new(),
            scalar => {
                let mut items = ValueMap::new();
                items.insert(Key::Int(0), scalar);
                Collection { items }
            }
        }
    }
}

impl FromIterator<(Key, Value)> for Collection {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Collection {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Strips the quotes `stringify!` leaves around literal keys.
pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Collection] with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use gather::collect;
///
/// // Empty collection
/// let empty = collect! {};
///
/// // Keyed entries; nested braces become mappings, brackets sequences
/// let orders = collect! {
///     first: { account_id: "account-x15", price: "50" },
///     second: { account_id: "account-x11", price: "50" },
/// };
///
/// // A bare list is keyed 0..n
/// let numbers = collect![1, 2, 3];
/// ```
#[macro_export]
macro_rules! collect {
    // empty collection
    () => {
        $crate::collection::Collection::new()
    };

    // keyed entries
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::value;

            let mut coll = $crate::collection::Collection::new();
            $(
                coll.insert(
                    Some($crate::common::Key::parse(&$crate::collection::normalize(
                        stringify!($key),
                    ))),
                    $crate::value!($value),
                );
            )*
            coll
        }
    };

    // plain sequence, keyed 0..n
    ($($value:tt),+ $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::value;

            let mut coll = $crate::collection::Collection::new();
            $(
                coll.insert(None, $crate::value!($value));
            )*
            coll
        }
    };
}

/// Helper macro converting literals for [collect!]: braces build
/// mappings, brackets build sequences, anything else goes through
/// [`Value::from`].
#[macro_export]
macro_rules! value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            #[allow(unused_mut)]
            let mut map = $crate::common::ValueMap::new();
            $(
                map.insert(
                    $crate::common::Key::parse(&$crate::collection::normalize(
                        stringify!($key),
                    )),
                    $crate::value!($value),
                );
            )*
            $crate::common::Value::Map(map)
        }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Seq(vec![$($crate::value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
