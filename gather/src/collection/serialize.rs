use serde::ser::{Error as SerError, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::collection::Collection;
use crate::common::{Key, Record, Value, ValueMap};
use crate::errors::{ErrorKind, GatherError, GatherResult};

impl Collection {
    /// Produces the plain structural value this collection serializes as.
    ///
    /// Every nested value exposing the serialization contract (nested
    /// collections and records) is recursively unwrapped into a plain
    /// mapping before encoding.
    pub fn json_serialize(&self) -> Value {
        let items: ValueMap = self
            .store()
            .iter()
            .map(|(k, v)| (k.clone(), unwrap_value(v)))
            .collect();
        Value::Map(items)
    }

    /// Encodes the collection as a JSON string.
    ///
    /// Encoding is all-or-nothing: a non-finite float anywhere in the
    /// tree fails with [ErrorKind::SerializationError] and no partial
    /// output is produced. Mapping keys encode as their rendered strings.
    pub fn to_json(&self) -> GatherResult<String> {
        serde_json::to_string(self).map_err(|err| {
            log::error!("failed to encode collection as JSON: {}", err);
            GatherError::new(
                &format!("Failed to encode collection as JSON: {}", err),
                ErrorKind::SerializationError,
            )
        })
    }
}

/// Recursively unwraps nested collections and records into plain
/// mappings.
pub(crate) fn unwrap_value(value: &Value) -> Value {
    match value {
        Value::Seq(items) => Value::Seq(items.iter().map(unwrap_value).collect()),
        Value::Map(map) => Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), unwrap_value(v)))
                .collect(),
        ),
        Value::Record(record) => Value::Map(
            record
                .iter()
                .map(|(name, v)| (Key::Str(name.clone()), unwrap_value(v)))
                .collect(),
        ),
        Value::Collection(coll) => coll.json_serialize(),
        scalar => scalar.clone(),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => {
                if f.is_finite() {
                    serializer.serialize_f64(*f)
                } else {
                    Err(S::Error::custom("non-finite float is not encodable"))
                }
            }
            Value::Str(s) => serializer.serialize_str(s),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => serialize_entries(serializer, map.iter()),
            Value::Record(record) => {
                let mut out = serializer.serialize_map(Some(record.len()))?;
                for (name, v) in record.iter() {
                    out.serialize_entry(name, v)?;
                }
                out.end()
            }
            Value::Collection(coll) => coll.serialize(serializer),
        }
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(serializer, self.store().iter())
    }
}

fn serialize_entries<'a, S: Serializer>(
    serializer: S,
    entries: impl ExactSizeIterator<Item = (&'a Key, &'a Value)>,
) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        out.serialize_entry(&key.to_string(), value)?;
    }
    out.end()
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(i) => serializer.serialize_i64(*i),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            out.serialize_entry(name, value)?;
        }
        out.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collect, value};

    #[test]
    fn test_to_json_scalars() {
        let coll = collect! { name: "Alice", age: 30, score: 1.5, active: true, note: () };
        assert_eq!(
            coll.to_json().unwrap(),
            r#"{"name":"Alice","age":30,"score":1.5,"active":true,"note":null}"#
        );
    }

    #[test]
    fn test_to_json_preserves_order_and_int_keys() {
        let coll = collect! { 1: "b", 0: "a" };
        assert_eq!(coll.to_json().unwrap(), r#"{"1":"b","0":"a"}"#);
    }

    #[test]
    fn test_to_json_nested_structures() {
        let coll = collect! {
            rows: [ { v: 1 }, { v: 2 } ],
            meta: { page: 1 },
        };
        assert_eq!(
            coll.to_json().unwrap(),
            r#"{"rows":[{"v":1},{"v":2}],"meta":{"page":1}}"#
        );
    }

    #[test]
    fn test_to_json_unwraps_nested_collection_and_record() {
        let mut user = crate::common::Record::new();
        user.set("name", "Alice");
        let mut coll = collect! {};
        coll.insert(
            Some(crate::common::Key::Str("inner".to_string())),
            Value::Collection(collect![1, 2]),
        );
        coll.insert(Some(crate::common::Key::Str("user".to_string())), Value::Record(user));
        assert_eq!(
            coll.to_json().unwrap(),
            r#"{"inner":{"0":1,"1":2},"user":{"name":"Alice"}}"#
        );
    }

    #[test]
    fn test_to_json_fails_on_non_finite() {
        let coll = collect![(f64::NAN)];
        let err = coll.to_json().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SerializationError);
        let coll = collect! { nested: { v: (f64::INFINITY) } };
        assert!(coll.to_json().is_err());
    }

    #[test]
    fn test_json_serialize_unwraps() {
        let mut record = crate::common::Record::new();
        record.set("id", 7);
        let mut coll = collect! {};
        coll.insert(
            Some(crate::common::Key::Str("rec".to_string())),
            Value::Record(record),
        );
        let unwrapped = coll.json_serialize();
        let map = unwrapped.as_map().unwrap();
        assert!(map
            .get(&crate::common::Key::Str("rec".to_string()))
            .unwrap()
            .is_map());
    }

    #[test]
    fn test_json_serialize_plain_values_pass_through() {
        let coll = collect! { a: [1, "x"], b: 2 };
        assert_eq!(
            coll.json_serialize(),
            value!({ a: [1, "x"], b: 2 })
        );
    }
}
