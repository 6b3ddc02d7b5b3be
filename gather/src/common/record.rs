use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

use crate::common::value::pretty_entries;
use crate::common::Value;

/// An object-like value: an ordered bag of named properties.
///
/// Records are the object class of the value model. They answer property
/// access in dotted-path resolution, always count as truthy, and trigger
/// the loose-type mismatch short-circuit when compared against
/// non-object values in a where predicate.
///
/// # Examples
///
/// ```ignore
/// let mut user = Record::new();
/// user.set("name", "Alice");
/// user.set("age", 30);
/// assert_eq!(user.get("name"), Some(&Value::from("Alice")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Record {
            fields: IndexMap::new(),
        }
    }

    /// Sets a property, replacing any existing value under the same name.
    pub fn set<T: Into<Value>>(&mut self, name: impl Into<String>, value: T) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the property value, or `None` when the record has no such
    /// property.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Checks if the record exposes the named property.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Removes a property, returning its value when present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates the properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        pretty_entries(
            self.fields.iter().map(|(name, v)| (name.clone(), v)),
            self.fields.len(),
            indent,
        )
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_set_get() {
        let mut record = Record::new();
        record.set("name", "Alice");
        record.set("age", 30);
        assert_eq!(record.get("name"), Some(&Value::from("Alice")));
        assert_eq!(record.get("age"), Some(&Value::Int(30)));
        assert!(record.get("missing").is_none());
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_set_replaces() {
        let mut record = Record::new();
        record.set("status", "inactive");
        record.set("status", "active");
        assert_eq!(record.get("status"), Some(&Value::from("active")));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_record_remove() {
        let mut record = Record::new();
        record.set("tmp", 1);
        assert_eq!(record.remove("tmp"), Some(Value::Int(1)));
        assert!(record.is_empty());
        assert!(record.remove("tmp").is_none());
    }

    #[test]
    fn test_record_preserves_order() {
        let mut record = Record::new();
        record.set("z", 1);
        record.set("a", 2);
        let names: Vec<&String> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["z", "a"]);
    }

    #[test]
    fn test_record_display() {
        let mut record = Record::new();
        record.set("id", 7);
        assert_eq!(format!("{}", record), "{\n  \"id\": 7\n}");
    }
}
