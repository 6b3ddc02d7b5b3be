use std::fmt::{Display, Formatter};

use crate::common::Value;

/// A collection key: an integer or a string.
///
/// Keys follow the normalization rules of a loosely typed ordered array,
/// so two spellings of the same key always collide on one entry:
///
/// * a string holding a canonical decimal integer (`"0"`, `"42"`, `"-7"`:
///   no leading zeros, no sign noise, fits `i64`) normalizes to [`Key::Int`];
/// * floats truncate to their integer part;
/// * booleans become `0`/`1`;
/// * null becomes the empty string key.
///
/// Normalization happens in [`Key::parse`] and [`Key::from_value`]; code
/// constructing keys directly through `From` impls is expected to route
/// string keys through [`Key::parse`] when they may be numeric.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key.
    Int(i64),
    /// String key.
    Str(String),
}

impl Key {
    /// Parses a textual key, normalizing canonical integer strings to
    /// [`Key::Int`].
    pub fn parse(text: &str) -> Key {
        if is_canonical_int(text) {
            if let Ok(i) = text.parse::<i64>() {
                return Key::Int(i);
            }
        }
        Key::Str(text.to_string())
    }

    /// Derives a key from an arbitrary [`Value`], applying the array-key
    /// casts documented on the type.
    ///
    /// Sequences and mappings are not legal keys; their rendered string is
    /// used and a warning logged. Object-like values are stringified
    /// through their `Display` rendering.
    pub fn from_value(value: &Value) -> Key {
        match value {
            Value::Null => Key::Str(String::new()),
            Value::Bool(b) => Key::Int(i64::from(*b)),
            Value::Int(i) => Key::Int(*i),
            Value::Float(f) => Key::Int(*f as i64),
            Value::Str(s) => Key::parse(s),
            Value::Seq(_) | Value::Map(_) => {
                log::warn!("sequence or mapping used as a key; using its rendered string");
                Key::Str(value.render())
            }
            Value::Record(_) | Value::Collection(_) => Key::Str(value.to_string()),
        }
    }

    /// Returns the key as a [`Value`], used when keys participate in value
    /// comparisons (key sorting).
    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(i) => Value::Int(*i),
            Key::Str(s) => Value::Str(s.clone()),
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Key::Str(_))
    }
}

/// A canonical decimal integer has no leading zeros and no leading `+`;
/// `"-0"` is not canonical.
fn is_canonical_int(s: &str) -> bool {
    let digits = match s.strip_prefix('-') {
        Some(rest) => {
            if rest == "0" {
                return false;
            }
            rest
        }
        None => s,
    };
    if digits.is_empty() {
        return false;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return false;
    }
    digits.bytes().all(|b| b.is_ascii_digit()) && s.parse::<i64>().is_ok()
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Int(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::parse(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_int() {
        assert_eq!(Key::parse("0"), Key::Int(0));
        assert_eq!(Key::parse("42"), Key::Int(42));
        assert_eq!(Key::parse("-7"), Key::Int(-7));
    }

    #[test]
    fn test_parse_non_canonical_stays_string() {
        assert_eq!(Key::parse("007"), Key::Str("007".to_string()));
        assert_eq!(Key::parse("-0"), Key::Str("-0".to_string()));
        assert_eq!(Key::parse("+5"), Key::Str("+5".to_string()));
        assert_eq!(Key::parse("1.5"), Key::Str("1.5".to_string()));
        assert_eq!(Key::parse(""), Key::Str(String::new()));
        assert_eq!(Key::parse("name"), Key::Str("name".to_string()));
    }

    #[test]
    fn test_parse_overflowing_int_stays_string() {
        let big = "99999999999999999999999999";
        assert_eq!(Key::parse(big), Key::Str(big.to_string()));
    }

    #[test]
    fn test_from_value_casts() {
        assert_eq!(Key::from_value(&Value::Null), Key::Str(String::new()));
        assert_eq!(Key::from_value(&Value::Bool(true)), Key::Int(1));
        assert_eq!(Key::from_value(&Value::Bool(false)), Key::Int(0));
        assert_eq!(Key::from_value(&Value::Int(9)), Key::Int(9));
        assert_eq!(Key::from_value(&Value::Float(3.9)), Key::Int(3));
        assert_eq!(Key::from_value(&Value::from("50")), Key::Int(50));
        assert_eq!(
            Key::from_value(&Value::from("price")),
            Key::Str("price".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::Int(3).to_string(), "3");
        assert_eq!(Key::Str("a".to_string()).to_string(), "a");
    }
}
