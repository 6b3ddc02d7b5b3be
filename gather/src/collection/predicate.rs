use std::cmp::Ordering;

use crate::collection::Fallback;
use crate::common::path::get_path;
use crate::common::Value;

/// Comparison operator of a (key, operator, value) where-clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Loose equality (`=`, `==`).
    Eq,
    /// Loose inequality (`!=`, `<>`).
    NotEq,
    /// Loose less-than.
    Lt,
    /// Loose greater-than.
    Gt,
    /// Loose less-than-or-equal.
    Le,
    /// Loose greater-than-or-equal.
    Ge,
    /// Strict equality (`===`).
    StrictEq,
    /// Strict inequality (`!==`).
    StrictNotEq,
}

impl CompareOp {
    /// Parses an operator symbol. Unknown symbols default to loose
    /// equality.
    pub fn parse(symbol: &str) -> CompareOp {
        match symbol {
            "=" | "==" => CompareOp::Eq,
            "!=" | "<>" => CompareOp::NotEq,
            "<" => CompareOp::Lt,
            ">" => CompareOp::Gt,
            "<=" => CompareOp::Le,
            ">=" => CompareOp::Ge,
            "===" => CompareOp::StrictEq,
            "!==" => CompareOp::StrictNotEq,
            _ => {
                log::debug!(
                    "unknown comparison operator {:?}, defaulting to equality",
                    symbol
                );
                CompareOp::Eq
            }
        }
    }

    /// The inequality class: operators that hold when a loose-type
    /// mismatch makes the operands incomparable.
    #[inline]
    pub fn is_negation(&self) -> bool {
        matches!(self, CompareOp::NotEq | CompareOp::StrictNotEq)
    }
}

/// Builds a predicate from a (key, operator, value) triple.
///
/// The item's value is retrieved at `key` through the dotted-path
/// accessor. When exactly one side of the comparison is object-like and
/// the two sides are not both strings, the pair is incomparable: the
/// predicate holds for the inequality operators and fails for everything
/// else. Otherwise the operator dispatches over loose equality, loose
/// ordering or strict equality.
pub(crate) fn where_predicate(
    key: String,
    op: CompareOp,
    probe: Value,
) -> impl Fn(&Value) -> bool {
    move |item| {
        let retrieved = get_path(item, Some(&key), Fallback::null());

        let both_strings = retrieved.is_str() && probe.is_str();
        let object_count =
            usize::from(retrieved.is_object_like()) + usize::from(probe.is_object_like());
        if !both_strings && object_count == 1 {
            return op.is_negation();
        }

        match op {
            CompareOp::Eq => retrieved.loose_eq(&probe),
            CompareOp::NotEq => !retrieved.loose_eq(&probe),
            CompareOp::Lt => retrieved.loose_cmp(&probe) == Ordering::Less,
            CompareOp::Gt => retrieved.loose_cmp(&probe) == Ordering::Greater,
            CompareOp::Le => retrieved.loose_cmp(&probe) != Ordering::Greater,
            CompareOp::Ge => retrieved.loose_cmp(&probe) != Ordering::Less,
            CompareOp::StrictEq => retrieved.strict_eq(&probe),
            CompareOp::StrictNotEq => !retrieved.strict_eq(&probe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Record;
    use crate::value;

    #[test]
    fn test_parse_symbols() {
        assert_eq!(CompareOp::parse("="), CompareOp::Eq);
        assert_eq!(CompareOp::parse("=="), CompareOp::Eq);
        assert_eq!(CompareOp::parse("!="), CompareOp::NotEq);
        assert_eq!(CompareOp::parse("<>"), CompareOp::NotEq);
        assert_eq!(CompareOp::parse("<"), CompareOp::Lt);
        assert_eq!(CompareOp::parse(">="), CompareOp::Ge);
        assert_eq!(CompareOp::parse("==="), CompareOp::StrictEq);
        assert_eq!(CompareOp::parse("!=="), CompareOp::StrictNotEq);
        // unknown operator defaults to loose equality
        assert_eq!(CompareOp::parse("like"), CompareOp::Eq);
    }

    #[test]
    fn test_predicate_loose_equality_across_types() {
        let pred = where_predicate("price".to_string(), CompareOp::Eq, Value::from("50"));
        assert!(pred(&value!({ price: 50 })));
        assert!(pred(&value!({ price: "50" })));
        assert!(!pred(&value!({ price: 40 })));
    }

    #[test]
    fn test_predicate_ordering() {
        let gt = where_predicate("total".to_string(), CompareOp::Gt, Value::Int(15));
        assert!(gt(&value!({ total: 20 })));
        assert!(!gt(&value!({ total: 15 })));
        let le = where_predicate("total".to_string(), CompareOp::Le, Value::Int(15));
        assert!(le(&value!({ total: 15 })));
        assert!(le(&value!({ total: "9" })));
    }

    #[test]
    fn test_predicate_strict() {
        let strict = where_predicate("n".to_string(), CompareOp::StrictEq, Value::Int(1));
        assert!(strict(&value!({ n: 1 })));
        assert!(!strict(&value!({ n: "1" })));
        let strict_ne =
            where_predicate("n".to_string(), CompareOp::StrictNotEq, Value::Int(1));
        assert!(strict_ne(&value!({ n: "1" })));
    }

    #[test]
    fn test_predicate_missing_key_compares_null() {
        let pred = where_predicate("absent".to_string(), CompareOp::Eq, Value::Null);
        assert!(pred(&value!({ other: 1 })));
    }

    #[test]
    fn test_object_mismatch_short_circuit() {
        let mut record = Record::new();
        record.set("id", 1);
        let item = value!({ owner: (record) });

        // object against a non-object: only inequality operators hold
        for (op, expected) in [
            (CompareOp::Eq, false),
            (CompareOp::NotEq, true),
            (CompareOp::Lt, false),
            (CompareOp::Gt, false),
            (CompareOp::Le, false),
            (CompareOp::Ge, false),
            (CompareOp::StrictEq, false),
            (CompareOp::StrictNotEq, true),
        ] {
            let pred = where_predicate("owner".to_string(), op, Value::Int(5));
            assert_eq!(pred(&item), expected, "operator {:?}", op);
        }
    }

    #[test]
    fn test_object_vs_object_compares_structurally() {
        let mut record = Record::new();
        record.set("id", 1);
        let item = value!({ owner: (record.clone()) });
        let pred = where_predicate(
            "owner".to_string(),
            CompareOp::Eq,
            Value::Record(record),
        );
        assert!(pred(&item));
    }
}
