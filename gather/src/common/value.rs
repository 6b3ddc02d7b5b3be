use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::collection::Collection;
use crate::common::{Key, Record};

/// Ordered mapping from [Key] to [Value], the canonical store shape.
///
/// Backed by [IndexMap] so insertion order is preserved, which is
/// semantically meaningful for iteration, first/last and implicit-key
/// appends.
pub type ValueMap = IndexMap<Key, Value>;

/// A numeric operand normalized for cross-type comparison.
#[derive(Clone, Copy, Debug)]
pub(crate) enum NumVal {
    Int(i64),
    Float(f64),
}

/// Compare two numeric operands for equality, promoting to f64 for mixed
/// pairs. NaN is never equal to anything, itself included.
#[inline]
pub(crate) fn num_eq(a: NumVal, b: NumVal) -> bool {
    match (a, b) {
        (NumVal::Int(x), NumVal::Int(y)) => x == y,
        _ => num_as_f64(a) == num_as_f64(b),
    }
}

/// Compare two numeric operands. NaN orders greater than every other
/// number so the ordering stays total.
#[inline]
pub(crate) fn num_cmp(a: NumVal, b: NumVal) -> Ordering {
    match (a, b) {
        (NumVal::Int(x), NumVal::Int(y)) => x.cmp(&y),
        _ => {
            let x = num_as_f64(a);
            let y = num_as_f64(b);
            match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            }
        }
    }
}

/// Add two numeric operands, promoting to float on integer overflow.
#[inline]
pub(crate) fn num_add(a: NumVal, b: NumVal) -> NumVal {
    match (a, b) {
        (NumVal::Int(x), NumVal::Int(y)) => match x.checked_add(y) {
            Some(sum) => NumVal::Int(sum),
            None => NumVal::Float(x as f64 + y as f64),
        },
        _ => NumVal::Float(num_as_f64(a) + num_as_f64(b)),
    }
}

#[inline]
pub(crate) fn num_as_f64(n: NumVal) -> f64 {
    match n {
        NumVal::Int(i) => i as f64,
        NumVal::Float(f) => f,
    }
}

/// Parses a string as a number the way a loosely typed runtime does.
///
/// Leading and trailing ASCII whitespace is ignored. Canonical integers
/// parse to [NumVal::Int]; decimal and scientific notation parse to
/// [NumVal::Float]. Hex, infinity and NaN spellings are not numeric.
/// Integers that overflow i64 fall back to float.
pub(crate) fn parse_numeric(text: &str) -> Option<NumVal> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(NumVal::Int(i));
    }
    // reject alphabetic spellings (inf, nan, hex) that f64 would accept
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().map(NumVal::Float)
}

/// A dynamically typed value held by a [Collection] entry.
///
/// # Variants
///
/// * scalars: [Value::Null], [Value::Bool], [Value::Int], [Value::Float],
///   [Value::Str];
/// * the array class: [Value::Seq] (plain ordered sequence) and
///   [Value::Map] (ordered key-value mapping);
/// * the object class: [Value::Record] (named properties) and
///   [Value::Collection] (a nested collection).
///
/// # Comparison semantics
///
/// `Value` deliberately carries two equality notions. The derived
/// [PartialEq] is strict structural equality, used by tests and ordinary
/// Rust code. The query operations use the loose routines, which replicate
/// coercing comparison with a fixed table:
///
/// * number vs number: numeric, with int/float promotion;
/// * number vs numeric string: numeric; against a non-numeric string
///   the number renders to a string and the pair compares as strings;
/// * numeric string vs numeric string: numeric (`"10"` equals `"1e1"`);
/// * bool vs anything: both sides cast to truthiness;
/// * null equals null and the falsy-empty non-object values (`false`, `0`,
///   `""`, empty sequences and mappings), nothing else;
/// * sequences and mappings compare as key sets with loosely equal values,
///   order insensitive (a sequence addresses its elements `0..n`);
/// * object-like values compare structurally within the same class; any
///   other cross-class pair is unequal.
///
/// Ordering ([Value::loose_cmp]) is total: the same coercions apply and
/// remaining cross-class pairs fall back to a fixed class rank
/// (null < bool < number < string < sequence/mapping < record <
/// collection). NaN orders greater than every number.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
    /// Plain ordered sequence.
    Seq(Vec<Value>),
    /// Ordered key-value mapping.
    Map(ValueMap),
    /// Object-like value with named properties.
    Record(Record),
    /// Nested collection.
    Collection(Collection),
}

impl Value {
    /// Creates a new [Value] from anything implementing [`Into<Value>`].
    pub fn from<T: Into<Value>>(value: T) -> Value {
        value.into()
    }

    /// Creates a [Value] from an [Option], mapping `None` to [Value::Null].
    pub fn from_option<T: Into<Value>>(value: Option<T>) -> Value {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string value if the [Value] is [Value::Str].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the sequence if the [Value] is [Value::Seq].
    #[inline]
    pub fn as_seq(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Seq(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_seq_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Seq(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the mapping if the [Value] is [Value::Map].
    #[inline]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the record if the [Value] is [Value::Record].
    #[inline]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested collection if the [Value] is [Value::Collection].
    #[inline]
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    #[inline]
    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    #[inline]
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Collection(_))
    }

    /// Checks if the [Value] is a number ([Value::Int] or [Value::Float]).
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Checks if the [Value] belongs to the array class (sequence or
    /// mapping).
    #[inline]
    pub fn is_array_like(&self) -> bool {
        matches!(self, Value::Seq(_) | Value::Map(_))
    }

    /// Checks if the [Value] belongs to the object class (record or nested
    /// collection). Object-likeness drives the mismatch short-circuit in
    /// the where-predicate builder.
    #[inline]
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::Record(_) | Value::Collection(_))
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
        )
    }

    /// Truthiness under the loose convention.
    ///
    /// Falsy values are null, `false`, `0`, `0.0`, the empty string, the
    /// string `"0"`, and empty sequences, mappings and collections.
    /// Records are always truthy; so is NaN.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty() && s != "0",
            Value::Seq(s) => !s.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Record(_) => true,
            Value::Collection(c) => !c.is_empty(),
        }
    }

    /// Renders the value as a string under the loose string cast.
    ///
    /// Null and `false` render empty, `true` renders `"1"`, floats drop a
    /// trailing `.0`, sequences and mappings render as the literal
    /// `"Array"`, and object-like values use their `Display` form.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    String::new()
                }
            }
            Value::Int(i) => i.to_string(),
            Value::Float(f) => render_f64(*f),
            Value::Str(s) => s.clone(),
            Value::Seq(_) | Value::Map(_) => "Array".to_string(),
            Value::Record(_) | Value::Collection(_) => self.to_string(),
        }
    }

    /// Coerces the value to a number for sums, averages and forced numeric
    /// sorting.
    ///
    /// Null is 0, booleans are 0/1, numeric strings parse; non-numeric
    /// strings coerce to 0, and array or object values coerce to 0 with a
    /// warning.
    pub(crate) fn to_number(&self) -> NumVal {
        match self {
            Value::Null => NumVal::Int(0),
            Value::Bool(b) => NumVal::Int(i64::from(*b)),
            Value::Int(i) => NumVal::Int(*i),
            Value::Float(f) => NumVal::Float(*f),
            Value::Str(s) => match parse_numeric(s) {
                Some(n) => n,
                None => {
                    log::debug!("non-numeric string {:?} coerced to 0", s);
                    NumVal::Int(0)
                }
            },
            Value::Seq(_) | Value::Map(_) | Value::Record(_) | Value::Collection(_) => {
                log::warn!("array or object value coerced to 0 in numeric context");
                NumVal::Int(0)
            }
        }
    }

    /// Takes the value, replacing it with [Value::Null].
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }

    /// Loose equality under the coercion table documented on the type.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(_), _) | (_, Value::Bool(_)) => self.is_truthy() == other.is_truthy(),
            (Value::Null, v) | (v, Value::Null) => null_loose_eq(v),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                num_eq(self.to_number(), other.to_number())
            }
            (Value::Str(a), Value::Str(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => num_eq(x, y),
                _ => a == b,
            },
            (Value::Str(s), n) if n.is_number() => compare_str_number_eq(s, n),
            (n, Value::Str(s)) if n.is_number() => compare_str_number_eq(s, n),
            (Value::Seq(_) | Value::Map(_), Value::Seq(_) | Value::Map(_)) => {
                array_loose_eq(&array_entries(self), &array_entries(other))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(name, va)| matches!(b.get(name), Some(vb) if va.loose_eq(vb)))
            }
            (Value::Collection(a), Value::Collection(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, va)| matches!(b.lookup(k), Some(vb) if va.loose_eq(vb)))
            }
            _ => false,
        }
    }

    /// Total loose ordering; see the table documented on the type.
    pub fn loose_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Seq(_) | Value::Map(_), Value::Seq(_) | Value::Map(_)) => {
                array_cmp(&array_entries(self), &array_entries(other))
            }
            (Value::Record(a), Value::Record(b)) => {
                array_cmp(&record_entries(a), &record_entries(b))
            }
            (Value::Collection(a), Value::Collection(b)) => {
                array_cmp(&collection_entries(a), &collection_entries(b))
            }
            (Value::Bool(_), _) | (_, Value::Bool(_)) => {
                self.is_truthy().cmp(&other.is_truthy())
            }
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, v) => null_cmp(v),
            (v, Value::Null) => null_cmp(v).reverse(),
            _ => match (numeric_operand(self), numeric_operand(other)) {
                (Some(x), Some(y)) => num_cmp(x, y),
                _ if self.is_scalar() && other.is_scalar() => {
                    self.render().cmp(&other.render())
                }
                _ => self.class_rank().cmp(&other.class_rank()),
            },
        }
    }

    /// Strict equality: same variant and equal payload.
    ///
    /// `Int(1)` is not strictly equal to `Float(1.0)`. Mappings and
    /// object-like values compare order-sensitively; owned values have no
    /// reference identity, so object comparison is structural.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.strict_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((na, va), (nb, vb))| na == nb && va.strict_eq(vb))
            }
            (Value::Collection(a), Value::Collection(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
            }
            _ => false,
        }
    }

    /// Rank used as the deterministic tie-break for cross-class ordering.
    fn class_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Str(_) => 3,
            Value::Seq(_) | Value::Map(_) => 4,
            Value::Record(_) => 5,
            Value::Collection(_) => 6,
        }
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => {
                if f.is_finite() {
                    render_f64(*f)
                } else {
                    "null".to_string()
                }
            }
            Value::Str(s) => format!("\"{}\"", escape_json(s)),
            Value::Seq(items) => {
                let inner = items
                    .iter()
                    .map(|v| v.to_pretty_json(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}]", inner)
            }
            Value::Map(map) => pretty_entries(
                map.iter().map(|(k, v)| (k.to_string(), v)),
                map.len(),
                indent,
            ),
            Value::Record(record) => record.to_pretty_json(indent),
            Value::Collection(coll) => coll.to_pretty_json(indent),
        }
    }
}

/// Renders map-like entries the same way across mappings, records and
/// collections.
pub(crate) fn pretty_entries<'a>(
    entries: impl Iterator<Item = (String, &'a Value)>,
    len: usize,
    indent: usize,
) -> String {
    if len == 0 {
        return "{}".to_string();
    }
    let indent_str = " ".repeat(indent + 2);
    let mut out = String::with_capacity(len * 30 + indent * 2);
    out.push_str("{\n");
    for (key, value) in entries {
        out.push_str(&format!(
            "{}\"{}\": {},\n",
            indent_str,
            escape_json(&key),
            value.to_pretty_json(indent + 2)
        ));
    }
    // drop the trailing comma, keep the newline
    out.truncate(out.len() - 2);
    out.push('\n');
    out.push_str(&" ".repeat(indent));
    out.push('}');
    out
}

pub(crate) fn escape_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a float without a trailing `.0` for whole values.
pub(crate) fn render_f64(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "INF".to_string()
        } else {
            "-INF".to_string()
        }
    } else if f == f.trunc() && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

fn compare_str_number_eq(s: &str, number: &Value) -> bool {
    match parse_numeric(s) {
        Some(n) => num_eq(n, number.to_number()),
        None => s == number.render(),
    }
}

/// Loose equality of null against a non-null, non-bool value.
fn null_loose_eq(v: &Value) -> bool {
    match v {
        Value::Int(i) => *i == 0,
        Value::Float(f) => *f == 0.0,
        Value::Str(s) => s.is_empty(),
        Value::Seq(s) => s.is_empty(),
        Value::Map(m) => m.is_empty(),
        // object-like values never equal null
        Value::Record(_) | Value::Collection(_) => false,
        Value::Null | Value::Bool(_) => true,
    }
}

/// Ordering of null relative to a non-null, non-bool value.
fn null_cmp(v: &Value) -> Ordering {
    match v {
        Value::Int(_) | Value::Float(_) => num_cmp(NumVal::Int(0), v.to_number()),
        Value::Str(s) => "".cmp(s.as_str()),
        Value::Seq(s) => 0.cmp(&s.len()),
        Value::Map(m) => 0.cmp(&m.len()),
        // objects are always truthy, null sorts before them
        Value::Record(_) | Value::Collection(_) => Ordering::Less,
        Value::Null | Value::Bool(_) => Ordering::Equal,
    }
}

fn numeric_operand(v: &Value) -> Option<NumVal> {
    match v {
        Value::Int(i) => Some(NumVal::Int(*i)),
        Value::Float(f) => Some(NumVal::Float(*f)),
        Value::Str(s) => parse_numeric(s),
        _ => None,
    }
}

/// Normalizes the array class to keyed entries: a sequence addresses its
/// elements with integer keys `0..n`.
fn array_entries(v: &Value) -> Vec<(Key, &Value)> {
    match v {
        Value::Seq(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (Key::Int(i as i64), item))
            .collect(),
        Value::Map(map) => map.iter().map(|(k, item)| (k.clone(), item)).collect(),
        _ => Vec::new(),
    }
}

fn record_entries(record: &Record) -> Vec<(Key, &Value)> {
    record
        .iter()
        .map(|(name, v)| (Key::Str(name.clone()), v))
        .collect()
}

fn collection_entries(coll: &Collection) -> Vec<(Key, &Value)> {
    coll.iter().map(|(k, v)| (k.clone(), v)).collect()
}

fn array_loose_eq(a: &[(Key, &Value)], b: &[(Key, &Value)]) -> bool {
    a.len() == b.len()
        && a.iter().all(|(k, va)| {
            b.iter()
                .find(|(kb, _)| kb == k)
                .is_some_and(|(_, vb)| va.loose_eq(vb))
        })
}

/// Array ordering: length first, then the first differing value in the
/// left operand's key order. A key missing on the right makes the left
/// operand greater.
fn array_cmp(a: &[(Key, &Value)], b: &[(Key, &Value)]) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        ord => return ord,
    }
    for (k, va) in a {
        match b.iter().find(|(kb, _)| kb == k) {
            Some((_, vb)) => match va.loose_cmp(vb) {
                Ordering::Equal => continue,
                ord => return ord,
            },
            None => return Ordering::Greater,
        }
    }
    Ordering::Equal
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<Collection> for Value {
    fn from(value: Collection) -> Self {
        Value::Collection(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::from_option(value)
    }
}
