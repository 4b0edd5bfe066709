use std::cmp::Ordering;
use std::fmt;

/// A runtime value produced by reading a record or evaluating an expression.
///
/// Every cell read from a record source starts life as a `String`; functions
/// such as `count` and `year` produce `Integer`s, group rows produce `Array`s
/// when asked for a key that is not one of their group columns, and `Nil`
/// stands in for "no value" (an empty date, a missing timestamp).
///
/// # Comparison
///
/// Values of the same variant compare naturally: strings lexicographically,
/// integers numerically, arrays element by element. Values of different
/// variants are never [`equal`](Value::equal) and are ordered by variant rank
/// `Nil < Integer < String < Array`.
///
/// # Examples
///
/// ```
/// use tally_lang::Value;
///
/// let count = Value::Integer(6);
/// assert!(count.is_truthy());
/// assert_eq!(Value::String("54".into()).as_int(), Some(54));
/// assert!(Value::Nil.less(&Value::Integer(1970)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text, the base representation of every record cell
    String(String),

    /// Signed integer
    Integer(i64),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// No value
    Nil,
}

impl Value {
    /// Check if the value is truthy (used by `f.count[...]`)
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::String(s) => !s.is_empty(),
            Value::Integer(n) => *n != 0,
            Value::Array(values) => !values.is_empty(),
            Value::Nil => false,
        }
    }

    /// Get as integer, parsing strings
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Variant name, as reported in type errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Array(_) => "array",
            Value::Nil => "nil",
        }
    }

    /// Size of the value, as reported through the `sz.` namespace
    pub fn len(&self) -> usize {
        match self {
            Value::String(s) => s.chars().count(),
            Value::Integer(_) => 1,
            Value::Array(values) => values.len(),
            Value::Nil => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements of an array, or the value itself as a single element.
    /// `Nil` has no elements.
    pub fn elements(&self) -> Vec<Value> {
        match self {
            Value::Array(values) => values.clone(),
            Value::Nil => Vec::new(),
            v => vec![v.clone()],
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Nil => 0,
            Value::Integer(_) => 1,
            Value::String(_) => 2,
            Value::Array(_) => 3,
        }
    }

    /// Equality with the same rules sorting uses.
    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Strict ordering with the same rules sorting uses.
    pub fn less(&self, other: &Value) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Total ordering over values. Mismatched variants fall back to rank.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.compare(y) {
                        Ordering::Equal => continue,
                        ord => return ord,
                    }
                }
                a.len().cmp(&b.len())
            }
            (Value::Nil, Value::Nil) => Ordering::Equal,
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Array(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                Ok(())
            }
            Value::Nil => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

/// Convert a Value to serde_json::Value
impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Integer(n) => serde_json::Value::Number((*n).into()),
            Value::Array(values) => {
                serde_json::Value::Array(values.iter().map(serde_json::Value::from).collect())
            }
            Value::Nil => serde_json::Value::Null,
        }
    }
}

#[test]
fn test_truthiness() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Integer(0).is_truthy());
    assert!(Value::Integer(-1).is_truthy());
    assert!(!Value::String(String::new()).is_truthy());
    assert!(Value::String("0".into()).is_truthy());
    assert!(!Value::Array(vec![]).is_truthy());
    assert!(Value::Array(vec![Value::Nil]).is_truthy());
}

#[test]
fn test_mixed_variant_ordering() {
    let nil = Value::Nil;
    let int = Value::Integer(2023);
    let string = Value::String("2023".into());

    assert!(nil.less(&int));
    assert!(int.less(&string));
    assert!(!string.less(&int));
    assert!(!int.equal(&string));
}

#[test]
fn test_array_ordering_is_lexicographic() {
    let a = Value::Array(vec![Value::Integer(2021), Value::Integer(12)]);
    let b = Value::Array(vec![Value::Integer(2022), Value::Integer(1)]);
    let c = Value::Array(vec![Value::Integer(2022)]);

    assert!(a.less(&b));
    assert!(c.less(&b));
    assert!(b.equal(&b.clone()));
}

#[test]
fn test_display() {
    let v = Value::Array(vec![Value::String("a".into()), Value::Integer(1), Value::Nil]);
    assert_eq!(v.to_string(), "a, 1, ");
    assert_eq!(Value::Nil.to_string(), "");
}
