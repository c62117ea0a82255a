//! Typed configuration values and their declared kinds.
//!
//! Every option declares an [`OptionKind`]; resolution produces one [`Value`]
//! per option that is guaranteed to match the declared kind.

use std::fmt;

/// Scalar element types an option can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Str,
}

impl ScalarKind {
    /// Name used in error messages and generated help.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Str => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared type of an option: a scalar or a list of scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Scalar(ScalarKind),
    List(ScalarKind),
}

impl OptionKind {
    /// The scalar element type (the kind itself for scalars).
    pub fn element(self) -> ScalarKind {
        match self {
            OptionKind::Scalar(k) | OptionKind::List(k) => k,
        }
    }

    /// Whether this is a list kind.
    pub fn is_list(self) -> bool {
        matches!(self, OptionKind::List(_))
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Scalar(k) => write!(f, "{k}"),
            OptionKind::List(k) => write!(f, "list of {k}"),
        }
    }
}

/// A resolved configuration value.
///
/// `Null` is the "declared but unset" sentinel, legal only as a scalar
/// option's default.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value satisfies the given declared kind.
    ///
    /// `Null` satisfies any scalar kind; a list satisfies a list kind when
    /// every element satisfies the element kind (an empty list always does).
    pub fn matches_kind(&self, kind: OptionKind) -> bool {
        match kind {
            OptionKind::Scalar(k) => self.is_null() || self.matches_scalar(k),
            OptionKind::List(k) => match self {
                Value::List(items) => items.iter().all(|v| v.matches_scalar(k)),
                _ => false,
            },
        }
    }

    fn matches_scalar(&self, kind: ScalarKind) -> bool {
        matches!(
            (self, kind),
            (Value::Bool(_), ScalarKind::Bool)
                | (Value::Int(_), ScalarKind::Int)
                | (Value::Float(_), ScalarKind::Float)
                | (Value::Str(_), ScalarKind::Str)
        )
    }
}

/// Canonical textual rendering: bools as `true`/`false`, numbers via their
/// `Display` form, strings single-quoted, lists bracketed with canonical
/// element forms, the unset sentinel as `null`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "'{s}'"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
