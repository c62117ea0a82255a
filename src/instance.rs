//! The immutable resolved configuration instance.

use std::fmt;
use std::ops::Index;

use crate::error::{ConfigError, Result};
use crate::schema::Schema;
use crate::value::Value;

/// Placeholder shown for explicitly redacted options.
pub const REDACTED: &str = "--REDACTED--";
/// Placeholder shown for options matching an autoredact token.
pub const AUTO_REDACTED: &str = "--AUTO-REDACTED--";

/// The resolved configuration: one typed value per declared option.
///
/// Never partially populated: the resolution engine either fills every
/// option or fails. Immutable after construction and safe to share across
/// threads. Redaction affects display only; programmatic access always
/// returns the real value.
#[derive(Debug, Clone)]
pub struct Config {
    schema: Schema,
    values: Vec<Value>,
    autoredact: Vec<String>,
}

impl Config {
    pub(crate) fn new(schema: Schema, values: Vec<Value>, autoredact: Vec<String>) -> Self {
        Self {
            schema,
            values,
            autoredact,
        }
    }

    /// The schema this configuration was resolved against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Look up a resolved value by option name.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.schema
            .index_of(name)
            .map(|idx| &self.values[idx])
            .ok_or_else(|| ConfigError::UnknownOption {
                name: name.to_string(),
            })
    }

    /// Whether an option with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.schema.contains(name)
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .iter()
            .zip(self.values.iter())
            .map(|(spec, value)| (spec.name(), value))
    }

    /// A boolean option's value (`None` when unset).
    pub fn bool_value(&self, name: &str) -> Result<Option<bool>> {
        match self.get(name)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            other => Err(self.access_error(name, other, "bool")),
        }
    }

    /// An integer option's value (`None` when unset).
    pub fn int_value(&self, name: &str) -> Result<Option<i64>> {
        match self.get(name)? {
            Value::Null => Ok(None),
            Value::Int(n) => Ok(Some(*n)),
            other => Err(self.access_error(name, other, "int")),
        }
    }

    /// A float option's value (`None` when unset).
    pub fn float_value(&self, name: &str) -> Result<Option<f64>> {
        match self.get(name)? {
            Value::Null => Ok(None),
            Value::Float(x) => Ok(Some(*x)),
            other => Err(self.access_error(name, other, "float")),
        }
    }

    /// A string option's value (`None` when unset).
    pub fn str_value(&self, name: &str) -> Result<Option<&str>> {
        match self.get(name)? {
            Value::Null => Ok(None),
            Value::Str(s) => Ok(Some(s)),
            other => Err(self.access_error(name, other, "string")),
        }
    }

    /// A list option's resolved elements.
    pub fn list_value(&self, name: &str) -> Result<&[Value]> {
        match self.get(name)? {
            Value::List(items) => Ok(items),
            other => Err(self.access_error(name, other, "list")),
        }
    }

    /// A list-of-string option's elements.
    pub fn str_list(&self, name: &str) -> Result<Vec<&str>> {
        self.list_value(name)?
            .iter()
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| self.access_error(name, v, "string"))
            })
            .collect()
    }

    /// A list-of-bool option's elements.
    pub fn bool_list(&self, name: &str) -> Result<Vec<bool>> {
        self.list_value(name)?
            .iter()
            .map(|v| {
                v.as_bool()
                    .ok_or_else(|| self.access_error(name, v, "bool"))
            })
            .collect()
    }

    /// A list-of-int option's elements.
    pub fn int_list(&self, name: &str) -> Result<Vec<i64>> {
        self.list_value(name)?
            .iter()
            .map(|v| v.as_int().ok_or_else(|| self.access_error(name, v, "int")))
            .collect()
    }

    /// A list-of-float option's elements.
    pub fn float_list(&self, name: &str) -> Result<Vec<f64>> {
        self.list_value(name)?
            .iter()
            .map(|v| {
                v.as_float()
                    .ok_or_else(|| self.access_error(name, v, "float"))
            })
            .collect()
    }

    /// The display lines emitted by [`log`](Config::log): a header followed
    /// by `  name: value` per option in declaration order, with redaction
    /// placeholders substituted.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.len() + 1);
        lines.push("running configuration:".to_string());
        for (spec, value) in self.schema.iter().zip(self.values.iter()) {
            let shown = if spec.is_redacted() {
                REDACTED.to_string()
            } else if self.is_autoredacted(spec.name()) {
                AUTO_REDACTED.to_string()
            } else {
                value.to_string()
            };
            lines.push(format!("  {}: {}", spec.name(), shown));
        }
        lines
    }

    /// Log the running configuration at INFO, one line per option in
    /// declaration order. Redacted values never reach the log.
    pub fn log(&self) {
        for line in self.render_lines() {
            tracing::info!("{line}");
        }
    }

    fn is_autoredacted(&self, name: &str) -> bool {
        self.autoredact.iter().any(|token| name.contains(token))
    }

    fn access_error(&self, name: &str, value: &Value, expected: &'static str) -> ConfigError {
        ConfigError::Type {
            option: name.to_string(),
            raw: value.to_string(),
            expected,
        }
    }
}

/// Mapping-style access; panics on undeclared names (use
/// [`get`](Config::get) for a fallible lookup).
impl Index<&str> for Config {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Ok(value) => value,
            Err(_) => panic!("no such option: '{name}'"),
        }
    }
}

/// Field-by-field equality in declaration order; two resolutions of
/// identical sources compare equal.
impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.render_lines().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
