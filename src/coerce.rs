//! Raw-to-typed value coercion.
//!
//! Pure functions turning one raw value (text from env-style sources, or a
//! JSON-native value) into the option's declared type, plus the post-merge
//! choice validation.

use crate::error::{ConfigError, Result};
use crate::schema::OptionSpec;
use crate::source::RawValue;
use crate::value::{ScalarKind, Value};

/// Text tokens accepted as boolean values (matched case-insensitively).
pub const TRUE_TOKENS: [&str; 4] = ["true", "yes", "y", "1"];
pub const FALSE_TOKENS: [&str; 4] = ["false", "no", "n", "0"];

/// Parse one boolean text token, case-insensitively.
pub fn parse_bool_token(text: &str) -> Option<bool> {
    if TRUE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(false)
    } else {
        None
    }
}

/// Coerce a raw value into the option's declared type.
///
/// Choice constraints are not checked here; see [`check_choices`], which the
/// resolution engine runs over final values only.
pub fn coerce(spec: &OptionSpec, raw: &RawValue) -> Result<Value> {
    let kind = spec.kind();
    match raw {
        RawValue::Typed(value) => {
            if value.matches_kind(kind) {
                Ok(value.clone())
            } else {
                Err(type_error(spec, &value.to_string()))
            }
        }
        RawValue::Text(text) => {
            if kind.is_list() {
                let items = text
                    .split(spec.list_separator())
                    .map(|element| coerce_scalar_text(spec, element.trim()))
                    .collect::<Result<Vec<Value>>>()?;
                Ok(Value::List(items))
            } else {
                coerce_scalar_text(spec, text)
            }
        }
        RawValue::Items(items) => {
            if !kind.is_list() {
                return Err(type_error(spec, &items.join(",")));
            }
            let items = items
                .iter()
                .map(|element| coerce_scalar_text(spec, element))
                .collect::<Result<Vec<Value>>>()?;
            Ok(Value::List(items))
        }
        RawValue::Native(json) => {
            if kind.is_list() {
                match json {
                    serde_json::Value::Array(elements) => {
                        let items = elements
                            .iter()
                            .map(|element| coerce_scalar_json(spec, element))
                            .collect::<Result<Vec<Value>>>()?;
                        Ok(Value::List(items))
                    }
                    other => Err(type_error(spec, &other.to_string())),
                }
            } else {
                coerce_scalar_json(spec, json)
            }
        }
    }
}

/// Validate a resolved value against the option's choices, if any.
///
/// Checked per element for lists. The allowed set is rendered in choice
/// declaration order. The null sentinel always passes.
pub fn check_choices(spec: &OptionSpec, value: &Value) -> Result<()> {
    let Some(choices) = spec.choice_values() else {
        return Ok(());
    };
    let members: Vec<&Value> = match value {
        Value::Null => Vec::new(),
        Value::List(items) => items.iter().collect(),
        scalar => vec![scalar],
    };
    for member in members {
        if !choices.contains(member) {
            return Err(ConfigError::InvalidChoice {
                option: spec.name().to_string(),
                value: member.to_string(),
                allowed: spec.choices_display(),
            });
        }
    }
    Ok(())
}

fn coerce_scalar_text(spec: &OptionSpec, text: &str) -> Result<Value> {
    match spec.kind().element() {
        ScalarKind::Bool => parse_bool_token(text)
            .map(Value::Bool)
            .ok_or_else(|| type_error(spec, text)),
        ScalarKind::Int => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| type_error(spec, text)),
        ScalarKind::Float => text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| type_error(spec, text)),
        ScalarKind::Str => Ok(Value::Str(fold(spec, text))),
    }
}

fn coerce_scalar_json(spec: &OptionSpec, json: &serde_json::Value) -> Result<Value> {
    match (spec.kind().element(), json) {
        // JSON null maps to the unset sentinel for scalar options.
        (_, serde_json::Value::Null) if !spec.kind().is_list() => Ok(Value::Null),
        (ScalarKind::Bool, serde_json::Value::Bool(b)) => Ok(Value::Bool(*b)),
        (ScalarKind::Int, serde_json::Value::Number(n)) => {
            n.as_i64().map(Value::Int).ok_or_else(|| type_error(spec, &n.to_string()))
        }
        (ScalarKind::Float, serde_json::Value::Number(n)) => n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| type_error(spec, &n.to_string())),
        (ScalarKind::Str, serde_json::Value::String(s)) => Ok(Value::Str(fold(spec, s))),
        (_, other) => Err(type_error(spec, &other.to_string())),
    }
}

/// Apply the option's explicit case-folding policy to textual input.
fn fold(spec: &OptionSpec, text: &str) -> String {
    if spec.folds_case() {
        text.to_lowercase()
    } else {
        text.to_string()
    }
}

fn type_error(spec: &OptionSpec, raw: &str) -> ConfigError {
    ConfigError::Type {
        option: spec.name().to_string(),
        raw: raw.to_string(),
        expected: spec.kind().element().name(),
    }
}
