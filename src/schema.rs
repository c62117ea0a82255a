//! Option declarations and the linked schema registry.
//!
//! An application declares its options through [`OptionSpec`] constructors,
//! collects them with [`SchemaBuilder::option`], and finalizes the set with
//! [`SchemaBuilder::link`]. Linking consumes the builder, so a schema can
//! never be re-linked or extended after the fact; the resulting [`Schema`]
//! is immutable and cheap to share across resolutions.

use std::collections::HashMap;
use std::sync::Arc;

use heck::ToKebabCase;

use crate::error::{ConfigError, Result};
use crate::value::{OptionKind, ScalarKind, Value};

/// Declaration of a single configuration option.
///
/// Cross-validation of `default` and `choices` against the declared kind
/// happens when the enclosing schema is linked, not at resolution time.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    name: String,
    kind: OptionKind,
    default: Value,
    choices: Option<Vec<Value>>,
    separator: String,
    redact: bool,
    fold_case: bool,
    doc: String,
}

impl OptionSpec {
    fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        let default = if kind.is_list() {
            Value::List(Vec::new())
        } else {
            Value::Null
        };
        Self {
            name: name.into(),
            kind,
            default,
            choices: None,
            separator: ",".to_string(),
            redact: false,
            fold_case: false,
            doc: String::new(),
        }
    }

    /// Declare a boolean option (defaults to unset).
    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Scalar(ScalarKind::Bool))
    }

    /// Declare an integer option (defaults to unset).
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Scalar(ScalarKind::Int))
    }

    /// Declare a float option (defaults to unset).
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Scalar(ScalarKind::Float))
    }

    /// Declare a string option (defaults to unset).
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Scalar(ScalarKind::Str))
    }

    /// Declare a list-of-bool option (defaults to empty).
    pub fn bool_list(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::List(ScalarKind::Bool))
    }

    /// Declare a list-of-int option (defaults to empty).
    pub fn int_list(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::List(ScalarKind::Int))
    }

    /// Declare a list-of-float option (defaults to empty).
    pub fn float_list(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::List(ScalarKind::Float))
    }

    /// Declare a list-of-string option (defaults to empty).
    pub fn string_list(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::List(ScalarKind::Str))
    }

    /// Set the default value. Must match the declared kind at link time.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Restrict the option to a closed set of allowed values.
    ///
    /// Choices apply to the scalar element type and are checked per element
    /// for list options. Declaration order is preserved in error messages.
    pub fn choices<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Override the separator used to split textual list values (default `,`).
    pub fn separator(mut self, sep: impl Into<String>) -> Self {
        self.separator = sep.into();
        self
    }

    /// Replace this option's displayed value with `--REDACTED--`.
    pub fn redact(mut self, redact: bool) -> Self {
        self.redact = redact;
        self
    }

    /// Lower-case textual input (and JSON strings) before choice validation
    /// and storage. Only meaningful for string options; off by default.
    pub fn fold_case(mut self, fold: bool) -> Self {
        self.fold_case = fold;
        self
    }

    /// Human-readable description, used for generated command-line help.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = text.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn choice_values(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    pub fn list_separator(&self) -> &str {
        &self.separator
    }

    pub fn is_redacted(&self) -> bool {
        self.redact
    }

    pub fn folds_case(&self) -> bool {
        self.fold_case
    }

    pub fn doc_string(&self) -> &str {
        &self.doc
    }

    /// The generated command-line flag name (kebab-case, without dashes).
    pub fn flag_name(&self) -> String {
        self.name.to_kebab_case()
    }

    /// Render the allowed choices in declaration order for error messages.
    pub(crate) fn choices_display(&self) -> String {
        match &self.choices {
            Some(values) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            None => String::new(),
        }
    }

    /// Cross-validate the declaration. Called once at link time.
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::InvalidSpec {
                name: self.name.clone(),
                message: "option name must not be empty".to_string(),
            });
        }
        if self.separator.is_empty() {
            return Err(ConfigError::InvalidSpec {
                name: self.name.clone(),
                message: "list separator must not be empty".to_string(),
            });
        }
        if !self.default.matches_kind(self.kind) {
            return Err(ConfigError::InvalidSpec {
                name: self.name.clone(),
                message: format!(
                    "default {} does not match declared kind {}",
                    self.default, self.kind
                ),
            });
        }
        if let Some(choices) = &self.choices {
            let element = OptionKind::Scalar(self.kind.element());
            for choice in choices {
                if choice.is_null() || !choice.matches_kind(element) {
                    return Err(ConfigError::InvalidSpec {
                        name: self.name.clone(),
                        message: format!(
                            "choice {} does not match element kind {}",
                            choice,
                            self.kind.element()
                        ),
                    });
                }
            }
            // The default must itself satisfy the choice constraint: the
            // member check is per element for list defaults.
            let default_members: Vec<&Value> = match &self.default {
                Value::Null => Vec::new(),
                Value::List(items) => items.iter().collect(),
                scalar => vec![scalar],
            };
            for member in default_members {
                if !choices.contains(member) {
                    return Err(ConfigError::DefaultNotInChoices {
                        name: self.name.clone(),
                        default: member.to_string(),
                        allowed: self.choices_display(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The finalized, ordered registry of option declarations.
///
/// Produced exactly once per configuration definition by
/// [`SchemaBuilder::link`]. Insertion order determines iteration order,
/// display order, and generated help order. Cloning is cheap (shared
/// storage) and reads are safe from any number of threads.
#[derive(Debug, Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

#[derive(Debug)]
struct SchemaInner {
    options: Vec<OptionSpec>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Start declaring a new schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder {
            options: Vec::new(),
        }
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.inner.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.options.is_empty()
    }

    /// Whether an option with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.index.contains_key(name)
    }

    /// Look up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.inner
            .index
            .get(name)
            .map(|&idx| &self.inner.options[idx])
    }

    /// Iterate declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.inner.options.iter()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.inner.index.get(name).copied()
    }

    pub(crate) fn option_at(&self, idx: usize) -> &OptionSpec {
        &self.inner.options[idx]
    }
}

/// Collects option declarations until [`link`](SchemaBuilder::link) is
/// called. Linking consumes the builder.
#[derive(Debug)]
pub struct SchemaBuilder {
    options: Vec<OptionSpec>,
}

impl SchemaBuilder {
    /// Declare one option. Duplicate names are rejected at link time.
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    /// Finalize the schema, validating every declaration.
    ///
    /// This is the one-time "link" step: duplicate names, kind mismatches in
    /// defaults or choices, and defaults outside the declared choices all
    /// fail here, before any source is ever consulted.
    pub fn link(self) -> Result<Schema> {
        let mut index = HashMap::with_capacity(self.options.len());
        for (idx, spec) in self.options.iter().enumerate() {
            spec.validate()?;
            if index.insert(spec.name().to_string(), idx).is_some() {
                return Err(ConfigError::DuplicateOption {
                    name: spec.name().to_string(),
                });
            }
        }
        Ok(Schema {
            inner: Arc::new(SchemaInner {
                options: self.options,
                index,
            }),
        })
    }
}
