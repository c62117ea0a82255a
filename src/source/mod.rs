//! Configuration source adapters.
//!
//! Each adapter answers one question: "which options does this origin
//! provide, and with what raw value?" Absent keys mean "not provided";
//! precedence between sources is the resolution engine's concern, not the
//! adapters'.

mod cli;
mod defaults;
mod envfile;
mod envvars;
mod json;
mod secrets;

pub use cli::CliArgs;
pub use defaults::Defaults;
pub use envfile::EnvFile;
pub use envvars::EnvVars;
pub use json::JsonFile;
pub use secrets::SecretsDir;

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::schema::Schema;
use crate::value::Value;

/// Origin tag for a configuration source, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Defaults,
    Secrets,
    EnvFile,
    EnvVars,
    Json,
    Cli,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Defaults => f.write_str("defaults"),
            SourceKind::Secrets => f.write_str("secrets"),
            SourceKind::EnvFile => f.write_str("envfile"),
            SourceKind::EnvVars => f.write_str("envvars"),
            SourceKind::Json => f.write_str("json"),
            SourceKind::Cli => f.write_str("cli"),
        }
    }
}

/// A raw value contributed by a source, before coercion.
#[derive(Debug, Clone)]
pub enum RawValue {
    /// A single textual value (environment, envfile, secrets, CLI scalars).
    /// List options split this on their configured separator.
    Text(String),
    /// Pre-split list elements (repeated CLI flags); never re-split.
    Items(Vec<String>),
    /// A JSON-native value from the JSON file source.
    Native(serde_json::Value),
    /// An already-typed value (declared defaults).
    Typed(Value),
}

/// A partial mapping from option name to raw value.
pub type Fetched = BTreeMap<String, RawValue>;

/// Uniform interface implemented by every source adapter.
pub trait Source {
    /// Origin tag used in error messages.
    fn kind(&self) -> SourceKind;

    /// Fetch this source's partial mapping for the given schema.
    ///
    /// Only declared option names may appear as keys. A missing optional
    /// backing file yields an empty mapping, not an error.
    fn fetch(&self, schema: &Schema) -> Result<Fetched>;
}
