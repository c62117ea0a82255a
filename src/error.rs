//! Error types for schema declaration, source parsing, and resolution.

use std::path::PathBuf;

use crate::source::SourceKind;

/// Result type for optstack operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors surfaced by schema linking and configuration resolution.
///
/// Command-line parse failures are deliberately absent: the CLI source
/// terminates the process through clap's native error path instead of
/// returning here (see [`crate::source::CliArgs`]).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The same option name was declared twice in one schema.
    #[error("option '{name}' is declared more than once")]
    DuplicateOption { name: String },

    /// An option declaration is internally inconsistent (default or choices
    /// do not match the declared kind, null default on a list, ...).
    #[error("option '{name}': {message}")]
    InvalidSpec { name: String, message: String },

    /// A declared default is not a member of the declared choices.
    #[error("option '{name}': default {default} is not one of the allowed choices ({allowed})")]
    DefaultNotInChoices {
        name: String,
        default: String,
        allowed: String,
    },

    /// A required source is missing or its content cannot be parsed at all.
    #[error("{kind} source {path}: {message}")]
    Format {
        kind: SourceKind,
        path: PathBuf,
        message: String,
    },

    /// A raw value could not be coerced to the option's declared type.
    #[error("option '{option}': cannot parse {raw:?} as {expected}")]
    Type {
        option: String,
        raw: String,
        expected: &'static str,
    },

    /// A coerced value is not a member of the option's declared choices.
    #[error("option '{option}': invalid choice: {value} (choose from {allowed})")]
    InvalidChoice {
        option: String,
        value: String,
        allowed: String,
    },

    /// An undeclared option name was looked up on a resolved configuration.
    #[error("no such option: '{name}'")]
    UnknownOption { name: String },
}
