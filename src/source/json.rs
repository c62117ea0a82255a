//! JSON config-file source.

use std::path::PathBuf;

use super::{Fetched, RawValue, Source, SourceKind};
use crate::error::{ConfigError, Result};
use crate::schema::Schema;

/// Parses a whole file as one JSON object; keys matching option names
/// contribute JSON-native values. Unknown keys are ignored. Malformed JSON
/// is a Format error carrying the parser's line/column information.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    required: bool,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    /// Treat a missing file as a Format error instead of an empty source.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    fn format_error(&self, message: String) -> ConfigError {
        ConfigError::Format {
            kind: SourceKind::Json,
            path: self.path.clone(),
            message,
        }
    }
}

impl Source for JsonFile {
    fn kind(&self) -> SourceKind {
        SourceKind::Json
    }

    fn fetch(&self, schema: &Schema) -> Result<Fetched> {
        if !self.path.is_file() {
            if self.required {
                return Err(self.format_error("file not found".to_string()));
            }
            return Ok(Fetched::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| self.format_error(err.to_string()))?;
        // serde_json errors carry "at line L column C" position info.
        let parsed: serde_json::Value =
            serde_json::from_str(&content).map_err(|err| self.format_error(err.to_string()))?;
        let serde_json::Value::Object(object) = parsed else {
            return Err(self.format_error("top level is not a JSON object".to_string()));
        };

        let mut fetched = Fetched::new();
        for spec in schema.iter() {
            if let Some(value) = object.get(spec.name()) {
                fetched.insert(spec.name().to_string(), RawValue::Native(value.clone()));
            }
        }
        Ok(fetched)
    }
}
