//! Secrets-directory source (one file per option, docker-secret style).

use std::path::PathBuf;

use super::{Fetched, RawValue, Source, SourceKind};
use crate::error::{ConfigError, Result};
use crate::schema::Schema;

/// Reads one file per option from a directory; the filename must equal the
/// option name exactly and the file content (whitespace-trimmed) is the raw
/// value. Options without a matching file are simply absent.
#[derive(Debug, Clone)]
pub struct SecretsDir {
    dir: PathBuf,
    required: bool,
}

impl SecretsDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            required: false,
        }
    }

    /// Treat a missing directory as a Format error instead of an empty
    /// source.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl Source for SecretsDir {
    fn kind(&self) -> SourceKind {
        SourceKind::Secrets
    }

    fn fetch(&self, schema: &Schema) -> Result<Fetched> {
        if !self.dir.is_dir() {
            if self.required {
                return Err(ConfigError::Format {
                    kind: self.kind(),
                    path: self.dir.clone(),
                    message: "directory not found".to_string(),
                });
            }
            return Ok(Fetched::new());
        }

        let mut fetched = Fetched::new();
        for spec in schema.iter() {
            let path = self.dir.join(spec.name());
            if !path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|err| ConfigError::Format {
                kind: self.kind(),
                path: path.clone(),
                message: err.to_string(),
            })?;
            fetched.insert(
                spec.name().to_string(),
                RawValue::Text(content.trim().to_string()),
            );
        }
        Ok(fetched)
    }
}
