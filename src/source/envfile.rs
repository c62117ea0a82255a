//! Env-file source (`KEY=VALUE`, one assignment per line).

use std::path::PathBuf;

use super::{Fetched, RawValue, Source, SourceKind};
use crate::error::{ConfigError, Result};
use crate::schema::Schema;

/// Parses a line-oriented `KEY=VALUE` file.
///
/// Keys match option names case-insensitively with `-`/`_` normalized.
/// Blank lines and `#` comments are skipped. A line without `=` is a
/// Format error when the source is required, otherwise it is skipped.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
    required: bool,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    /// Treat a missing file or malformed line as a Format error.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    fn format_error(&self, message: String) -> ConfigError {
        ConfigError::Format {
            kind: SourceKind::EnvFile,
            path: self.path.clone(),
            message,
        }
    }
}

/// Normalize a key for matching: lower-case with hyphens mapped to
/// underscores.
fn normalize(key: &str) -> String {
    key.trim().to_lowercase().replace('-', "_")
}

impl Source for EnvFile {
    fn kind(&self) -> SourceKind {
        SourceKind::EnvFile
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

        let mut fetched = Fetched::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                if self.required {
                    return Err(self.format_error(format!(
                        "line {}: missing '=' in {line:?}",
                        lineno + 1
                    )));
                }
                continue;
            };
            let key = normalize(key);
            let matched = schema.iter().find(|spec| normalize(spec.name()) == key);
            if let Some(spec) = matched {
                fetched.insert(
                    spec.name().to_string(),
                    RawValue::Text(value.trim().to_string()),
                );
            }
        }
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OptionSpec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn schema() -> Schema {
        Schema::builder()
            .option(OptionSpec::int("batch_size"))
            .option(OptionSpec::string("favorite_color").default("blue"))
            .link()
            .unwrap()
    }

    fn envfile(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parses_assignments_case_insensitively() {
        let file = envfile("BATCH_SIZE=65535\nfavorite-color=green\n");
        let fetched = EnvFile::new(file.path()).fetch(&schema()).unwrap();
        assert_eq!(fetched.len(), 2);
        assert!(matches!(
            fetched.get("batch_size"),
            Some(RawValue::Text(text)) if text == "65535"
        ));
        assert!(matches!(
            fetched.get("favorite_color"),
            Some(RawValue::Text(text)) if text == "green"
        ));
    }

    #[test]
    fn test_blank_lines_and_comments_skipped() {
        let file = envfile("\n# comment\nBATCH_SIZE=1\n");
        let fetched = EnvFile::new(file.path()).fetch(&schema()).unwrap();
        assert_eq!(fetched.len(), 1);
    }

    #[test]
    fn test_malformed_line_skipped_unless_required() {
        let file = envfile("BATCH_SIZE: 65535\nFAVORITE_COLOR=green\n");

        let fetched = EnvFile::new(file.path()).fetch(&schema()).unwrap();
        assert_eq!(fetched.len(), 1);
        assert!(fetched.contains_key("favorite_color"));

        let err = EnvFile::new(file.path())
            .required(true)
            .fetch(&schema())
            .unwrap_err();
        match err {
            ConfigError::Format { kind, message, .. } => {
                assert_eq!(kind, SourceKind::EnvFile);
                assert!(message.contains("line 1"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_empty_unless_required() {
        let missing = PathBuf::from("/nonexistent/.env");
        assert!(EnvFile::new(&missing).fetch(&schema()).unwrap().is_empty());
        assert!(EnvFile::new(&missing).required(true).fetch(&schema()).is_err());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let file = envfile("SOMETHING_ELSE=1\nBATCH_SIZE=2\n");
        let fetched = EnvFile::new(file.path()).fetch(&schema()).unwrap();
        assert_eq!(fetched.len(), 1);
    }
}
