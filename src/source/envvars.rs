//! Environment-variable source, fed from an explicit snapshot.

use super::{Fetched, RawValue, Source, SourceKind};
use crate::error::Result;
use crate::schema::Schema;

/// An explicit snapshot of environment variables.
///
/// Resolution never reads the process environment on its own; the embedding
/// application captures it once at the process boundary with
/// [`EnvVars::from_process`] (or injects a synthetic snapshot in tests) and
/// hands it to the resolver. This keeps resolution pure and repeatable.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: Vec<(String, String)>,
}

impl EnvVars {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the real process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Look up an option's variable: the upper-cased name is preferred, the
    /// original spelling next, then any case-insensitive match.
    fn lookup(&self, name: &str) -> Option<&str> {
        let upper = name.to_uppercase();
        let exact = |key: &str| self.vars.iter().find(|(k, _)| k == key);
        exact(&upper)
            .or_else(|| exact(name))
            .or_else(|| self.vars.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)))
            .map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Source for EnvVars {
    fn kind(&self) -> SourceKind {
        SourceKind::EnvVars
    }

    fn fetch(&self, schema: &Schema) -> Result<Fetched> {
        let mut fetched = Fetched::new();
        for spec in schema.iter() {
            if let Some(value) = self.lookup(spec.name()) {
                fetched.insert(spec.name().to_string(), RawValue::Text(value.to_string()));
            }
        }
        Ok(fetched)
    }
}
