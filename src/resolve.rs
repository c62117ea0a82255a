//! The resolution engine: merges sources in fixed precedence order.
//!
//! Precedence, lowest to highest:
//! defaults < secrets directory < env-file < JSON file <
//! environment variables < command-line arguments.
//!
//! Each source contributes a partial mapping; for every option the
//! highest-precedence contribution wins, falling through to the declared
//! default. Resolution is all-or-nothing: the first failure aborts with no
//! partial instance observable.

use std::path::PathBuf;

use crate::coerce;
use crate::error::Result;
use crate::instance::Config;
use crate::schema::Schema;
use crate::source::{CliArgs, Defaults, EnvFile, EnvVars, JsonFile, SecretsDir, Source};
use crate::value::Value;

/// Autoredact tokens applied when the embedding application supplies none.
pub const DEFAULT_AUTOREDACT_TOKENS: [&str; 3] = ["password", "secret", "token"];

/// Builder for one resolution run.
///
/// Sources are opt-in: an unconfigured source is simply never consulted.
/// All inputs are explicit: the process environment and process arguments
/// participate only when the caller hands in [`EnvVars::from_process`] or
/// [`CliArgs::from_process`].
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    secrets: Option<SecretsDir>,
    envfile: Option<EnvFile>,
    env: Option<EnvVars>,
    json: Option<JsonFile>,
    cli: Option<CliArgs>,
    autoredact: Option<Vec<String>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult a secrets directory (one file per option).
    pub fn secrets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.secrets = Some(SecretsDir::new(dir));
        self
    }

    /// Consult a secrets directory that must exist.
    pub fn secrets_dir_required(mut self, dir: impl Into<PathBuf>) -> Self {
        self.secrets = Some(SecretsDir::new(dir).required(true));
        self
    }

    /// Consult a `KEY=VALUE` env-file.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.envfile = Some(EnvFile::new(path));
        self
    }

    /// Consult an env-file that must exist and parse cleanly.
    pub fn env_file_required(mut self, path: impl Into<PathBuf>) -> Self {
        self.envfile = Some(EnvFile::new(path).required(true));
        self
    }

    /// Consult an environment-variable snapshot.
    pub fn env_vars(mut self, env: EnvVars) -> Self {
        self.env = Some(env);
        self
    }

    /// Consult a JSON config file.
    pub fn json_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.json = Some(JsonFile::new(path));
        self
    }

    /// Consult a JSON config file that must exist.
    pub fn json_file_required(mut self, path: impl Into<PathBuf>) -> Self {
        self.json = Some(JsonFile::new(path).required(true));
        self
    }

    /// Consult command-line arguments (the highest-precedence source).
    pub fn cli(mut self, cli: CliArgs) -> Self {
        self.cli = Some(cli);
        self
    }

    /// Replace the autoredact token set (default:
    /// [`DEFAULT_AUTOREDACT_TOKENS`]). Any option whose name contains one of
    /// these substrings is displayed as `--AUTO-REDACTED--`.
    pub fn autoredact_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.autoredact = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    /// Add one autoredact token to the current set.
    pub fn add_autoredact_token(mut self, token: impl Into<String>) -> Self {
        let mut tokens = self.autoredact.take().unwrap_or_else(default_tokens);
        tokens.push(token.into());
        self.autoredact = Some(tokens);
        self
    }

    /// Resolve every option against the configured sources.
    ///
    /// Values are coerced as each source contributes them, so a value that
    /// cannot be coerced fails resolution even if a higher-precedence source
    /// later overrides it. Choice constraints are validated once, over each
    /// option's final value.
    pub fn resolve(&self, schema: &Schema) -> Result<Config> {
        // The defaults source is total over the schema, so the running
        // result starts fully populated and stays that way.
        let defaults = Defaults.fetch(schema)?;
        let mut values: Vec<Value> = Vec::with_capacity(schema.len());
        for spec in schema.iter() {
            let raw = defaults
                .get(spec.name())
                .cloned()
                .unwrap_or_else(|| crate::source::RawValue::Typed(spec.default_value().clone()));
            values.push(coerce::coerce(spec, &raw)?);
        }

        let sources: [Option<&dyn Source>; 5] = [
            self.secrets.as_ref().map(|s| s as &dyn Source),
            self.envfile.as_ref().map(|s| s as &dyn Source),
            self.json.as_ref().map(|s| s as &dyn Source),
            self.env.as_ref().map(|s| s as &dyn Source),
            self.cli.as_ref().map(|s| s as &dyn Source),
        ];
        for source in sources.into_iter().flatten() {
            let fetched = source.fetch(schema)?;
            tracing::debug!(source = %source.kind(), options = fetched.len(), "merging source");
            for (name, raw) in &fetched {
                let Some(idx) = schema.index_of(name) else {
                    continue;
                };
                values[idx] = coerce::coerce(schema.option_at(idx), raw)?;
            }
        }

        for (idx, spec) in schema.iter().enumerate() {
            coerce::check_choices(spec, &values[idx])?;
        }

        let tokens = self.autoredact.clone().unwrap_or_else(default_tokens);
        Ok(Config::new(schema.clone(), values, tokens))
    }
}

fn default_tokens() -> Vec<String> {
    DEFAULT_AUTOREDACT_TOKENS
        .iter()
        .map(|t| t.to_string())
        .collect()
}
