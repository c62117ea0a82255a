//! Declarative typed configuration resolved from layered sources.
//!
//! An application declares a typed schema of options, then resolves one
//! final value per option from a fixed precedence chain:
//!
//! 1. **Defaults** - declared on each option (lowest)
//! 2. **Secrets directory** - one file per option
//! 3. **Env-file** - `KEY=VALUE` lines
//! 4. **JSON file** - one top-level object
//! 5. **Environment variables** - explicit snapshot
//! 6. **Command-line arguments** - flags generated from the schema (highest)
//!
//! ```no_run
//! use optstack::{CliArgs, EnvVars, OptionSpec, Resolver, Schema};
//!
//! # fn main() -> optstack::Result<()> {
//! let schema = Schema::builder()
//!     .option(OptionSpec::bool("verbose").default(false).doc("log verbosely"))
//!     .option(OptionSpec::int("batch_size").doc("transfer chunk size"))
//!     .option(OptionSpec::string_list("input_files").doc("files to process"))
//!     .link()?;
//!
//! let config = Resolver::new()
//!     .json_file("config.json")
//!     .env_vars(EnvVars::from_process())
//!     .cli(CliArgs::from_process().version(env!("CARGO_PKG_VERSION")))
//!     .resolve(&schema)?;
//!
//! if config.bool_value("verbose")?.unwrap_or(false) {
//!     config.log();
//! }
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod error;
pub mod instance;
pub mod resolve;
pub mod schema;
pub mod source;
pub mod value;

pub use error::{ConfigError, Result};
pub use instance::{AUTO_REDACTED, Config, REDACTED};
pub use resolve::{DEFAULT_AUTOREDACT_TOKENS, Resolver};
pub use schema::{OptionSpec, Schema, SchemaBuilder};
pub use source::{CliArgs, EnvFile, EnvVars, JsonFile, SecretsDir, Source, SourceKind};
pub use value::{OptionKind, ScalarKind, Value};
