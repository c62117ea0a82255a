//! Command-line source adapter.
//!
//! The flag surface is generated from the schema: `--kebab-case-name` per
//! option, a `--no-<name>` negation pair for booleans, repeatable flags for
//! lists. This is the one source with sanctioned process-exit side effects:
//! parse failures, `--help`, and `--version` all terminate through clap's
//! native path, because there is no argument-parsing context left to
//! recover into. [`CliArgs::try_matches`] exposes the parse result without
//! exiting, for tests and embedders.

use std::ffi::OsStr;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use super::{Fetched, RawValue, Source, SourceKind};
use crate::coerce::parse_bool_token;
use crate::error::Result;
use crate::schema::{OptionSpec, Schema};
use crate::value::{OptionKind, ScalarKind, Value};

/// Command-line arguments to resolve against a schema.
#[derive(Debug, Clone)]
pub struct CliArgs {
    program: String,
    args: Vec<String>,
    version: Option<String>,
}

impl CliArgs {
    /// Wrap explicit arguments (flags only, no program name).
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: "app".to_string(),
            args: args.into_iter().map(Into::into).collect(),
            version: None,
        }
    }

    /// Wrap the real process arguments.
    pub fn from_process() -> Self {
        let mut argv = std::env::args();
        let program = argv.next().unwrap_or_else(|| "app".to_string());
        Self {
            program,
            args: argv.collect(),
            version: None,
        }
    }

    /// Program name shown in usage and error messages.
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = name.into();
        self
    }

    /// Enable `--version`. Without this, `--version` is an
    /// unrecognized-argument error.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parse the arguments without exiting.
    ///
    /// Help and version requests surface as `clap::Error` values with kinds
    /// `DisplayHelp`/`DisplayVersion`; callers going through
    /// [`Source::fetch`] get the terminating behavior instead.
    pub fn try_matches(&self, schema: &Schema) -> std::result::Result<ArgMatches, clap::Error> {
        self.command(schema).try_get_matches_from(
            std::iter::once(self.program.clone()).chain(self.args.iter().cloned()),
        )
    }

    fn command(&self, schema: &Schema) -> Command {
        let mut cmd = Command::new(self.program.clone());
        if let Some(version) = &self.version {
            cmd = cmd.version(version.clone());
        }
        for spec in schema.iter() {
            cmd = add_option(cmd, spec);
        }
        cmd
    }

    fn collect(schema: &Schema, matches: &ArgMatches) -> Fetched {
        let mut fetched = Fetched::new();
        for spec in schema.iter() {
            let id = spec.name();
            match spec.kind() {
                OptionKind::Scalar(ScalarKind::Bool) => {
                    let no_id = format!("no_{id}");
                    if matches.value_source(id) == Some(ValueSource::CommandLine) {
                        fetched.insert(id.to_string(), RawValue::Text("true".to_string()));
                    } else if matches.value_source(&no_id) == Some(ValueSource::CommandLine) {
                        fetched.insert(id.to_string(), RawValue::Text("false".to_string()));
                    }
                }
                OptionKind::Scalar(_) => {
                    if let Some(text) = matches.get_one::<String>(id) {
                        fetched.insert(id.to_string(), RawValue::Text(text.clone()));
                    }
                }
                OptionKind::List(_) => {
                    if let Some(values) = matches.get_many::<String>(id) {
                        fetched.insert(
                            id.to_string(),
                            RawValue::Items(values.cloned().collect()),
                        );
                    }
                }
            }
        }
        fetched
    }
}

impl Source for CliArgs {
    fn kind(&self) -> SourceKind {
        SourceKind::Cli
    }

    fn fetch(&self, schema: &Schema) -> Result<Fetched> {
        match self.try_matches(schema) {
            Ok(matches) => Ok(Self::collect(schema, &matches)),
            // Prints the rendered message and terminates: exit 0 for
            // help/version, non-zero with `error: ...` on stderr otherwise.
            Err(err) => err.exit(),
        }
    }
}

fn add_option(cmd: Command, spec: &OptionSpec) -> Command {
    let id = spec.name().to_string();
    let flag = spec.flag_name();
    let help = spec.doc_string().to_string();
    match spec.kind() {
        OptionKind::Scalar(ScalarKind::Bool) => {
            let no_id = format!("no_{id}");
            let no_flag = format!("no-{flag}");
            cmd.arg(
                Arg::new(id.clone())
                    .long(flag.clone())
                    .action(ArgAction::SetTrue)
                    .overrides_with(no_id.clone())
                    .help(help),
            )
            .arg(
                Arg::new(no_id)
                    .long(no_flag)
                    .action(ArgAction::SetTrue)
                    .overrides_with(id)
                    .help(format!("negate --{flag}")),
            )
        }
        kind => {
            let action = if kind.is_list() {
                ArgAction::Append
            } else {
                ArgAction::Set
            };
            cmd.arg(
                Arg::new(id)
                    .long(flag)
                    .action(action)
                    .value_name(kind.element().name().to_uppercase())
                    .value_parser(ScalarParser::for_spec(spec))
                    .help(help),
            )
        }
    }
}

/// Validates one scalar occurrence at parse time, so type and choice
/// failures take clap's terminating error path. The validated raw text is
/// kept as a string; the resolution engine re-coerces the winning value.
#[derive(Clone)]
struct ScalarParser {
    kind: ScalarKind,
    choices: Option<Vec<Value>>,
    fold: bool,
}

impl ScalarParser {
    fn for_spec(spec: &OptionSpec) -> Self {
        Self {
            kind: spec.kind().element(),
            choices: spec.choice_values().map(<[Value]>::to_vec),
            fold: spec.folds_case(),
        }
    }
}

impl TypedValueParser for ScalarParser {
    type Value = String;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> std::result::Result<String, clap::Error> {
        let text = value.to_str().ok_or_else(|| {
            clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd)
        })?;
        let flag = arg
            .and_then(|a| a.get_long())
            .map(|long| format!("--{long}"))
            .unwrap_or_default();

        let parsed = match self.kind {
            ScalarKind::Bool => parse_bool_token(text).map(Value::Bool),
            ScalarKind::Int => text.parse::<i64>().ok().map(Value::Int),
            ScalarKind::Float => text.parse::<f64>().ok().map(Value::Float),
            ScalarKind::Str => Some(Value::Str(if self.fold {
                text.to_lowercase()
            } else {
                text.to_string()
            })),
        };
        let Some(parsed) = parsed else {
            return Err(clap::Error::raw(
                ErrorKind::InvalidValue,
                format!(
                    "argument {flag}: invalid {} value: '{text}'\n",
                    self.kind.name()
                ),
            )
            .with_cmd(cmd));
        };

        if let Some(choices) = &self.choices
            && !choices.contains(&parsed)
        {
            let allowed = choices
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(clap::Error::raw(
                ErrorKind::InvalidValue,
                format!("argument {flag}: invalid choice: '{text}' (choose from {allowed})\n"),
            )
            .with_cmd(cmd));
        }

        Ok(match parsed {
            Value::Str(folded) => folded,
            _ => text.to_string(),
        })
    }
}
