//! Shared fixtures for the integration tests: the sample schema of a
//! fictional app, plus canned source files.
//!
//! Not every test binary uses every fixture.
#![allow(dead_code)]

use std::path::PathBuf;

use optstack::{OptionSpec, Schema};
use tempfile::TempDir;

/// The sample application schema exercised across the test suite.
pub fn sample_schema() -> Schema {
    Schema::builder()
        .option(
            OptionSpec::bool("verbose")
                .default(false)
                .doc("whether to log verbosely"),
        )
        .option(
            OptionSpec::int("batch_size")
                .doc("how big chunks should be when transferring data from the database"),
        )
        .option(OptionSpec::string_list("input_files").doc("a list of files to process"))
        .option(
            OptionSpec::bool_list("yn")
                .separator(";")
                .doc("a list of booleans?"),
        )
        .option(OptionSpec::float_list("temps").doc("a list of floats"))
        .option(
            OptionSpec::string("favorite_color")
                .default("blue")
                .choices(["blue", "green", "orange"])
                .fold_case(true)
                .doc("a choice between the best colors"),
        )
        .link()
        .expect("sample schema links")
}

/// A JSON config covering every option in the sample schema.
pub const JSON_FULL_GOOD: &str = r#"{
  "batch_size": 65535,
  "favorite_color": "green",
  "input_files": ["a.txt", "b.txt", "c.txt"],
  "temps": [1.2, 1.3, 1.4],
  "verbose": true,
  "yn": [true, false, true]
}"#;

/// A JSON config covering only a few options.
pub const JSON_PARTIAL_GOOD: &str = r#"{
  "batch_size": 65535,
  "favorite_color": "green"
}"#;

/// An envfile covering every option in the sample schema.
pub const ENVFILE_FULL_GOOD: &str = "\
BATCH_SIZE=65535
FAVORITE_COLOR=green
INPUT_FILES=a.txt,b.txt,c.txt
TEMPS=1.2,1.3,1.4
VERBOSE=true
YN=y;n;y
";

/// Write `content` under a fresh name inside `dir` and return its path.
pub fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}
