//! Integration tests for the file-backed sources: JSON config, envfile,
//! and secrets directory.

mod common;

use common::{ENVFILE_FULL_GOOD, JSON_FULL_GOOD, JSON_PARTIAL_GOOD, sample_schema, write_fixture};
use optstack::{ConfigError, Resolver};
use tempfile::TempDir;

#[test]
fn json_config_full() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let json = write_fixture(&dir, "full.json", JSON_FULL_GOOD);

    let config = Resolver::new()
        .json_file_required(&json)
        .resolve(&sample_schema())?;

    assert_eq!(config.bool_value("verbose")?, Some(true));
    assert_eq!(config.int_value("batch_size")?, Some(65535));
    assert_eq!(config.str_list("input_files")?, ["a.txt", "b.txt", "c.txt"]);
    assert_eq!(config.bool_list("yn")?, [true, false, true]);
    assert_eq!(config.float_list("temps")?, [1.2, 1.3, 1.4]);
    assert_eq!(config.str_value("favorite_color")?, Some("green"));
    Ok(())
}

#[test]
fn json_config_partial_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let json = write_fixture(&dir, "partial.json", JSON_PARTIAL_GOOD);

    let config = Resolver::new()
        .json_file_required(&json)
        .resolve(&sample_schema())
        .unwrap();

    assert_eq!(config.bool_value("verbose").unwrap(), Some(false));
    assert_eq!(config.int_value("batch_size").unwrap(), Some(65535));
    assert!(config.str_list("input_files").unwrap().is_empty());
    assert_eq!(config.str_value("favorite_color").unwrap(), Some("green"));
}

#[test]
fn json_bad_format_is_format_error() {
    let dir = TempDir::new().unwrap();
    let json = write_fixture(
        &dir,
        "bad_format.json",
        "{\n  batch_size: 65535,\n  \"favorite_color\": \"green\"\n}",
    );

    let err = Resolver::new()
        .json_file_required(&json)
        .resolve(&sample_schema())
        .unwrap_err();
    match err {
        ConfigError::Format { message, .. } => {
            // serde_json reports the parser position.
            assert!(message.contains("line 2"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn json_bad_type_is_type_error() {
    let dir = TempDir::new().unwrap();
    let json = write_fixture(&dir, "bad_type.json", r#"{"batch_size": "white"}"#);

    let err = Resolver::new()
        .json_file_required(&json)
        .resolve(&sample_schema())
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Type { option, .. } if option == "batch_size"
    ));
}

#[test]
fn json_bad_value_is_choice_error() {
    let dir = TempDir::new().unwrap();
    let json = write_fixture(&dir, "bad_value.json", r#"{"favorite_color": "white"}"#);

    let err = Resolver::new()
        .json_file_required(&json)
        .resolve(&sample_schema())
        .unwrap_err();
    match err {
        ConfigError::InvalidChoice { option, value, allowed } => {
            assert_eq!(option, "favorite_color");
            assert_eq!(value, "'white'");
            assert_eq!(allowed, "'blue', 'green', 'orange'");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn envfile_full() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let envfile = write_fixture(&dir, ".env-full", ENVFILE_FULL_GOOD);

    let config = Resolver::new()
        .env_file(&envfile)
        .resolve(&sample_schema())?;

    assert_eq!(config.bool_value("verbose")?, Some(true));
    assert_eq!(config.int_value("batch_size")?, Some(65535));
    assert_eq!(config.str_list("input_files")?, ["a.txt", "b.txt", "c.txt"]);
    assert_eq!(config.bool_list("yn")?, [true, false, true]);
    assert_eq!(config.float_list("temps")?, [1.2, 1.3, 1.4]);
    assert_eq!(config.str_value("favorite_color")?, Some("green"));
    Ok(())
}

#[test]
fn envfile_partial_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let envfile = write_fixture(&dir, ".env-partial", "BATCH_SIZE=65535\nFAVORITE_COLOR=green\n");

    let config = Resolver::new()
        .env_file(&envfile)
        .resolve(&sample_schema())
        .unwrap();

    assert_eq!(config.bool_value("verbose").unwrap(), Some(false));
    assert_eq!(config.int_value("batch_size").unwrap(), Some(65535));
    assert_eq!(config.str_value("favorite_color").unwrap(), Some("green"));
}

#[test]
fn envfile_bad_format_only_fails_when_required() {
    let dir = TempDir::new().unwrap();
    let envfile = write_fixture(&dir, ".env-bad", "BATCH_SIZE: 65535\nFAVORITE_COLOR=green\n");

    // Optional: the malformed line is skipped.
    let config = Resolver::new()
        .env_file(&envfile)
        .resolve(&sample_schema())
        .unwrap();
    assert_eq!(config.int_value("batch_size").unwrap(), None);
    assert_eq!(config.str_value("favorite_color").unwrap(), Some("green"));

    // Required: the malformed line is a Format error.
    let err = Resolver::new()
        .env_file_required(&envfile)
        .resolve(&sample_schema())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Format { .. }));
}

#[test]
fn envfile_bad_type_and_value() {
    let dir = TempDir::new().unwrap();

    let bad_type = write_fixture(&dir, ".env-bad-type", "BATCH_SIZE=white\n");
    let err = Resolver::new()
        .env_file_required(&bad_type)
        .resolve(&sample_schema())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Type { .. }));

    let bad_value = write_fixture(&dir, ".env-bad-value", "FAVORITE_COLOR=white\n");
    let err = Resolver::new()
        .env_file_required(&bad_value)
        .resolve(&sample_schema())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidChoice { .. }));
}

#[test]
fn secrets_dir_full() {
    let dir = TempDir::new().unwrap();
    let secrets = dir.path().join("good");
    std::fs::create_dir(&secrets).unwrap();
    for (name, content) in [
        ("batch_size", "65535"),
        ("favorite_color", "green"),
        ("input_files", "a.txt,b.txt,c.txt"),
        ("temps", "1.2,1.3,1.4"),
        ("verbose", "true"),
        ("yn", "y;n;y"),
    ] {
        std::fs::write(secrets.join(name), content).unwrap();
    }

    let config = Resolver::new()
        .secrets_dir(&secrets)
        .resolve(&sample_schema())
        .unwrap();

    assert_eq!(config.bool_value("verbose").unwrap(), Some(true));
    assert_eq!(config.int_value("batch_size").unwrap(), Some(65535));
    assert_eq!(
        config.str_list("input_files").unwrap(),
        ["a.txt", "b.txt", "c.txt"]
    );
    assert_eq!(config.bool_list("yn").unwrap(), [true, false, true]);
    assert_eq!(config.float_list("temps").unwrap(), [1.2, 1.3, 1.4]);
    assert_eq!(config.str_value("favorite_color").unwrap(), Some("green"));
}

#[test]
fn secrets_dir_bad_type_and_value() {
    let dir = TempDir::new().unwrap();
    let secrets = dir.path().join("bad");
    std::fs::create_dir(&secrets).unwrap();

    std::fs::write(secrets.join("batch_size"), "white").unwrap();
    let err = Resolver::new()
        .secrets_dir(&secrets)
        .resolve(&sample_schema())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Type { .. }));

    std::fs::remove_file(secrets.join("batch_size")).unwrap();
    std::fs::write(secrets.join("favorite_color"), "white").unwrap();
    let err = Resolver::new()
        .secrets_dir(&secrets)
        .resolve(&sample_schema())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidChoice { .. }));
}

#[test]
fn missing_required_secrets_dir_fails() {
    let err = Resolver::new()
        .secrets_dir_required("/nonexistent/secrets")
        .resolve(&sample_schema())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Format { .. }));
}
