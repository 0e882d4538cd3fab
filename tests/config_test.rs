// tests/config_test.rs
use relver::config::{load_config, Config, PreMajorPolicy};
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.tag_prefix, "v");
    assert_eq!(
        config.release_commit_message_format,
        "chore(release): {{currentTag}} [skip ci]"
    );
    assert_eq!(config.pre_major_policy, PreMajorPolicy::Uniform);
    assert_eq!(config.package_files[0].filename, "package.json");
    assert!(!config.skip.changelog);
    assert!(!config.skip.commit);
    assert!(!config.skip.tag);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
tag_prefix = "release-"
pre_major_policy = "capped"

[[types]]
type = "feat"
section = "Features"

[[types]]
type = "fix"
section = "Fixes"

[urls]
commit_url_format = "https://example.com/commit/{{hash}}"

[[package_files]]
filename = "package.json"
format = "json"

[[bump_files]]
filename = "Cargo.toml"
format = "plain"
pattern = 'version = "(\d+\.\d+\.\d+)"'

[scripts]
prebump = "echo preparing"
posttag = "echo released {{currentTag}}"

[skip]
tag = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tag_prefix, "release-");
    assert_eq!(config.pre_major_policy, PreMajorPolicy::Capped);
    assert_eq!(config.types.len(), 2);
    assert_eq!(config.types[0].section, "Features");
    assert_eq!(
        config.urls.commit_url_format.as_deref(),
        Some("https://example.com/commit/{{hash}}")
    );
    assert_eq!(config.bump_files[0].filename, "Cargo.toml");
    assert_eq!(config.scripts.get("prebump").unwrap(), "echo preparing");
    assert!(config.skip.tag);
    assert!(!config.skip.commit);

    assert!(config.validate().is_ok());
}

#[test]
fn test_unspecified_fields_fall_back_to_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(br#"tag_prefix = ""
"#)
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tag_prefix, "");
    // defaults survive for everything not in the file
    assert!(config.types.iter().any(|t| t.r#type == "feat"));
    assert!(config
        .release_commit_message_format
        .contains("[skip ci]"));
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"types = not valid").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_validation_rejects_bad_hook_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(
            br#"
[scripts]
prepush = "echo nope"
"#,
        )
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("prepush"));
}

#[test]
fn test_validation_rejects_message_format_without_marker() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(br#"release_commit_message_format = "release {{currentTag}}""#)
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_missing_explicit_config_path_errors() {
    let result = load_config(Some("/nonexistent/relver.toml"));
    assert!(result.is_err());
}

// Changes the process working directory, so it must not overlap with
// any other test doing the same.
#[test]
#[serial]
fn test_config_discovered_in_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("relver.toml"), "tag_prefix = \"ver-\"\n").unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let loaded = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    let config = loaded.unwrap();
    assert_eq!(config.tag_prefix, "ver-");
}
