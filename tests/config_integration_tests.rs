// Configuration system integration tests

use form_backup::config::{load_config, load_config_with_env, StorageScope};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("form-backup.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_full_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
logging:
  level: debug
  format: json

storage:
  local_dir: /var/lib/forms

forms:
  signup:
    exclude:
      - password
      - password_confirm
    ttl: 1800000
    storage: local
  search:
    storage: session
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.storage.local_dir.as_deref(), Some("/var/lib/forms"));
    assert_eq!(config.forms.len(), 2);

    let signup = config.options_for("signup");
    assert_eq!(signup.exclude, vec!["password", "password_confirm"]);
    assert_eq!(signup.ttl, Some(1_800_000));
    assert_eq!(signup.storage, StorageScope::Local);

    let search = config.options_for("search");
    assert!(search.exclude.is_empty());
    assert_eq!(search.ttl, None);
    assert_eq!(search.storage, StorageScope::Session);
}

#[test]
fn test_empty_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "{}\n");

    let config = load_config(&path).unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "text");
    assert_eq!(config.storage.local_dir, None);
    assert!(config.forms.is_empty());
}

#[test]
fn test_unknown_storage_falls_back_to_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
forms:
  draft:
    storage: indexeddb
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.options_for("draft").storage, StorageScope::Session);
}

#[test]
fn test_config_with_env_vars() {
    let temp_dir = TempDir::new().unwrap();
    std::env::remove_var("FORM_BACKUP_IT_UNSET");
    std::env::set_var("FORM_BACKUP_IT_TTL", "2500");

    let path = write_config(
        &temp_dir,
        r#"
storage:
  local_dir: ${FORM_BACKUP_IT_UNSET:-/tmp/form-backups}
forms:
  checkout:
    ttl: ${FORM_BACKUP_IT_TTL}
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.storage.local_dir.as_deref(), Some("/tmp/form-backups"));
    assert_eq!(config.options_for("checkout").ttl, Some(2500));

    std::env::remove_var("FORM_BACKUP_IT_TTL");
}

#[test]
fn test_env_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
logging:
  level: info
storage:
  local_dir: /from/file
"#,
    );

    std::env::set_var("FORM_BACKUP_DIR", "/from/env");
    std::env::set_var("FORM_BACKUP_LOG_LEVEL", "warn");

    let config = load_config_with_env(&path).unwrap();

    std::env::remove_var("FORM_BACKUP_DIR");
    std::env::remove_var("FORM_BACKUP_LOG_LEVEL");

    assert_eq!(config.storage.local_dir.as_deref(), Some("/from/env"));
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_invalid_configs_rejected() {
    let temp_dir = TempDir::new().unwrap();

    let bad_level = write_config(&temp_dir, "logging:\n  level: chatty\n");
    let err = load_config(&bad_level).unwrap_err();
    assert!(format!("{:#}", err).contains("logging.level"));

    let bad_format = write_config(&temp_dir, "logging:\n  format: xml\n");
    assert!(load_config(&bad_format).is_err());

    let empty_exclude = write_config(&temp_dir, "forms:\n  a:\n    exclude: ['']\n");
    assert!(load_config(&empty_exclude).is_err());

    let bad_ttl = write_config(&temp_dir, "forms:\n  a:\n    ttl: -5\n");
    assert!(load_config(&bad_ttl).is_err());

    let not_yaml = write_config(&temp_dir, "forms: [unclosed\n");
    assert!(load_config(&not_yaml).is_err());
}

#[test]
fn test_missing_file() {
    let err = load_config("/definitely/not/here.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config file"));
}

#[test]
fn test_load_default_config() {
    let config_path = std::path::PathBuf::from("config/default.yaml");

    if config_path.exists() {
        let result = load_config(&config_path);
        assert!(result.is_ok(), "Failed to load default config: {:?}", result.err());

        let config = result.unwrap();
        let signup = config.options_for("signup");
        assert_eq!(signup.exclude, vec!["password", "password_confirm"]);
        assert_eq!(signup.ttl, Some(1_800_000));
        assert_eq!(signup.storage, StorageScope::Local);
        assert_eq!(config.options_for("contact").storage, StorageScope::Session);
        assert_eq!(config.logging.format, "text");
    }
}
