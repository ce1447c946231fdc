use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use armkit_core::config::{Config, ConfigError, DEFAULT_ENDPOINT, Profile};
use armkit_core::{HttpInvoker, WaitOptions};
use tempfile::TempDir;

#[cfg(unix)]
fn is_root() -> bool {
    std::process::Command::new("id")
        .arg("-u")
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim() == "0")
        .unwrap_or(false)
}

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

// ---------------------------------------------------------------------------
// Missing and empty files
// ---------------------------------------------------------------------------

#[test]
fn missing_file_loads_as_default() {
    let path = PathBuf::from("/tmp/armkit-test-nonexistent/nested/config.toml");
    assert!(!path.exists());

    let config = Config::load_from_path(&path).expect("missing file is not an error");
    assert!(config.profiles.is_empty());
    assert!(config.default_profile.is_none());
}

#[test]
fn empty_file_loads_as_default() {
    let (_dir, path) = write_config("");
    let config = Config::load_from_path(&path).unwrap();
    assert!(config.profiles.is_empty());
    assert!(matches!(
        config.resolve_profile(None),
        Err(ConfigError::NoProfiles { .. })
    ));
}

// ---------------------------------------------------------------------------
// Malformed content
// ---------------------------------------------------------------------------

#[test]
fn corrupt_toml_is_parse_error() {
    let (_dir, path) = write_config("[[[broken");
    let err = Config::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
    assert!(err.to_string().contains("Invalid config TOML"), "{err}");
}

#[test]
fn profile_without_subscription_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[profiles.incomplete]
endpoint = "https://management.azure.com"
"#,
    );
    assert!(Config::load_from_path(&path).is_err());
}

#[test]
fn wrong_type_for_polling_interval_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[profiles.p]
subscription_id = "s"

[profiles.p.polling]
interval_secs = "soon"
"#,
    );
    assert!(matches!(
        Config::load_from_path(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn unknown_fields_are_ignored() {
    let (_dir, path) = write_config(
        r#"
theme = "dark"

[profiles.p]
subscription_id = "s"
tenant_hint = "contoso"
"#,
    );
    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.profile("p").unwrap().subscription_id, "s");
}

// ---------------------------------------------------------------------------
// Round trip and environment expansion
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_round_trips_profiles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("dir").join("config.toml");

    let mut config = Config::default();
    let mut prod = Profile::new("sub-prod");
    prod.polling.interval_secs = 5;
    prod.polling.timeout_secs = Some(1200);
    prod.http.user_agent = Some("deployer/2.0".to_string());
    config.set_profile("prod".to_string(), prod.clone());
    config.set_profile("dev".to_string(), Profile::new("sub-dev"));
    config.default_profile = Some("prod".to_string());

    config.save_to_path(&path).unwrap();
    let loaded = Config::load_from_path(&path).unwrap();

    assert_eq!(loaded.default_profile.as_deref(), Some("prod"));
    assert_eq!(loaded.profile("prod").unwrap(), &prod);
    let names: Vec<_> = loaded.list_profiles().into_iter().map(|(n, _)| n.clone()).collect();
    assert_eq!(names, vec!["dev", "prod"]);
}

#[test]
#[serial_test::serial]
fn env_vars_expand_when_loading() {
    unsafe {
        std::env::set_var("ARMKIT_EDGE_SUBSCRIPTION", "sub-from-env");
        std::env::remove_var("ARMKIT_EDGE_ENDPOINT");
    }

    let (_dir, path) = write_config(
        r#"
[profiles.env]
subscription_id = "${ARMKIT_EDGE_SUBSCRIPTION}"
endpoint = "${ARMKIT_EDGE_ENDPOINT:-https://management.chinacloudapi.cn}"
"#,
    );
    let config = Config::load_from_path(&path).unwrap();
    let (name, profile) = config.active_profile(None).unwrap();

    assert_eq!(name, "env");
    assert_eq!(profile.subscription_id, "sub-from-env");
    assert_eq!(profile.endpoint, "https://management.chinacloudapi.cn");

    unsafe {
        std::env::remove_var("ARMKIT_EDGE_SUBSCRIPTION");
    }
}

// ---------------------------------------------------------------------------
// Profiles feed the poller and the invoker
// ---------------------------------------------------------------------------

#[test]
fn polling_settings_become_wait_options() {
    let (_dir, path) = write_config(
        r#"
[profiles.p]
subscription_id = "s"

[profiles.p.polling]
interval_secs = 7
timeout_secs = 90
"#,
    );
    let config = Config::load_from_path(&path).unwrap();
    let profile = config.profile("p").unwrap();
    assert_eq!(profile.endpoint, DEFAULT_ENDPOINT);

    let options = WaitOptions::from(&profile.polling);
    assert_eq!(options.poll_interval(), Duration::from_secs(7));
    assert_eq!(options.wait_timeout(), Some(Duration::from_secs(90)));
}

#[test]
fn http_settings_build_an_invoker() {
    let mut profile = Profile::new("s");
    profile.http.timeout_secs = Some(30);
    profile.http.user_agent = Some("edge-test/1.0".to_string());
    assert!(HttpInvoker::from_config(&profile.http).is_ok());
}

// ---------------------------------------------------------------------------
// Permission errors (unix only)
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn unreadable_file_is_load_error() {
    use std::os::unix::fs::PermissionsExt;

    if is_root() {
        eprintln!("skipping test: running as root");
        return;
    }

    let (_dir, path) = write_config("# nothing here");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    let err = Config::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::LoadError { .. }), "{err}");

    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn readonly_directory_is_save_error() {
    use std::os::unix::fs::PermissionsExt;

    if is_root() {
        eprintln!("skipping test: running as root");
        return;
    }

    let dir = TempDir::new().unwrap();
    let readonly = dir.path().join("readonly");
    fs::create_dir(&readonly).unwrap();
    fs::set_permissions(&readonly, fs::Permissions::from_mode(0o444)).unwrap();

    let err = Config::default()
        .save_to_path(&readonly.join("config.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::SaveError { .. }), "{err}");

    fs::set_permissions(&readonly, fs::Permissions::from_mode(0o755)).unwrap();
}
