use std::time::Duration;

use crate::config::{Overrides, Settings, resolve, web_endpoint};
use crate::consts::DEFAULT_MOBILE_ENDPOINT;
use crate::state::OverlapPolicy;
use crate::trip::Shell;

fn mem_settings() -> Settings {
    Settings::open(":memory:").unwrap()
}

#[test]
fn get_returns_none_for_missing_key() {
    let settings = mem_settings();
    assert!(settings.get("shell").unwrap().is_none());
}

#[test]
fn set_overwrites_existing() {
    let settings = mem_settings();
    settings.set("shell", "web").unwrap();
    settings.set("shell", "mobile").unwrap();
    assert_eq!(settings.get("shell").unwrap().unwrap(), "mobile");
}

#[test]
fn set_rejects_unknown_key() {
    let settings = mem_settings();
    let err = settings.set("theme", "dark").unwrap_err();
    assert!(err.to_string().contains("unknown setting"));
}

#[test]
fn set_rejects_bad_values() {
    let settings = mem_settings();
    assert!(settings.set("shell", "desktop").is_err());
    assert!(settings.set("policy", "first").is_err());
    assert!(settings.set("base_url", "localhost without scheme").is_err());
    assert!(settings.set("timeout", "soon").is_err());
    assert!(settings.list().unwrap().is_empty());
}

#[test]
fn remove_nonexistent_is_ok() {
    let settings = mem_settings();
    settings.remove("shell").unwrap();
}

#[test]
fn list_is_sorted() {
    let settings = mem_settings();
    settings.set("shell", "mobile").unwrap();
    settings.set("policy", "race").unwrap();
    assert_eq!(
        settings.list().unwrap(),
        vec![
            ("policy".to_string(), "race".to_string()),
            ("shell".to_string(), "mobile".to_string()),
        ]
    );
}

#[test]
fn persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings-test.db");
    let path_str = path.to_str().unwrap();

    {
        let settings = Settings::open(path_str).unwrap();
        settings.set("base_url", "http://fish.local:8080").unwrap();
    }

    {
        let settings = Settings::open(path_str).unwrap();
        assert_eq!(
            settings.get("base_url").unwrap().unwrap(),
            "http://fish.local:8080"
        );
    }
}

#[test]
fn defaults_without_settings() {
    let resolved = resolve(&Overrides::default(), None).unwrap();
    assert_eq!(resolved.planner.shell, Shell::Web);
    assert_eq!(resolved.planner.policy, OverlapPolicy::LatestIssued);
    assert_eq!(resolved.planner.endpoint, "http://localhost:3000/api/plan_trip");
    assert_eq!(resolved.timeout, None);
}

#[test]
fn mobile_uses_fixed_endpoint() {
    let overrides = Overrides {
        shell: Some(Shell::Mobile),
        base_url: Some("http://ignored.local".to_string()),
        ..Overrides::default()
    };
    let resolved = resolve(&overrides, None).unwrap();
    assert_eq!(resolved.planner.endpoint, DEFAULT_MOBILE_ENDPOINT);
}

#[test]
fn stored_settings_apply_when_no_flag() {
    let settings = mem_settings();
    settings.set("shell", "mobile").unwrap();
    settings.set("mobile_url", "https://fish.example.org/plan_trip").unwrap();
    settings.set("policy", "race").unwrap();
    settings.set("timeout", "15").unwrap();

    let resolved = resolve(&Overrides::default(), Some(&settings)).unwrap();
    assert_eq!(resolved.planner.shell, Shell::Mobile);
    assert_eq!(resolved.planner.endpoint, "https://fish.example.org/plan_trip");
    assert_eq!(resolved.planner.policy, OverlapPolicy::Race);
    assert_eq!(resolved.timeout, Some(Duration::from_secs(15)));
}

#[test]
fn flags_win_over_settings() {
    let settings = mem_settings();
    settings.set("shell", "mobile").unwrap();
    settings.set("base_url", "http://stored.local").unwrap();
    settings.set("timeout", "15").unwrap();

    let overrides = Overrides {
        shell: Some(Shell::Web),
        base_url: Some("http://flag.local:9000".to_string()),
        timeout: Some(0),
        ..Overrides::default()
    };
    let resolved = resolve(&overrides, Some(&settings)).unwrap();
    assert_eq!(resolved.planner.shell, Shell::Web);
    assert_eq!(resolved.planner.endpoint, "http://flag.local:9000/api/plan_trip");
    assert_eq!(resolved.timeout, None);
}

#[test]
fn explicit_endpoint_wins_for_either_shell() {
    let overrides = Overrides {
        shell: Some(Shell::Mobile),
        endpoint: Some("http://127.0.0.1:4000/plan_trip".to_string()),
        ..Overrides::default()
    };
    let resolved = resolve(&overrides, None).unwrap();
    assert_eq!(resolved.planner.endpoint, "http://127.0.0.1:4000/plan_trip");
}

#[test]
fn invalid_endpoint_is_rejected() {
    let overrides = Overrides {
        endpoint: Some("::nope".to_string()),
        ..Overrides::default()
    };
    assert!(resolve(&overrides, None).is_err());
}

#[test]
fn web_endpoint_replaces_base_path() {
    assert_eq!(
        web_endpoint("https://trips.example.com/some/page").unwrap(),
        "https://trips.example.com/api/plan_trip"
    );
    assert!(web_endpoint("not a url").is_err());
}
