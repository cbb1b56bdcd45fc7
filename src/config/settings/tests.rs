use super::*;
use std::collections::HashMap;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_overrides_or_env() {
    let settings = Settings::resolve_with(&SettingsOverrides::default(), env_of(&[]))
        .expect("defaults should resolve");
    assert!(settings.storage_root.ends_with("mcps"));
    assert_eq!(settings.applications_dir, PathBuf::from(DEFAULT_APPLICATIONS_DIR));
}

#[test]
fn env_vars_override_defaults() {
    let settings = Settings::resolve_with(
        &SettingsOverrides::default(),
        env_of(&[
            ("MCPKG_STORAGE_ROOT", "/srv/mcps"),
            ("MCPKG_APPLICATIONS_DIR", "/srv/Applications"),
        ]),
    )
    .expect("env settings");
    assert_eq!(settings.storage_root, PathBuf::from("/srv/mcps"));
    assert_eq!(settings.applications_dir, PathBuf::from("/srv/Applications"));
}

#[test]
fn explicit_overrides_beat_env() {
    let overrides = SettingsOverrides {
        storage_root: Some(PathBuf::from("/flag/mcps")),
        applications_dir: None,
    };
    let settings = Settings::resolve_with(
        &overrides,
        env_of(&[("MCPKG_STORAGE_ROOT", "/srv/mcps")]),
    )
    .expect("override settings");
    assert_eq!(settings.storage_root, PathBuf::from("/flag/mcps"));
}

#[test]
fn blank_env_values_are_ignored() {
    let settings = Settings::resolve_with(
        &SettingsOverrides::default(),
        env_of(&[("MCPKG_APPLICATIONS_DIR", "   ")]),
    )
    .expect("blank env");
    assert_eq!(settings.applications_dir, PathBuf::from(DEFAULT_APPLICATIONS_DIR));
}

#[test]
fn relative_paths_are_rejected() {
    let overrides = SettingsOverrides {
        storage_root: Some(PathBuf::from("relative/mcps")),
        applications_dir: None,
    };
    let err = Settings::resolve_with(&overrides, env_of(&[])).expect_err("relative root");
    assert!(err.to_string().contains("absolute path"));
}

#[test]
fn relative_applications_dir_is_rejected() {
    let err = Settings::resolve_with(
        &SettingsOverrides::default(),
        env_of(&[
            ("MCPKG_STORAGE_ROOT", "/srv/mcps"),
            ("MCPKG_APPLICATIONS_DIR", "apps"),
        ]),
    )
    .expect_err("relative applications dir");
    assert!(err.to_string().contains("applications directory must be an absolute path"));

    let overrides = SettingsOverrides {
        storage_root: Some(PathBuf::from("/srv/mcps")),
        applications_dir: Some(PathBuf::from("rel/Applications")),
    };
    assert!(Settings::resolve_with(&overrides, env_of(&[])).is_err());
}
