use serial_test::serial;
use tempfile::TempDir;

use zbx_query::config::EditorConfig;
use zbx_query::constants::CONFIG_PATH_ENV;

#[test]
#[serial]
fn load_default_honours_env_override() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("editor.toml");
    std::fs::write(&path, "wildcard_label = \"Any\"\nitem_all_label = \"Every item\"\n").unwrap();

    unsafe { std::env::set_var(CONFIG_PATH_ENV, &path) };
    let loaded = EditorConfig::load_default();
    unsafe { std::env::remove_var(CONFIG_PATH_ENV) };

    let config = loaded.unwrap();
    assert_eq!(config.wildcard_label, "Any");
    assert_eq!(config.item_all_label, "Every item");
    assert_eq!(config.template_sigil, "$");
}

#[test]
#[serial]
fn load_default_env_override_must_exist() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.toml");

    unsafe { std::env::set_var(CONFIG_PATH_ENV, &path) };
    let loaded = EditorConfig::load_default();
    unsafe { std::env::remove_var(CONFIG_PATH_ENV) };

    assert!(loaded.is_err());
}

#[test]
fn config_roundtrips_through_toml() {
    let config = EditorConfig {
        template_sigil: "@".to_string(),
        fetch_timeout_ms: 1500,
        ..EditorConfig::default()
    };
    let text = toml::to_string(&config).unwrap();
    let back: EditorConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}
