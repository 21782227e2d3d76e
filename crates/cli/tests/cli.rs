use assert_cmd::Command;

#[test]
fn settings_prints_default_port() {
    let config_dir = std::env::temp_dir().join("bookstore-cli-empty-config");
    std::fs::create_dir_all(&config_dir).unwrap();

    let output = Command::cargo_bin("bookstore-cli")
        .unwrap()
        .arg("settings")
        .env("BOOKSTORE_CONFIG_DIR", &config_dir)
        .env("BOOKSTORE_ENV", "local")
        .env_remove("BOOKSTORE_SERVER__PORT")
        .output()
        .unwrap();

    assert!(output.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 8080);
    assert_eq!(settings["environment"], "local");
}

#[test]
fn unknown_environment_fails() {
    Command::cargo_bin("bookstore-cli")
        .unwrap()
        .arg("settings")
        .env("BOOKSTORE_ENV", "qa")
        .assert()
        .failure();
}

#[test]
fn port_override_from_environment() {
    let config_dir = std::env::temp_dir().join("bookstore-cli-empty-config");
    std::fs::create_dir_all(&config_dir).unwrap();

    let output = Command::cargo_bin("bookstore-cli")
        .unwrap()
        .arg("settings")
        .env("BOOKSTORE_CONFIG_DIR", &config_dir)
        .env("BOOKSTORE_ENV", "local")
        .env("BOOKSTORE_SERVER__PORT", "9191")
        .output()
        .unwrap();

    assert!(output.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 9191);
}
