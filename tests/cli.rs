use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn chainconf(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chainconf").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn init(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("chain-config.json");
    chainconf(&path)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    path
}

#[test]
fn init_writes_the_development_defaults() {
    let dir = TempDir::new().unwrap();
    let path = init(&dir);

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let dev = &value["networks"]["development"];
    assert_eq!(dev["host"], "127.0.0.1");
    assert_eq!(dev["port"], 7545);
    assert_eq!(dev["network_id"], "*");
    assert_eq!(value["compilers"]["solc"]["version"], "0.8.0");

    chainconf(&path)
        .arg("check")
        .assert()
        .success()
        .stdout("ok: 1 network(s), solc 0.8.0\n");
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let path = init(&dir);

    chainconf(&path)
        .args(["init", "--ganache-cli"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    chainconf(&path)
        .args(["init", "--ganache-cli", "--force"])
        .assert()
        .success();
    chainconf(&path)
        .arg("url")
        .assert()
        .success()
        .stdout("http://127.0.0.1:8545\n");
}

#[test]
fn show_prints_a_summary() {
    let dir = TempDir::new().unwrap();
    let path = init(&dir);

    chainconf(&path)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("development  http://127.0.0.1:7545  network_id=*"))
        .stdout(predicate::str::contains("solc 0.8.0 (exact)"));
}

#[test]
fn export_json_reproduces_the_file() {
    let dir = TempDir::new().unwrap();
    let path = init(&dir);
    let out = dir.path().join("copy.json");

    chainconf(&path)
        .args(["export", "--format", "json", "-o"])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        fs::read_to_string(&path).unwrap()
    );
}

#[test]
fn export_js_emits_a_module() {
    let dir = TempDir::new().unwrap();
    let path = init(&dir);

    chainconf(&path)
        .args(["export", "--format", "js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("module.exports = {"))
        .stdout(predicate::str::contains("network_id: \"*\","))
        .stdout(predicate::str::contains("version: \"0.8.0\","));
}

#[test]
fn resolve_and_url_use_the_loaded_networks() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("multi.json");
    fs::write(
        &path,
        r#"{
          "networks": {
            "development": { "host": "127.0.0.1", "port": 7545, "network_id": "*" },
            "cli": { "host": "::1", "port": 8545, "network_id": 1337, "websockets": true }
          },
          "compilers": { "solc": { "version": "^0.8.0" } }
        }"#,
    )
    .unwrap();

    chainconf(&path)
        .args(["resolve", "1337"])
        .assert()
        .success()
        .stdout("cli (http://[::1]:8545)\n");
    chainconf(&path)
        .args(["resolve", "5777"])
        .assert()
        .success()
        .stdout("development (http://127.0.0.1:7545)\n");
    chainconf(&path)
        .args(["url", "cli", "--ws"])
        .assert()
        .success()
        .stdout("ws://[::1]:8545\n");
    chainconf(&path)
        .args(["url", "mainnet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown network 'mainnet'"));
}

#[test]
fn check_reports_invalid_configs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{
          "networks": { "development": { "host": "not a host", "port": 7545, "network_id": "*" } },
          "compilers": { "solc": { "version": "0.8.0" } }
        }"#,
    )
    .unwrap();

    chainconf(&path)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("network 'development'"))
        .stderr(predicate::str::contains("\"not a host\""));
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    chainconf(&dir.path().join("absent.json"))
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("read config file"));
}
