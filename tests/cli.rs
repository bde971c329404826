use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn lockgraph_cmd() -> Command {
    Command::cargo_bin("lockgraph").unwrap()
}

fn write_manifest(dir: &Path) {
    fs::write(
        dir.join("package.json"),
        r#"{
    "name": "fixture-app",
    "version": "1.0.0",
    "dependencies": {"left-pad": "^1.0.0"}
}"#,
    )
    .unwrap();
}

fn write_npm_lockfile(dir: &Path) {
    fs::write(
        dir.join("package-lock.json"),
        r#"{
    "name": "fixture-app",
    "version": "1.0.0",
    "lockfileVersion": 1,
    "requires": true,
    "dependencies": {
        "left-pad": {
            "version": "1.3.0",
            "resolved": "https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz",
            "integrity": "sha512-XI5MPzVNApjAyhQzphX8BkmKsKUxD4LdyK24iZeQGinBN9yTQT3bFlCBy/aVx2HrNcqQGsdot8yNFWAV0kUT4g=="
        }
    }
}"#,
    )
    .unwrap();
}

fn write_yarn_lockfile(dir: &Path) {
    // pins a different version than the npm lockfile so precedence is visible
    fs::write(
        dir.join("yarn.lock"),
        "# yarn lockfile v1\n\nleft-pad@^1.0.0:\n  version \"1.2.0\"\n",
    )
    .unwrap();
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn test_plain_listing() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());
    write_npm_lockfile(tmp.path());

    lockgraph_cmd()
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("left-pad\n");
}

#[test]
fn test_listing_with_versions() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());
    write_npm_lockfile(tmp.path());

    lockgraph_cmd()
        .arg(tmp.path())
        .arg("--with-version")
        .assert()
        .success()
        .stdout("left-pad@1.3.0\n");
}

#[test]
fn test_json_full_graph() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());
    write_npm_lockfile(tmp.path());

    let json = stdout_json(lockgraph_cmd().arg(tmp.path()).arg("--json"));

    assert_eq!(json[".@."]["name"], ".");
    assert_eq!(json[".@."]["dependencies"]["left-pad"], "1.3.0");
    assert_eq!(json["left-pad@1.3.0"]["version"], "1.3.0");
    assert!(json["left-pad@1.3.0"]["resolved"]
        .as_str()
        .unwrap()
        .contains("registry.npmjs.org"));
}

#[test]
fn test_json_simplified() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());
    write_npm_lockfile(tmp.path());

    let json = stdout_json(lockgraph_cmd().arg(tmp.path()).arg("--json").arg("--simplify"));

    assert_eq!(json[".@."]["left-pad"], "1.3.0");
    // metadata and the redundant name/version fields are gone
    assert!(json["left-pad@1.3.0"].get("resolved").is_none());
    assert!(json["left-pad@1.3.0"].get("version").is_none());
}

#[test]
fn test_yarn_lockfile_resolved() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());
    write_yarn_lockfile(tmp.path());

    lockgraph_cmd()
        .arg(tmp.path())
        .arg("--with-version")
        .assert()
        .success()
        .stdout("left-pad@1.2.0\n");
}

#[test]
fn test_npm_wins_when_both_lockfiles_present() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());
    write_npm_lockfile(tmp.path());
    write_yarn_lockfile(tmp.path());

    // 1.3.0 comes from package-lock.json, 1.2.0 from yarn.lock
    lockgraph_cmd()
        .arg(tmp.path())
        .arg("--with-version")
        .assert()
        .success()
        .stdout("left-pad@1.3.0\n");
}

#[test]
fn test_no_lockfile_is_a_diagnostic_failure() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());

    lockgraph_cmd()
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "unable to find package-lock.json or yarn.lock",
        ));
}

#[test]
fn test_malformed_lockfile_is_an_error() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());
    fs::write(tmp.path().join("package-lock.json"), "{ not json").unwrap();

    lockgraph_cmd()
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to resolve lockfiles"));
}

#[test]
fn test_cycles_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("package.json"),
        r#"{"name": "fixture-app", "dependencies": {"a": "^1.0.0"}}"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("package-lock.json"),
        r#"{
    "lockfileVersion": 1,
    "dependencies": {
        "a": {"version": "1.0.0", "requires": {"b": "^1.0.0"}},
        "b": {"version": "1.0.0", "requires": {"a": "^1.0.0"}}
    }
}"#,
    )
    .unwrap();

    lockgraph_cmd()
        .arg(tmp.path())
        .arg("--cycles")
        .assert()
        .success()
        .stdout(predicate::str::contains("a@1.0.0"))
        .stdout(predicate::str::contains("b@1.0.0"))
        .stdout(predicate::str::contains(" -> "));
}

#[test]
fn test_no_cycles_reported() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path());
    write_npm_lockfile(tmp.path());

    lockgraph_cmd()
        .arg(tmp.path())
        .arg("--cycles")
        .assert()
        .success()
        .stdout("no circular dependencies\n");
}
