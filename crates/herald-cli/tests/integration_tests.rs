//! Integration tests for herald-cli.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn herald() -> Command {
    Command::cargo_bin("herald").expect("binary builds")
}

#[test]
fn help_flag() {
    herald()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Declarative command runner"))
        .stdout(predicate::str::contains("COMMAND"));
}

#[test]
fn version_flag() {
    herald()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_command_lists_available_commands() {
    let temp = TempDir::new().unwrap();
    herald()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("startproject"))
        .stdout(predicate::str::contains("startapp"))
        .stdout(predicate::str::contains("startcommand"));
}

#[test]
fn startproject_creates_the_skeleton() {
    let temp = TempDir::new().unwrap();
    herald()
        .current_dir(temp.path())
        .args(["startproject", "my-tool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let project = temp.path().join("my-tool");
    assert!(project.join("herald.toml").exists());
    assert!(project.join(".env.example").exists());
    assert!(project.join("apps/demo/commands.rs").exists());

    let settings = fs::read_to_string(project.join("herald.toml")).unwrap();
    assert!(settings.contains("apps = ["));
    assert!(settings.contains("\"scaffold\""));
}

#[test]
fn generated_project_is_a_working_settings_root() {
    let temp = TempDir::new().unwrap();
    herald()
        .current_dir(temp.path())
        .args(["startproject", "my-tool"])
        .assert()
        .success();

    // Running herald inside the generated project loads its herald.toml.
    herald()
        .current_dir(temp.path().join("my-tool"))
        .assert()
        .success()
        .stdout(predicate::str::contains("startproject"));
}

#[test]
fn startapp_creates_an_app_skeleton() {
    let temp = TempDir::new().unwrap();
    herald()
        .current_dir(temp.path())
        .args(["startapp", "contacts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("App 'contacts' created"));

    let commands = fs::read_to_string(temp.path().join("apps/contacts/commands.rs")).unwrap();
    assert!(commands.contains("CommandDescriptor::builder(\"contacts_test\")"));
}

#[test]
fn startcommand_requires_the_app_to_exist() {
    let temp = TempDir::new().unwrap();

    herald()
        .current_dir(temp.path())
        .args(["startcommand", "contacts", "add_user"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("startapp"));

    herald()
        .current_dir(temp.path())
        .args(["startapp", "contacts"])
        .assert()
        .success();

    herald()
        .current_dir(temp.path())
        .args(["startcommand", "contacts", "add_user"])
        .assert()
        .success();

    assert!(temp.path().join("apps/contacts/add_user.rs").exists());
}

#[test]
fn quiet_mode_still_scaffolds() {
    let temp = TempDir::new().unwrap();
    herald()
        .current_dir(temp.path())
        .args(["--quiet", "startproject", "silent"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("silent/herald.toml").exists());
}

#[test]
fn explicit_config_file_is_honoured() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    fs::write(&config, "apps = [\"scaffold\"]\n").unwrap();

    herald()
        .current_dir(temp.path())
        .args(["--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("startproject"));
}
