use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `kinship` with config pointed into a scratch directory
fn kinship(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kinship").unwrap();
    cmd.env("KINSHIP_CONFIG", dir.path().join("config.toml"))
        .env_remove("KINSHIP_LOG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_tree_renders_demo_dynasty() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("└─ Aegon I (id: 1) -> 2\n"))
        .stdout(predicate::str::contains("├─ Aenys I (id: 4) -> 6"))
        .stdout(predicate::str::contains("Daemon Blackfyre (id: 60)"));
}

#[test]
fn test_empty_tree() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["--empty", "tree"])
        .assert()
        .success()
        .stdout("No persons registered.\n");
}

#[test]
fn test_search() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["search", "rhaenyra"])
        .assert()
        .success()
        .stdout("Results:\n- Rhaenyra (34)\n");

    kinship(&dir)
        .args(["search", "Viserys", "I"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Viserys I (30)"));

    kinship(&dir)
        .args(["search", "Nobody"])
        .assert()
        .success()
        .stdout("No results found.\n");
}

#[test]
fn test_show() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["show", "34"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:     Rhaenyra"))
        .stdout(predicate::str::contains("Partner:  Daemon (31)"))
        .stdout(predicate::str::contains(
            "Parents:  Viserys I (30), Aemma Arryn (33)",
        ));
}

#[test]
fn test_show_missing_person_fails() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Person with id 999 not found"));
}

#[test]
fn test_show_ancestry() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["show", "1", "--ancestor-of", "34"])
        .assert()
        .success()
        .stdout("Aegon I (1) is an ancestor of Rhaenyra (34)\n");

    kinship(&dir)
        .args(["show", "30", "--ancestor-of", "34"])
        .assert()
        .success()
        .stdout("Viserys I (30) is a parent of Rhaenyra (34)\n");

    kinship(&dir)
        .args(["show", "34", "--ancestor-of", "1"])
        .assert()
        .success()
        .stdout("Rhaenyra (34) is not an ancestor of Aegon I (1)\n");

    kinship(&dir)
        .args(["show", "1", "--ancestor-of", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Person with id 999 not found"));
}

#[test]
fn test_show_ancestry_json() {
    let dir = TempDir::new().unwrap();
    let output = kinship(&dir)
        .args(["-f", "json", "show", "1", "--ancestor-of", "60"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ancestor"], 1);
    assert_eq!(value["descendant"], 60);
    assert_eq!(value["is_ancestor"], true);
    assert_eq!(value["is_parent"], false);
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let output = kinship(&dir)
        .args(["--format", "json", "show", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "Aegon I");
    assert_eq!(value["partner"], 2);
    assert_eq!(value["children"], serde_json::json!([4, 5]));
}

#[test]
fn test_shell_session() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["--empty", "shell"])
        .write_stdin("add Aegon\nadd Rhaenys\npartner 1 2\nchild 1 1\nsearch aegon\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Person Aegon registered with id 1."))
        .stdout(predicate::str::contains("Aegon is now a partner of Rhaenys"))
        .stdout(predicate::str::contains(
            "Error: failed to add child: Aegon cannot be their own parent",
        ))
        .stdout(predicate::str::contains("- Aegon (1)"))
        .stdout(predicate::str::contains("Goodbye."));
}

#[test]
fn test_shell_confirmed_delete_splits_lineage() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .arg("shell")
        .write_stdin("ancestor 1 4\ndelete 1\ny\nshow 4\nancestor 1 4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aegon I (1) is a parent of Aenys I (4)"))
        .stdout(predicate::str::contains("WARNING: Aegon I has 2 child(ren)"))
        .stdout(predicate::str::contains("Person Aegon I deleted."))
        .stdout(predicate::str::contains("Parents:  Rhaenys (2)"))
        .stdout(predicate::str::contains("Error: Person with id 1 not found"));
}

#[test]
fn test_config_init_and_list() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));
    assert!(dir.path().join("config.toml").exists());

    kinship(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    kinship(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("format = text"))
        .stdout(predicate::str::contains("load_demo = true"));

    kinship(&dir)
        .args(["config", "get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_drives_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "format = \"json\"\nload_demo = false\n",
    )
    .unwrap();

    kinship(&dir)
        .args(["search", "Aegon I"])
        .assert()
        .success()
        .stdout("[]\n");

    // Flags win over the file
    kinship(&dir)
        .args(["--format", "text", "tree"])
        .assert()
        .success()
        .stdout("No persons registered.\n");
}

#[test]
fn test_log_file() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("kinship.log");
    kinship(&dir)
        .args(["-v", "--log-file"])
        .arg(&log)
        .arg("tree")
        .assert()
        .success();

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains("Loaded demo dynasty with 60 persons"));
    assert!(!content.contains("\u{1b}["));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kinship"));
}
