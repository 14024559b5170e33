//! Integration tests for the itrack CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd, each
//! against its own database file in a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get an itrack command isolated from user config and environment
fn itrack(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("itrack").unwrap();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .env_remove("ITRACK_DB")
        .env_remove("ITRACK_LOG");
    cmd
}

fn db_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("inventory.db")
}

/// Helper to create an initialized database in a temp directory
fn setup_inventory() -> TempDir {
    let tmp = TempDir::new().unwrap();
    itrack(&tmp)
        .arg("--db")
        .arg(db_path(&tmp))
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Run `itrack --db <tmp db> <args>`
fn run(tmp: &TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
    itrack(tmp).arg("--db").arg(db_path(tmp)).args(args).assert()
}

/// Helper to create an asset and return its ID. Serial, maker and model get
/// defaults unless `extra` sets them.
fn create_asset(tmp: &TempDir, extra: &[&str]) -> String {
    let mut args = vec!["asset", "new", "-f", "id"];
    for (flag, value) in [("--serial", "SN-1"), ("--maker", "Lenovo"), ("--model", "T14")] {
        if !extra.contains(&flag) {
            args.extend_from_slice(&[flag, value]);
        }
    }
    args.extend_from_slice(extra);
    let output = itrack(tmp)
        .arg("--db")
        .arg(db_path(tmp))
        .args(&args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "asset new failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn show_json(tmp: &TempDir, id: &str) -> serde_json::Value {
    let output = itrack(tmp)
        .arg("--db")
        .arg(db_path(tmp))
        .args(["asset", "show", id, "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    itrack(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IT asset inventory"))
        .stdout(predicate::str::contains("asset"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    itrack(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("itrack"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    itrack(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("itrack"));
}

// ============================================================================
// Init and reference data
// ============================================================================

#[test]
fn test_init_creates_database() {
    let tmp = TempDir::new().unwrap();
    itrack(&tmp)
        .arg("--db")
        .arg(db_path(&tmp))
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized inventory"))
        .stdout(predicate::str::contains("Categories      7"));
    assert!(db_path(&tmp).exists());
}

#[test]
fn test_init_twice_reports_existing() {
    let tmp = setup_inventory();
    run(&tmp, &["init"])
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_default_database_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    itrack(&tmp).args(["category", "list"]).assert().success();
    assert!(tmp.path().join("itrack.db").exists());
}

#[test]
fn test_database_from_env() {
    let tmp = TempDir::new().unwrap();
    itrack(&tmp)
        .env("ITRACK_DB", tmp.path().join("env.db"))
        .args(["location", "list", "--count"])
        .assert()
        .success()
        .stdout("5\n");
    assert!(tmp.path().join("env.db").exists());
}

#[test]
fn test_database_from_project_config() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".itrack")).unwrap();
    fs::write(
        tmp.path().join(".itrack/config.yaml"),
        "database: from-config.db\ndefault_format: csv\n",
    )
    .unwrap();

    itrack(&tmp)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,prefix,description,types"));
    assert!(tmp.path().join("from-config.db").exists());
}

#[test]
fn test_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".itrack")).unwrap();
    fs::write(tmp.path().join(".itrack/config.yaml"), "database: [oops\n").unwrap();

    itrack(&tmp)
        .args(["category", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_category_list() {
    let tmp = setup_inventory();
    run(&tmp, &["category", "list"])
        .success()
        .stdout(predicate::str::contains("LAP-"))
        .stdout(predicate::str::contains("Monitors"))
        .stdout(predicate::str::contains("7 category(s) found"));

    run(&tmp, &["category", "list", "--count"])
        .success()
        .stdout("7\n");
}

#[test]
fn test_type_list_scoped_to_category() {
    let tmp = setup_inventory();
    run(&tmp, &["type", "list", "--category", "MON"])
        .success()
        .stdout(predicate::str::contains("Ultrawide Monitor"))
        .stdout(predicate::str::contains("Ultrabook").not());

    run(&tmp, &["type", "list", "--category", "mon", "-f", "csv"])
        .success()
        .stdout(predicate::str::starts_with("id,category,name\n"));
}

#[test]
fn test_type_list_unknown_category() {
    let tmp = setup_inventory();
    run(&tmp, &["type", "list", "--category", "XYZ"])
        .failure()
        .stderr(predicate::str::contains("No category matching"));
}

#[test]
fn test_location_list_json() {
    let tmp = setup_inventory();
    run(&tmp, &["location", "list", "-f", "json"])
        .success()
        .stdout(predicate::str::contains("\"name\": \"Head Office\""))
        .stdout(predicate::str::contains("\"type\": \"office\""));
}

// ============================================================================
// Asset creation
// ============================================================================

#[test]
fn test_asset_new_requires_fields() {
    let tmp = setup_inventory();
    run(&tmp, &["asset", "new", "--serial", "SN-1", "--model", "T14"])
        .failure()
        .stderr(predicate::str::contains("--maker is required"));
}

#[test]
fn test_asset_new_sequences_tags() {
    let tmp = setup_inventory();
    let first = create_asset(&tmp, &[]);
    let second = create_asset(&tmp, &["--tag", "LAP-"]);

    assert_eq!(show_json(&tmp, &first)["asset_tag"], "LAP-0001");
    assert_eq!(show_json(&tmp, &second)["asset_tag"], "LAP-0002");

    run(&tmp, &["asset", "next-tag", "--category", "LAP"])
        .success()
        .stdout("LAP-0003\n");
    run(&tmp, &["asset", "next-tag", "--category", "MON"])
        .success()
        .stdout("MON-0001\n");
}

#[test]
fn test_asset_new_reports_created() {
    let tmp = setup_inventory();
    run(
        &tmp,
        &[
            "asset", "new", "--category", "MON", "--serial", "CN-1", "--maker", "Dell", "--model",
            "U2723QE",
        ],
    )
    .success()
    .stdout(predicate::str::contains("Created asset MON-0001"));
}

#[test]
fn test_asset_new_with_all_fields() {
    let tmp = setup_inventory();
    let id = create_asset(
        &tmp,
        &[
            "--category",
            "LAP",
            "--type",
            "Chromebook",
            "--tag",
            "LAP-0100",
            "--purchased",
            "2023-06-15",
            "--warranty",
            "",
            "--location",
            "Main Warehouse",
            "--status",
            "assigned",
            "--notes",
            "Loaner pool",
            "--ram",
            "8",
            "--storage",
            "0.25",
            "--storage-type",
            "ssd",
        ],
    );

    let asset = show_json(&tmp, &id);
    assert_eq!(asset["asset_tag"], "LAP-0100");
    assert_eq!(asset["purchase_date"], "2023-06-15");
    assert!(asset["warranty_end_date"].is_null());
    assert_eq!(asset["status_id"], 1);
    assert_eq!(asset["notes"], "Loaner pool");
    assert_eq!(asset["ram_gb"], 8);
    assert_eq!(asset["storage_type"], "SSD");
}

#[test]
fn test_asset_new_derives_warranty_from_purchase() {
    let tmp = setup_inventory();
    let id = create_asset(&tmp, &["--purchased", "2024-02-29"]);
    assert_eq!(show_json(&tmp, &id)["warranty_end_date"], "2025-02-28");
}

#[test]
fn test_asset_new_rejects_bad_date() {
    let tmp = setup_inventory();
    run(
        &tmp,
        &[
            "asset", "new", "--serial", "S", "--maker", "M", "--model", "X", "--purchased",
            "2024-13-01",
        ],
    )
    .failure()
    .stderr(predicate::str::contains("not a valid date"));
}

#[test]
fn test_asset_new_rejects_warranty_before_purchase() {
    let tmp = setup_inventory();
    run(
        &tmp,
        &[
            "asset",
            "new",
            "--serial",
            "S",
            "--maker",
            "M",
            "--model",
            "X",
            "--purchased",
            "2024-05-01",
            "--warranty",
            "2024-04-30",
        ],
    )
    .failure()
    .stderr(predicate::str::contains("before purchase date"));
}

#[test]
fn test_asset_new_rejects_prefix_mismatch() {
    let tmp = setup_inventory();
    run(
        &tmp,
        &[
            "asset", "new", "--category", "MON", "--tag", "LAP-0001", "--serial", "S", "--maker",
            "M", "--model", "X",
        ],
    )
    .failure()
    .stderr(predicate::str::contains("does not start with"));
}

#[test]
fn test_asset_new_rejects_duplicate_tag() {
    let tmp = setup_inventory();
    create_asset(&tmp, &["--tag", "LAP-0007"]);
    run(
        &tmp,
        &[
            "asset", "new", "--tag", "LAP-0007", "--serial", "S", "--maker", "M", "--model", "X",
        ],
    )
    .failure()
    .stderr(predicate::str::contains("already in use"));
}

#[test]
fn test_asset_new_unknown_type() {
    let tmp = setup_inventory();
    run(
        &tmp,
        &[
            "asset", "new", "--category", "MON", "--type", "Ultrabook", "--serial", "S",
            "--maker", "M", "--model", "X",
        ],
    )
    .failure()
    .stderr(predicate::str::contains("No type matching 'Ultrabook'"));
}

// ============================================================================
// Asset listing
// ============================================================================

#[test]
fn test_asset_list_empty() {
    let tmp = setup_inventory();
    run(&tmp, &["asset", "list"])
        .success()
        .stdout(predicate::str::contains("No assets found"));
    run(&tmp, &["asset", "list", "--count"])
        .success()
        .stdout("0\n");
}

#[test]
fn test_asset_list_filters() {
    let tmp = setup_inventory();
    create_asset(&tmp, &[]);
    create_asset(
        &tmp,
        &["--category", "MON", "--maker", "Dell", "--model", "U2723QE", "--status", "assigned"],
    );

    run(&tmp, &["asset", "list", "--count"])
        .success()
        .stdout("2\n");
    run(&tmp, &["asset", "list", "--category", "MON", "--count"])
        .success()
        .stdout("1\n");
    run(&tmp, &["asset", "list", "--status", "assigned", "-f", "id"])
        .success()
        .stdout(predicate::str::contains("\n").count(1));
    run(&tmp, &["asset", "list", "--search", "u2723"])
        .success()
        .stdout(predicate::str::contains("MON-0001"))
        .stdout(predicate::str::contains("LAP-0001").not());
}

#[test]
fn test_asset_list_csv() {
    let tmp = setup_inventory();
    create_asset(&tmp, &["--purchased", "2023-06-15", "--warranty", ""]);

    run(&tmp, &["asset", "list", "-f", "csv"])
        .success()
        .stdout(predicate::str::starts_with(
            "id,tag,type,status,maker,model,serial,location,purchased,warranty\n",
        ))
        .stdout(predicate::str::contains(
            "LAP-0001,Ultrabook,Available,Lenovo,T14,SN-1,Head Office,2023-06-15,\n",
        ));
}

#[test]
fn test_asset_list_markdown() {
    let tmp = setup_inventory();
    create_asset(&tmp, &[]);

    run(&tmp, &["asset", "list", "-f", "md"])
        .success()
        .stdout(predicate::str::contains("| TAG"))
        .stdout(predicate::str::contains("LAP-0001"));
}

// ============================================================================
// Asset show / edit / status / delete
// ============================================================================

#[test]
fn test_asset_show_by_tag() {
    let tmp = setup_inventory();
    create_asset(&tmp, &["--purchased", "2023-06-15"]);

    run(&tmp, &["asset", "show", "LAP-0001"])
        .success()
        .stdout(predicate::str::contains("Tag: LAP-0001"))
        .stdout(predicate::str::contains("Status: Available"))
        .stdout(predicate::str::contains("Category: Laptops (LAP)"))
        .stdout(predicate::str::contains("Purchased: 2023-06-15"));
}

#[test]
fn test_asset_show_not_found() {
    let tmp = setup_inventory();
    run(&tmp, &["asset", "show", "LAP-9999"])
        .failure()
        .stderr(predicate::str::contains("Asset not found"));
}

#[test]
fn test_asset_edit_keeps_tag() {
    let tmp = setup_inventory();
    let id = create_asset(&tmp, &["--purchased", "2023-06-15"]);

    run(&tmp, &["asset", "edit", &id, "--serial", "SN-NEW", "--notes", "Rebuilt"])
        .success()
        .stdout(predicate::str::contains("Updated asset LAP-0001"));

    let asset = show_json(&tmp, &id);
    assert_eq!(asset["serial_number"], "SN-NEW");
    assert_eq!(asset["notes"], "Rebuilt");
    assert_eq!(asset["purchase_date"], "2023-06-15");
    assert_eq!(asset["warranty_end_date"], "2024-06-15");
}

#[test]
fn test_asset_edit_category_change_retags() {
    let tmp = setup_inventory();
    let id = create_asset(&tmp, &[]);

    run(&tmp, &["asset", "edit", "LAP-0001", "--category", "DSK"]).success();
    assert_eq!(show_json(&tmp, &id)["asset_tag"], "DSK-0001");
}

#[test]
fn test_asset_status_lifecycle() {
    let tmp = setup_inventory();
    let id = create_asset(&tmp, &[]);

    run(&tmp, &["asset", "status", &id, "assigned"])
        .success()
        .stdout(predicate::str::contains("Available → Assigned"));
    run(&tmp, &["asset", "status", &id, "under-maintenance"]).success();
    run(&tmp, &["asset", "status", &id, "assigned"])
        .failure()
        .stderr(predicate::str::contains("Invalid status transition"));

    run(&tmp, &["asset", "retire", &id]).success();
    assert_eq!(show_json(&tmp, &id)["status_id"], 4);
    run(&tmp, &["asset", "status", &id, "available"]).failure();
}

#[test]
fn test_asset_status_rejects_unknown_value() {
    let tmp = setup_inventory();
    let id = create_asset(&tmp, &[]);
    run(&tmp, &["asset", "status", &id, "lost"])
        .failure()
        .stderr(predicate::str::contains("Unknown status"));
}

#[test]
fn test_asset_delete() {
    let tmp = setup_inventory();
    let id = create_asset(&tmp, &[]);

    run(&tmp, &["asset", "delete", &id, "--yes"])
        .success()
        .stdout(predicate::str::contains("Deleted asset LAP-0001"));
    run(&tmp, &["asset", "show", &id]).failure();
    run(&tmp, &["asset", "delete", &id, "--yes"])
        .failure()
        .stderr(predicate::str::contains("Asset not found"));
}
