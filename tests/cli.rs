//! End-to-end tests of the `guardpost` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn guardpost(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("guardpost").unwrap();
    cmd.env_remove("GUARDPOST_LOG")
        .env_remove("GUARDPOST_CONFIG")
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(data)
        .arg("--config")
        .arg(data.join("guardpost.toml"));
    cmd
}

fn add_page(data: &Path, title: &str) {
    guardpost(data)
        .args(["add", "pages", "--set"])
        .arg(format!("title={}", title))
        .args(["--set", "content=<p>Body</p>"])
        .assert()
        .success();
}

#[test]
fn test_dashboard_is_default_command() {
    let dir = TempDir::new().unwrap();
    guardpost(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CMS Pages"))
        .stdout(predicate::str::contains("Support settings: not configured"));
}

#[test]
fn test_add_then_list() {
    let dir = TempDir::new().unwrap();
    add_page(dir.path(), "My Page");

    guardpost(dir.path())
        .args(["list", "pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("My Page"))
        .stdout(predicate::str::contains("Showing 1 to 1 of 1 results"));

    assert!(dir.path().join("guardpost.pages.json").exists());
}

#[test]
fn test_pagination() {
    let dir = TempDir::new().unwrap();
    for i in 1..=12 {
        add_page(dir.path(), &format!("Page {:02}", i));
    }

    guardpost(dir.path())
        .args(["list", "pages", "--sort", "title", "--page-size", "5", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 11 to 12 of 12 results"))
        .stdout(predicate::str::contains("Page 12"))
        .stdout(predicate::str::contains("Page 05").not());
}

#[test]
fn test_invalid_slug_is_rejected() {
    let dir = TempDir::new().unwrap();
    guardpost(dir.path())
        .args([
            "add",
            "pages",
            "--set",
            "title=My Page",
            "--set",
            "slug=My Page!",
            "--set",
            "content=<p>x</p>",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("slug"));

    assert!(!dir.path().join("guardpost.pages.json").exists());
}

#[test]
fn test_edit_unknown_id_redirects_to_list() {
    let dir = TempDir::new().unwrap();
    guardpost(dir.path())
        .args(["edit", "services", "missing", "--set", "title=X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"))
        .stdout(predicate::str::contains("not found"))
        .stdout(predicate::str::contains("Showing 0 to 0 of 0 results"));
}

#[test]
fn test_settings_round_trip() {
    let dir = TempDir::new().unwrap();
    guardpost(dir.path())
        .args([
            "settings",
            "--set",
            "support_email=help@guardpost.example",
            "--set",
            "support_phone=0800 000 000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Support settings saved"));

    guardpost(dir.path())
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("help@guardpost.example"));
}

#[test]
fn test_corrupt_blob_lists_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("guardpost.banners.json"), "{not json").unwrap();

    guardpost(dir.path())
        .args(["list", "banners"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 0 to 0 of 0 results"));
}

#[test]
fn test_config_page_size() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("guardpost.toml"), "page_size = 2\n").unwrap();
    for title in ["Alpha", "Bravo", "Charlie"] {
        add_page(dir.path(), title);
    }

    guardpost(dir.path())
        .args(["list", "pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 to 2 of 3 results"));
}

#[test]
fn test_reset_all() {
    let dir = TempDir::new().unwrap();
    add_page(dir.path(), "About");

    guardpost(dir.path())
        .args(["reset", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared CMS Pages"));

    assert!(!dir.path().join("guardpost.pages.json").exists());
}
