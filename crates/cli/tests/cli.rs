use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("metadata.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        b"title;description;features\n\
          Dell XPS 15 16GB RAM;['Powerful ultrabook for work'];['16GB RAM', 'Intel i7']\n\
          Apple MacBook Air 8GB RAM;['Thin and light for everyday'];['8GB RAM', 'Apple M2']\n\
          Asus ROG 32GB RAM Gaming;['Gaming powerhouse'];['32GB RAM', 'RTX 4060']\n",
    )
    .unwrap();
    path
}

fn advisor() -> Command {
    Command::cargo_bin("laptop-advisor").unwrap()
}

#[test]
fn index_then_search_finds_the_gaming_laptop() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(&tmp);
    let snapshot = tmp.path().join("index.bin");

    advisor()
        .args(["index", "--catalog"])
        .arg(&catalog)
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stderr(predicate::str::contains("Indexed 3 items"));

    assert!(snapshot.exists());

    advisor()
        .args(["search", "32GB RAM Gaming", "--limit", "1", "--catalog"])
        .arg(&catalog)
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Asus ROG 32GB RAM Gaming"));
}

#[test]
fn search_builds_snapshot_on_first_run() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(&tmp);
    let snapshot = tmp.path().join("index.bin");

    advisor()
        .args(["search", "thin and light", "--catalog"])
        .arg(&catalog)
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Apple MacBook Air"));

    assert!(snapshot.exists());
}

#[test]
fn chat_with_rule_extractor_recommends_from_stated_preferences() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(&tmp);
    let snapshot = tmp.path().join("index.bin");

    advisor()
        .args(["chat", "--top-n", "1", "--catalog"])
        .arg(&catalog)
        .arg("--snapshot")
        .arg(&snapshot)
        .write_stdin(
            "I want an asus with 32gb ram to use for gaming\n\
             my budget is $2000\n\
             a 17 inch display would be nice\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello! I'm your laptop advisor."))
        .stdout(predicate::str::contains("Your preferences so far:"))
        .stdout(predicate::str::contains("1. Brand: Asus"))
        .stdout(predicate::str::contains("Here are the Top-1 laptops for you:"))
        .stdout(predicate::str::contains("Asus ROG 32GB RAM Gaming"));
}

#[test]
fn chat_with_no_usable_input_still_terminates() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(&tmp);
    let snapshot = tmp.path().join("index.bin");

    advisor()
        .args(["chat", "--top-n", "2", "--catalog"])
        .arg(&catalog)
        .arg("--snapshot")
        .arg(&snapshot)
        .write_stdin("hello\nstill thinking\nno idea\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Let me find recommendations based on your current preferences.",
        ))
        .stdout(predicate::str::contains("Here are some laptops you might like:"));
}

#[test]
fn empty_catalog_fails_at_startup() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.csv");
    std::fs::write(&path, "title;description;features\n").unwrap();

    advisor()
        .args(["search", "anything", "--catalog"])
        .arg(&path)
        .arg("--snapshot")
        .arg(tmp.path().join("index.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no usable rows"));
}
