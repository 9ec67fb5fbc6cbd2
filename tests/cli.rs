use std::path::PathBuf;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("wordlist_scraper").unwrap();
    for var in [
        "WORDLIST_URL",
        "WORDLIST_OUTPUT",
        "WORDLIST_SELECTOR",
        "WORDLIST_TIMEOUT_SECS",
        "WORDLIST_USER_AGENT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{}.html", name))
}

#[test]
fn help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--selector"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--user-agent"));
}

#[test]
fn local_page_to_wordlist() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wordlist.txt");

    cmd()
        .arg(fixture("alpha_beta_gamma"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 6 tokens to"));

    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "Alpha\n1\nBeta\n2\nGamma\n3\n"
    );
}

#[test]
fn selector_flag_restricts_tables() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("games.txt");

    cmd()
        .arg(fixture("game_boy_games"))
        .args(["--selector", "table.wikitable", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 12 tokens"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("Title\nDeveloper\nAlleyway\n"));
    assert!(!text.contains("Navigation"));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_run_prints_only_result_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<table><tr><td>Metroid II</td></tr></table>")
                .set_delay(Duration::from_millis(1200)),
        )
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wordlist.txt");

    let expected = format!("Wrote 1 tokens to {}\n", out.display());
    cmd()
        .arg(format!("{}/wiki/List", server.uri()))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::eq(expected))
        .stderr(predicate::str::contains("Done in"));
}

#[test]
fn page_without_tables_succeeds_with_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wordlist.txt");

    cmd()
        .arg(fixture("no_tables"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 0 tokens"));

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "");
}

#[test]
fn output_path_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("from_env.txt");

    cmd()
        .arg(fixture("alpha_beta_gamma"))
        .env("WORDLIST_OUTPUT", &out)
        .assert()
        .success();

    assert!(out.exists());
}

#[test]
fn unreachable_url_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wordlist.txt");

    cmd()
        .args(["http://127.0.0.1:1/wiki/List", "--timeout", "2", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("fetch failed"));

    assert!(!out.exists());
}

#[test]
fn missing_local_file_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wordlist.txt");

    cmd()
        .arg(dir.path().join("not_saved.html"))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("read failed"));

    assert!(!out.exists());
}

#[test]
fn invalid_selector_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wordlist.txt");

    cmd()
        .arg(fixture("alpha_beta_gamma"))
        .args(["--selector", "table["])
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));

    assert!(!out.exists());
}

#[test]
fn unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no_such_dir").join("wordlist.txt");

    cmd()
        .arg(fixture("alpha_beta_gamma"))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("write failed"));
}
