use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_diary"))
}

/// Isolated HOME / XDG dirs so a developer's real config is never read.
fn sandbox() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::create_dir_all(dir.path().join("config")).expect("create config dir");
    std::fs::create_dir_all(dir.path().join("data")).expect("create data dir");
    dir
}

fn run_diary(sandbox: &Path, args: &[&str], input: &str) -> Output {
    run_diary_bytes(sandbox, args, input.as_bytes())
}

fn run_diary_bytes(sandbox: &Path, args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(bin())
        .args(args)
        .env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join("config"))
        .env("XDG_DATA_HOME", sandbox.join("data"))
        .env_remove("DIARY_PATH")
        .env_remove("DIARY_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn diary");
    // The child may exit before reading stdin (e.g. fatal load errors).
    if let Err(e) = child.stdin.take().expect("stdin").write_all(input) {
        assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe, "write stdin: {e}");
    }
    child.wait_with_output().expect("wait for diary")
}

fn read_records(path: &Path) -> Vec<serde_json::Value> {
    let contents = std::fs::read_to_string(path).expect("diary file should exist");
    serde_json::from_str(&contents).expect("diary file should be JSON")
}

const TWO_RECORDS: &str = "\
new {
time: 2001-01-20
tags: myTag
text: hello, world!
}
new {
time: 2001-01-21
tags: myOtherTag, myTag
text: bye, world!
}
exit
";

#[test]
fn test_two_records_are_saved() {
    let sandbox = sandbox();
    let diary = sandbox.path().join("diary.json");
    let diary_arg = diary.to_string_lossy().to_string();

    let output = run_diary(sandbox.path(), &[diary_arg.as_str()], TWO_RECORDS);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote 2 records to"));

    let records = read_records(&diary);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Text"], "hello, world!");
    assert_eq!(records[0]["Tags"], serde_json::json!(["myTag"]));
    assert_eq!(records[0]["EventTime"], "2001-01-20");
    assert_eq!(records[1]["Text"], "bye, world!");
    assert_eq!(records[1]["Tags"], serde_json::json!(["myOtherTag", "myTag"]));
}

#[test]
fn test_query_only_session_writes_nothing() {
    let sandbox = sandbox();
    let diary = sandbox.path().join("diary.json");
    let diary_arg = diary.to_string_lossy().to_string();

    let output = run_diary(sandbox.path(), &[diary_arg.as_str()], "tags\nweek series\nexit\n");

    assert!(output.status.success());
    assert!(!diary.exists());
}

#[test]
fn test_second_session_shows_latest_and_appends() {
    let sandbox = sandbox();
    let diary = sandbox.path().join("diary.json");
    let diary_arg = diary.to_string_lossy().to_string();

    run_diary(sandbox.path(), &[diary_arg.as_str()], TWO_RECORDS);
    let output = run_diary(
        sandbox.path(),
        &[diary_arg.as_str()],
        "by-tag myTag latest\nnew {\ntags: third\ntext: again\n}\nquit\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("**** Latest entry"));
    assert!(stdout.contains("text: bye, world!"));
    assert!(stdout.contains("myTag: 2001-01-21"));
    assert!(stdout.contains("myOtherTag: 2001-01-21"));

    let records = read_records(&diary);
    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["Text"], "again");
}

#[test]
fn test_diagnostics_go_to_stderr() {
    let sandbox = sandbox();
    let diary = sandbox.path().join("diary.json");
    let diary_arg = diary.to_string_lossy().to_string();

    let output = run_diary(
        sandbox.path(),
        &[diary_arg.as_str()],
        "}\nbogus\nby-tag\nexit\n",
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[WARN] closing brace closes nothing"));
    assert!(stderr.contains("[ERR] unknown command: bogus"));
    assert!(stderr.contains("[ERR] by-tag needs a tag"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unfinished_record_is_not_saved() {
    let sandbox = sandbox();
    let diary = sandbox.path().join("diary.json");
    let diary_arg = diary.to_string_lossy().to_string();

    let output = run_diary(sandbox.path(), &[diary_arg.as_str()], "new {\ntext: half\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unfinished record discarded"));
    assert!(!diary.exists());
}

#[test]
fn test_invalid_utf8_line_keeps_stored_records() {
    let sandbox = sandbox();
    let diary = sandbox.path().join("diary.json");
    let diary_arg = diary.to_string_lossy().to_string();

    let output = run_diary_bytes(
        sandbox.path(),
        &[diary_arg.as_str()],
        b"new {\ntext: precious\n}\ncaf\xe9\nexit\n",
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERR] unknown command: caf\u{FFFD}"));

    let records = read_records(&diary);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["Text"], "precious");
}

#[test]
fn test_malformed_diary_is_fatal() {
    let sandbox = sandbox();
    let diary = sandbox.path().join("diary.json");
    std::fs::write(&diary, "{ definitely not a diary").expect("write diary");
    let diary_arg = diary.to_string_lossy().to_string();

    let output = run_diary(sandbox.path(), &[diary_arg.as_str()], "exit\n");

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parse error"));
}

#[test]
fn test_config_file_supplies_path() {
    let sandbox = sandbox();
    let diary = sandbox.path().join("from-config.json");
    let config_dir = sandbox.path().join("config").join("diary");
    std::fs::create_dir_all(&config_dir).expect("create config dir");
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "[diary]\npath = \"{}\"\n\n[ui]\nshow_latest = false\n",
            diary.to_string_lossy()
        ),
    )
    .expect("write config");

    let output = run_diary(sandbox.path(), &[], "new {\ntext: via config\n}\nexit\n");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read_records(&diary)[0]["Text"], "via config");
}

#[test]
fn test_default_path_under_xdg_data() {
    let sandbox = sandbox();

    let output = run_diary(sandbox.path(), &["--quiet"], "new {\ntext: default\n}\nexit\n");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let diary = sandbox.path().join("data").join("diary").join("diary.json");
    assert_eq!(read_records(&diary)[0]["Text"], "default");
}
