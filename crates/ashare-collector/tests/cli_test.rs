//! 명령행 인자 오류 처리 테스트

use std::path::Path;
use std::process::{Command, Output};

/// 인자 오류 종료 코드 (-1)
const BAD_ARGS_STATUS: i32 = 255;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ashare-collector"))
        .args(args)
        .current_dir(dir)
        .env("COLLECTOR_DATA_DIR", dir)
        .env("LOG_FILE", dir.join("app.log"))
        .env("TUSHARE_TOKEN", "test-token")
        .env("TUSHARE_API_URL", "http://127.0.0.1:9")
        .output()
        .unwrap()
}

fn database_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("stock_") && name.ends_with(".sqlite3"))
        .collect()
}

#[test]
fn test_unknown_quarter_exits_without_database() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["2020", "Q5"]);

    assert_eq!(output.status.code(), Some(BAD_ARGS_STATUS));
    assert!(database_files(dir.path()).is_empty());

    let log = std::fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(log.contains("wrong period para"));
}

#[test]
fn test_missing_quarter_exits_without_database() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["2020"]);

    assert_eq!(output.status.code(), Some(BAD_ARGS_STATUS));
    assert!(database_files(dir.path()).is_empty());
}

#[test]
fn test_too_many_arguments_exits_without_database() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["2020", "Q1", "extra"]);

    assert_eq!(output.status.code(), Some(BAD_ARGS_STATUS));
    assert!(database_files(dir.path()).is_empty());

    let log = std::fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(log.contains("para error"));
}

#[test]
fn test_help_exits_normally() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["--help"]);

    assert!(output.status.success());
    assert!(database_files(dir.path()).is_empty());
}
