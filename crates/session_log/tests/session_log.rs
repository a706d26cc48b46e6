use std::fs;
use std::path::Path;

use console_menu::{LogError, LogSink};
use session_log::{log_root, SessionLog, SessionLogError};
use time::macros::datetime;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("session log should be readable")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn nothing_is_created_before_the_first_line() {
    let cwd = tempfile::tempdir().expect("tempdir");
    let log = SessionLog::in_cwd(cwd.path());

    assert_eq!(log.dir(), log_root(cwd.path()));
    assert!(!log.is_prepared());
    assert!(!log.dir().exists());
}

#[test]
fn lines_are_appended_to_the_session_file() {
    let cwd = tempfile::tempdir().expect("tempdir");
    let mut log = SessionLog::new(log_root(cwd.path()), datetime!(2026-10-16 09:15:00 UTC));

    log.append("first").expect("append");
    log.append("second").expect("append");

    assert!(log.is_prepared());
    assert_eq!(
        log.path(),
        cwd.path().join("LOG").join("LogSession_2026-10-16 09-15-00.txt")
    );
    assert_eq!(read_lines(log.path()), ["first", "second"]);
}

#[test]
fn first_use_prunes_old_sessions() {
    let cwd = tempfile::tempdir().expect("tempdir");
    let dir = log_root(cwd.path());
    fs::create_dir_all(dir.join("archive")).expect("subdir");
    for minute in 0..5 {
        fs::write(dir.join(format!("LogSession_2026-10-15 10-0{minute}-00.txt")), "old\n")
            .expect("old session");
    }
    let mut log = SessionLog::new(&dir, datetime!(2026-10-16 09:15:00 UTC));

    log.append("fresh").expect("append");

    let sessions = fs::read_dir(&dir)
        .expect("read_dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .count();
    assert_eq!(sessions, 3);
    assert!(dir.join("archive").is_dir());
    assert!(dir.join("LogSession_2026-10-15 10-04-00.txt").exists());
    assert!(!dir.join("LogSession_2026-10-15 10-00-00.txt").exists());
}

#[test]
fn failed_preparation_is_retried() {
    let cwd = tempfile::tempdir().expect("tempdir");
    let dir = log_root(cwd.path());
    fs::write(&dir, "not a directory").expect("blocking file");
    let mut log = SessionLog::new(&dir, datetime!(2026-10-16 09:15:00 UTC));

    let error = log.append_line("lost").expect_err("LOG is a file");
    assert!(matches!(error, SessionLogError::NotADirectory { .. }));
    assert!(!log.is_prepared());

    let sink_error = log.append("lost too").expect_err("still blocked");
    assert!(matches!(sink_error, LogError::Rejected(_)));

    fs::remove_file(&dir).expect("unblock");
    log.append("kept").expect("retry succeeds");
    assert_eq!(read_lines(log.path()), ["kept"]);
}

#[test]
fn vanished_file_reports_io_error() {
    let cwd = tempfile::tempdir().expect("tempdir");
    let mut log = SessionLog::new(log_root(cwd.path()), datetime!(2026-10-16 09:15:00 UTC));
    log.append("first").expect("append");

    fs::remove_file(log.path()).expect("remove");

    let error = log.append("second").expect_err("file is gone");
    assert!(matches!(error, LogError::Io { operation: "opening session log", .. }));
}
