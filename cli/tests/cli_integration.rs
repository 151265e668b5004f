// CLI integration tests for the fixedcols binary.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_fixedcols");
    let mut command = Command::new(exe);
    command.env("RUST_LOG", "off");
    command
}

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("data")
}

#[test]
fn rows_with_layout_file() {
    let out = cmd()
        .arg(data_dir().join("sample.dat"))
        .arg("--layout")
        .arg(data_dir().join("sample.layout"))
        .output()
        .expect("run");
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let text = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "123456, \"abcdefg\", 9876543210, 0.512300, \"hijklmn\""
    );
}

#[test]
fn json_with_inline_fields() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.dat");
    fs::write(&input, "123abcd\n\n456wxyz\n").unwrap();

    let out = cmd()
        .arg(&input)
        .args(["--field", "i32:3:id", "--field", "str:4:code", "--json"])
        .output()
        .expect("run");
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["id"], serde_json::json!([123, 456]));
    assert_eq!(json["code"], serde_json::json!(["abcd", "wxyz"]));
}

#[test]
fn output_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.dat");
    let output = dir.path().join("nested").join("out.txt");
    fs::write(&input, " 1\n 2\n").unwrap();

    let out = cmd()
        .arg(&input)
        .args(["-f", "i8:2"])
        .arg("-o")
        .arg(&output)
        .output()
        .expect("run");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "1\n2");
}

#[test]
fn parse_failure_names_location() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.dat");
    fs::write(&input, "123abcd\n4x6wxyz\n").unwrap();

    let out = cmd()
        .arg(&input)
        .args(["--field", "i32:3:id", "--field", "str:4"])
        .output()
        .expect("run");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("failed to parse line 1, field 0 (id INT32)"),
        "stderr: {stderr}"
    );
}

#[test]
fn bad_line_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.dat");
    fs::write(&input, "12\nabcd\n").unwrap();

    let out = cmd()
        .arg(&input)
        .args(["--field", "i32:3", "--field", "str:4"])
        .output()
        .expect("run");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad line 0"));
}

#[test]
fn missing_input_fails() {
    let out = cmd()
        .arg("/definitely/not/here.dat")
        .args(["--field", "i32:3"])
        .output()
        .expect("run");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file not found"), "stderr: {stderr}");
}

#[test]
fn schema_is_required() {
    let out = cmd().arg("whatever.dat").output().expect("run");
    assert!(!out.status.success());
}
