//! Tests for the `shortcodeless` binary.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_shortcodeless");

const TABLE: &str = concat!(
    r#"<table class="scless_column"><tr>"#,
    r#"<td style="width:30%">A</td><td style="width:70%">B</td>"#,
    r#"</tr></table>"#,
);

#[test]
fn test_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("post.html");
    let output = dir.path().join("post.out.html");
    fs::write(&input, TABLE).unwrap();

    let status = Command::new(BIN)
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--quiet")
        .status()
        .unwrap();
    assert!(status.success());

    let out = fs::read_to_string(&output).unwrap();
    assert!(out.contains(".scless_column_1 > div:nth-of-type(2) { width:70% }"));
    assert!(out.ends_with(
        r#"<div class="scless_column scless_column_1"><div><p>A</p></div><div><p>B</p></div></div>"#
    ));
}

#[test]
fn test_stdin_to_stdout_with_start_id() {
    let mut child = Command::new(BIN)
        .args(["--start-id", "9", "-q"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(TABLE.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let out = String::from_utf8(output.stdout).unwrap();
    assert!(out.contains("scless_column_9"));
}

#[test]
fn test_base_css_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("post.html");
    fs::write(&input, TABLE).unwrap();

    let output = Command::new(BIN)
        .arg(&input)
        .args(["--with-base-css", "--report", "-q"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out = String::from_utf8(output.stdout).unwrap();
    assert!(out.starts_with(r#"<style id="shortcodeless_columns-css">"#));

    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["containers"][0]["columns"], 2);
    assert_eq!(report["rules"], 2);
}

#[test]
fn test_base_css_follows_marker_class() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("post.html");
    fs::write(
        &input,
        r#"<table class="cols"><tr><td style="width:40%">A</td><td>B</td></tr></table>"#,
    )
    .unwrap();

    let output = Command::new(BIN)
        .arg(&input)
        .args(["--marker-class", "cols", "--with-base-css", "-q"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out = String::from_utf8(output.stdout).unwrap();
    let (base, rest) = out.split_at(out.find("</style>").unwrap() + 8);
    assert!(base.contains(".cols {"));
    assert!(base.contains(".cols > div {"));
    assert!(!base.contains("scless_column"));
    assert!(rest.contains(".cols_1 > div:nth-of-type(1) { width:40% }"));
    assert!(rest.contains(r#"<div class="cols cols_1">"#));
}

#[test]
fn test_invalid_marker_class_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("post.html");
    fs::write(&input, TABLE).unwrap();

    let output = Command::new(BIN)
        .arg(&input)
        .args(["--marker-class", "not valid"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error: Invalid configuration"));
}

#[test]
fn test_missing_input_fails() {
    let output = Command::new(BIN)
        .arg("/definitely/not/here.html")
        .output()
        .unwrap();

    assert!(!output.status.success());
}
