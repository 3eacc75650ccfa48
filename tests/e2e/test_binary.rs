//! Integration tests for the process-canvas binary.
//!
//! These tests run the compiled binary against the step lists in `demos/`.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_process-canvas"))
}

fn demo(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("demos");
    path.push(name);
    path
}

/// Run the binary with `input` on stdin. Returns the raw output.
fn run_raw(input: &str, args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .env_remove("PROCESS_CANVAS_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::Write;
            if let Some(ref mut stdin) = child.stdin {
                stdin.write_all(input.as_bytes()).ok();
            }
            child.wait_with_output()
        })
        .expect("Failed to run binary")
}

/// Run the binary and require success. Returns stdout.
fn run_binary(input: &str, args: &[&str]) -> String {
    let output = run_raw(input, args);
    assert!(
        output.status.success(),
        "Binary exited with {:?}:\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Non-UTF8 output")
}

fn course_module() -> String {
    fs::read_to_string(demo("course_module.json")).expect("demo file")
}

// ─── Formats ────────────────────────────────────────────────────────────────

#[test]
fn test_svg_is_default_format() {
    let svg = run_binary(&course_module(), &[]);
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"width="800""#));
    assert!(svg.contains(">Prerequisites met?</text>"));
    assert!(svg.contains(">Yes</text>"));
}

#[test]
fn test_width_and_height_flags() {
    let svg = run_binary(&course_module(), &["--width", "1200", "--height", "900"]);
    assert!(svg.contains(r#"width="1200""#));
    assert!(svg.contains(r#"height="900""#));
}

#[test]
fn test_text_format_unicode_and_ascii() {
    let unicode = run_binary(&course_module(), &["--format", "text"]);
    assert!(unicode.contains("Check prerequisites"));
    assert!(unicode.contains('│') || unicode.contains('─'));

    let ascii = run_binary(&course_module(), &["--format", "text", "--ascii"]);
    assert!(ascii.contains("Check prerequisites"));
    assert!(ascii.is_ascii(), "non-ASCII char in --ascii output");
}

#[test]
fn test_layout_format_is_json() {
    let out = run_binary(&course_module(), &["--format", "layout"]);
    let value: serde_json::Value = serde_json::from_str(&out).expect("layout JSON");
    assert_eq!(value["grid"]["columns"], 3);
    assert_eq!(value["grid"]["rows"], 2);
    assert_eq!(value["positions"].as_object().map(|m| m.len()), Some(5));
    assert_eq!(value["connections"].as_array().map(|a| a.len()), Some(5));
    assert_eq!(value["connections"][2]["label"], "Yes");
}

#[test]
fn test_select_highlights_step() {
    let plain = run_binary(&course_module(), &[]);
    let selected = run_binary(&course_module(), &["--select", "P300"]);
    assert!(!plain.contains("#fde68a"));
    assert!(selected.contains(r##"fill="#fde68a""##));
}

#[test]
fn test_fit_and_zoom_change_transform() {
    let plain = run_binary(&course_module(), &[]);
    let fitted = run_binary(&course_module(), &["--fit"]);
    let zoomed = run_binary(&course_module(), &["--zoom-in", "2"]);
    assert!(!plain.contains("matrix("));
    assert!(fitted.contains("matrix("));
    assert!(zoomed.contains("matrix(1.44 0 0 1.44 0 0)"));
}

// ─── Diagnostics ────────────────────────────────────────────────────────────

#[test]
fn test_check_clean_flow() {
    let out = run_binary(&course_module(), &["--check"]);
    let value: serde_json::Value = serde_json::from_str(&out).expect("diagnostics JSON");
    assert_eq!(value["steps"], 5);
    assert_eq!(value["connections"], 5);
    assert_eq!(value["hasCycles"], false);
}

#[test]
fn test_check_reports_dangling_and_fails() {
    let src = r#"[{"id": "A", "kind": "Start", "nextIds": ["B", "ghost"]}, {"id": "B", "kind": "End"}]"#;
    let output = run_raw(src, &["--check"]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("diagnostics JSON");
    assert_eq!(value["dangling"][0]["to"], "ghost");
}

// ─── Input and output ───────────────────────────────────────────────────────

#[test]
fn test_reads_from_file() {
    let output = Command::new(binary_path())
        .arg(demo("legacy_export.json"))
        .args(["--format", "text", "--ascii"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Open ticket"));
    assert!(stdout.contains("Close ticket"));
}

#[test]
fn test_output_to_file() {
    let dir = std::env::temp_dir().join("process_canvas_test_write");
    fs::create_dir_all(&dir).ok();
    let out_file = dir.join("out.svg");

    let output = run_raw(&course_module(), &["--output", out_file.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let content = fs::read_to_string(&out_file).unwrap();
    assert!(content.starts_with("<svg"));

    fs::remove_file(&out_file).ok();
    fs::remove_dir(&dir).ok();
}

#[test]
fn test_config_file() {
    let dir = std::env::temp_dir().join("process_canvas_test_config");
    fs::create_dir_all(&dir).ok();
    let config = dir.join("canvas.json");
    fs::write(&config, r#"{"width": 640, "height": 480, "layout": {"nodeWidth": 120}}"#).unwrap();

    let out = run_binary(
        &course_module(),
        &["--config", config.to_str().unwrap(), "--format", "layout"],
    );
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["positions"]["P100"]["width"], 120.0);

    fs::remove_file(&config).ok();
    fs::remove_dir(&dir).ok();
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[test]
fn test_malformed_input_fails() {
    let output = run_raw("[{", &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
}

#[test]
fn test_invalid_size_fails() {
    let output = run_raw(&course_module(), &["--width", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn test_missing_file_fails() {
    let output = run_raw("", &["/nonexistent/steps.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read"));
}
