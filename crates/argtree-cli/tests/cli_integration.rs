use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Value, json};

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("argtree-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn repo_root() -> &'static Path {
    // crates/argtree-cli -> crates -> <repo root>
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("unexpected CARGO_MANIFEST_DIR layout")
}

fn demo_manifest() -> PathBuf {
    repo_root().join("demos/hulla.json")
}

fn argtree() -> Command {
    Command::new(env!("CARGO_BIN_EXE_argtree"))
}

fn stdout_json(out: &std::process::Output) -> Value {
    serde_json::from_slice(&out.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}):\n{}",
            String::from_utf8_lossy(&out.stdout)
        )
    })
}

#[test]
fn help_works() {
    let out = argtree()
        .arg("--help")
        .output()
        .expect("failed to run argtree --help");
    assert!(
        out.status.success(),
        "argtree --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("parse") && stdout.contains("check"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn parse_prints_the_result_tree() {
    let out = argtree()
        .arg("parse")
        .arg("--manifest")
        .arg(demo_manifest())
        .args(["--", "--verbose", "i", "-D", "react", "vue"])
        .output()
        .expect("failed to run argtree parse");
    assert!(
        out.status.success(),
        "argtree parse failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );

    let result = stdout_json(&out);
    assert_eq!(result["arguments"]["verbose"]["value"], json!(true));
    assert_eq!(result["arguments"]["tsconfig"]["index"], json!(-1));

    let install = &result["commands"]["install"];
    assert_eq!(install["detected"], json!(true));
    assert_eq!(install["index"], json!(1));
    assert_eq!(install["arguments"]["dev"]["index"], json!(2));
    assert_eq!(install["arguments"]["packages"]["value"], json!(["react", "vue"]));
    assert_eq!(result["commands"]["ui"]["detected"], json!(false));
}

#[test]
fn compact_output_is_one_line() {
    let out = argtree()
        .arg("parse")
        .arg("-m")
        .arg(demo_manifest())
        .arg("--compact")
        .args(["--", "ui", "add", "button", "src/ui"])
        .output()
        .expect("failed to run argtree parse");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim_end().lines().count(), 1, "{stdout}");
    let result: Value = serde_json::from_str(&stdout).unwrap();
    let add = &result["commands"]["ui"]["commands"]["add"];
    assert_eq!(add["arguments"]["component"]["value"], json!("button"));
    assert_eq!(add["arguments"]["path"]["index"], json!(3));
}

#[test]
fn parse_errors_fail_the_process() {
    let out = argtree()
        .arg("parse")
        .arg("--manifest")
        .arg(demo_manifest())
        .args(["--", "bogus"])
        .output()
        .expect("failed to run argtree parse");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unhandled argument: bogus"), "{stderr}");
}

#[test]
fn json_errors_are_printed_on_stdout() {
    let out = argtree()
        .arg("parse")
        .arg("--manifest")
        .arg(demo_manifest())
        .arg("--json-errors")
        .args(["--", "--template", "angular"])
        .output()
        .expect("failed to run argtree parse");
    assert!(!out.status.success());

    let err = stdout_json(&out);
    assert_eq!(err["origin"], json!("schema"));
    assert_eq!(err["code"], json!("invalid_enum_value"));
    assert_eq!(err["argument"], json!("template"));
    assert_eq!(err["index"], json!(-1));
    assert_eq!(err["path"], json!(["hulla", "template"]));
}

#[test]
fn check_lists_commands_and_aliases() {
    let out = argtree()
        .arg("check")
        .arg("--manifest")
        .arg(demo_manifest())
        .output()
        .expect("failed to run argtree check");
    assert!(
        out.status.success(),
        "argtree check failed:\nstderr:\n{}",
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("hulla\n"), "{stdout}");
    assert!(stdout.contains("  install (i)\n"), "{stdout}");
    assert!(stdout.contains("    remove (rm, delete)\n"), "{stdout}");
}

#[test]
fn check_rejects_ambiguous_declarations() {
    let dir = make_temp_dir("check-ambiguous");
    let manifest = dir.join("argtree.json");
    fs::write(
        &manifest,
        r#"{
  "name": "app",
  "arguments": [
    { "name": "files", "type": "infiniteSequence" },
    { "name": "target", "type": "positional" }
  ]
}
"#,
    )
    .expect("failed to write manifest");

    let out = argtree()
        .arg("check")
        .current_dir(&dir)
        .output()
        .expect("failed to run argtree check");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Cannot define positional \"target\" after an infiniteSequence"),
        "{stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}
