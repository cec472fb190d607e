use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use argtree_manifest::load_manifest;

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("argtree-manifest-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn repo_root() -> &'static Path {
    // crates/argtree-manifest -> crates -> <repo root>
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("unexpected CARGO_MANIFEST_DIR layout")
}

#[test]
fn demo_manifest_loads_and_parses() {
    let manifest = load_manifest(&repo_root().join("demos/hulla.json")).unwrap();
    assert_eq!(manifest.name, "hulla");

    let parser = manifest.into_parser().unwrap();
    let result = parser
        .parse(&["--tsconfig", "tsconfig.json", "-T", "react", "ui", "rm", "button"])
        .unwrap();

    assert_eq!(result.argument("tsconfig").unwrap().as_str(), Some("tsconfig.json"));
    assert_eq!(result.argument("template").unwrap().as_str(), Some("react"));
    let remove = result.command("ui").unwrap().command("remove").unwrap();
    assert_eq!(remove.index, Some(5));
    assert_eq!(remove.argument("component").unwrap().as_str(), Some("button"));
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let dir = make_temp_dir("missing");
    let path = dir.join("nope.json");

    let err = load_manifest(&path).unwrap_err();
    assert!(err.to_string().contains("manifest not found"), "{err:#}");
    assert!(err.to_string().contains("nope.json"), "{err:#}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_json_names_the_file() {
    let dir = make_temp_dir("malformed");
    let path = dir.join("argtree.json");
    fs::write(&path, "{ \"name\": ").unwrap();

    let err = load_manifest(&path).unwrap_err();
    assert!(
        format!("{err:#}").contains("failed to parse manifest JSON"),
        "{err:#}"
    );

    let _ = fs::remove_dir_all(&dir);
}
