use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gatviz"))
}

fn repo_root() -> PathBuf {
    // crates/gat-cli -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").canonicalize().unwrap()
}

fn fixture_path(name: &str) -> PathBuf {
    repo_root().join("tests/fixtures").join(name)
}

fn tmp_path(filename: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("gatviz_cli_{}_{}_{}", std::process::id(), nanos, filename));
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn inspect(name: &str) -> serde_json::Value {
    let input = fixture_path(name);
    let res = run(&["inspect", "--input", input.to_string_lossy().as_ref()]);
    assert!(res.status.success(), "stderr={}", String::from_utf8_lossy(&res.stderr));
    serde_json::from_slice(&res.stdout).unwrap()
}

#[test]
fn inspect_square() {
    let v = inspect("gat_square.json");
    assert_eq!(v["n_train_times"], 5);
    assert_eq!(v["scored"], true);
    assert_eq!(v["diagonal_only"], false);
    assert_eq!(v["n_classes"], 4);
    assert_eq!(v["chance"]["status"], "known");
    assert_eq!(v["chance"]["value"], 0.25);
    assert_eq!(v["score_range"], serde_json::json!([0.48, 0.84]));
    assert_eq!(v["diagonal"]["scores"], serde_json::json!([0.52, 0.71, 0.84, 0.80, 0.76]));
}

#[test]
fn inspect_ragged_diagonal_stays_within_one_step() {
    let v = inspect("gat_ragged.json");
    assert_eq!(v["scorer_kind"], "auc_roc");
    assert_eq!(v["test_lengths"], serde_json::json!([3, 2, 3, 4]));
    assert_eq!(v["diagonal"]["scores"], serde_json::json!([0.50, 0.61, 0.66, 0.79]));
    assert_eq!(v["chance"]["value"], 0.5);
}

#[test]
fn inspect_diagonal_only() {
    let v = inspect("gat_diagonal_only.json");
    assert_eq!(v["diagonal_only"], true);
    assert_eq!(v["diagonal"]["scores"], serde_json::json!([0.51, 0.68, 0.81, 0.74]));
    assert_eq!(v["chance"]["value"], 0.5);
}

#[test]
fn inspect_unscored_and_unknown_scorer() {
    let v = inspect("gat_unscored.json");
    assert_eq!(v["scored"], false);
    assert!(v["diagonal"].is_null());

    let v = inspect("gat_custom_scorer.json");
    assert_eq!(v["chance"]["status"], "unknown");
    assert_eq!(v["chance"]["scorer"], "explained_variance");
}

#[test]
fn inspect_to_file() {
    let input = fixture_path("gat_square.json");
    let out = tmp_path("summary.json");
    let res = run(&[
        "inspect",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
    ]);
    assert!(res.status.success(), "stderr={}", String::from_utf8_lossy(&res.stderr));
    let v: serde_json::Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(v["n_train_times"], 5);
    let _ = std::fs::remove_file(&out);
}

#[test]
fn report_two_panels() {
    let input = fixture_path("gat_square.json");
    let out = tmp_path("report.svg");
    let res = run(&[
        "report",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
    ]);
    assert!(res.status.success(), "stderr={}", String::from_utf8_lossy(&res.stderr));
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Generalization across time"));
    assert!(svg.contains("Diagonal decoding"));
    assert!(svg.contains("Testing Time (s)"));
    assert!(svg.contains("Chance level"));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn version_prints_crate_version() {
    let res = run(&["version"]);
    assert!(res.status.success());
    let stdout = String::from_utf8_lossy(&res.stdout);
    assert!(stdout.starts_with("gatviz "), "stdout={stdout}");
}
