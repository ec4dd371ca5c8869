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

#[test]
fn matrix_svg_square_fixture() {
    let input = fixture_path("gat_square.json");
    let out = tmp_path("matrix.svg");
    let res = run(&[
        "matrix",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
        "--title",
        "Decoding",
    ]);
    assert!(res.status.success(), "stderr={}", String::from_utf8_lossy(&res.stderr));

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Testing Time (s)"));
    assert!(svg.contains("Training Time (s)"));
    assert!(svg.contains(">Decoding</text>"));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn matrix_options_ragged_fixture() {
    let input = fixture_path("gat_ragged.json");
    let out = tmp_path("matrix_ragged.svg");
    let res = run(&[
        "matrix",
        "-i",
        input.to_string_lossy().as_ref(),
        "-o",
        out.to_string_lossy().as_ref(),
        "--vmin",
        "0.5",
        "--vmax",
        "1.0",
        "--tlim",
        "-0.05",
        "0.35",
        "-0.05",
        "0.35",
        "--cmap",
        "viridis",
        "--no-colorbar",
        "--no-xlabel",
    ]);
    assert!(res.status.success(), "stderr={}", String::from_utf8_lossy(&res.stderr));

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(!svg.contains("Testing Time (s)"));
    assert!(svg.contains("Training Time (s)"));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn matrix_unscored_fails() {
    let input = fixture_path("gat_unscored.json");
    let out = tmp_path("matrix_unscored.svg");
    let res = run(&[
        "matrix",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
    ]);
    assert!(!res.status.success());
    let stderr = String::from_utf8_lossy(&res.stderr);
    assert!(stderr.contains("Please score your data"), "stderr={stderr}");
    assert!(!out.exists());
}

#[test]
fn matrix_unknown_format_fails() {
    let input = fixture_path("gat_square.json");
    let out = tmp_path("matrix.bmp");
    let res = run(&[
        "matrix",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
    ]);
    assert!(!res.status.success());
    assert!(String::from_utf8_lossy(&res.stderr).contains("unknown output format"));
}

#[test]
fn matrix_png_when_enabled() {
    if !cfg!(feature = "png") {
        return;
    }
    let input = fixture_path("gat_square.json");
    let out = tmp_path("matrix.png");
    let res = run(&[
        "matrix",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
    ]);
    assert!(res.status.success(), "stderr={}", String::from_utf8_lossy(&res.stderr));
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let _ = std::fs::remove_file(&out);
}

#[test]
fn matrix_with_theme_and_config() {
    let input = fixture_path("gat_square.json");
    let cfg = tmp_path("viz.yaml");
    std::fs::write(&cfg, "matrix:\n  cmap: magma\nfigure:\n  width: 300\n  height: 240\n").unwrap();
    let out = tmp_path("matrix_cfg.svg");
    let res = run(&[
        "--theme",
        "paper",
        "--config",
        cfg.to_string_lossy().as_ref(),
        "matrix",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
    ]);
    assert!(res.status.success(), "stderr={}", String::from_utf8_lossy(&res.stderr));
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"width="300" height="240""#));
    let _ = std::fs::remove_file(&out);
    let _ = std::fs::remove_file(&cfg);
}

#[test]
fn matrix_non_finite_vmax_fails() {
    let input = fixture_path("gat_square.json");
    let out = tmp_path("matrix_nan.svg");
    let res = run(&[
        "matrix",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
        "--vmax",
        "nan",
    ]);
    assert!(!res.status.success());
    let stderr = String::from_utf8_lossy(&res.stderr);
    assert!(stderr.contains("vmax must be finite"), "stderr={stderr}");
    assert!(!out.exists());
}
