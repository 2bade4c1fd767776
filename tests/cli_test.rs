//! Tests for the `pixelize` binary's output protocol.

mod common;

use common::*;
use pixel_stylize::PaletteName;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Stdio};

fn pixelize() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pixelize"));
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_render_prints_success_and_time() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", &gradient(32, 32));
    let output = dir.path().join("out.png");

    let result = pixelize()
        .args(["render", "--pixel-size", "8", "--style", "quantized", "--color-count", "4"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some(format!("SUCCESS:{}", output.display()).as_str()));
    assert!(lines.next().unwrap().starts_with("TIME:"));

    let image = assert_png(&std::fs::read(&output).unwrap());
    assert_size(&image, 32, 32);
    assert_max_colors(&image, 4);
}

#[test]
fn test_pipe_mode() {
    let png = pixelize::rendering::encode_png(&gradient(24, 16)).unwrap();
    let mut child = pixelize()
        .args(["render", "--pipe-mode", "--pixel-size", "4", "--style", "retro"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&png).unwrap();
    let result = child.wait_with_output().unwrap();

    assert!(result.status.success());
    let image = assert_png(&result.stdout);
    assert_size(&image, 24, 16);
    assert_in_palette(&image, PaletteName::Gameboy.palette().unwrap());

    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains("SUCCESS:PIPE_MODE"), "{stderr}");
    assert!(stderr.contains("TIME:"), "{stderr}");
}

#[test]
fn test_missing_input_prints_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = pixelize()
        .arg("render")
        .arg("--input")
        .arg(dir.path().join("missing.png"))
        .arg("--output")
        .arg(dir.path().join("out.png"))
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.starts_with("ERROR:"), "{stderr}");
}

#[test]
fn test_invalid_option_prints_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", &gradient(8, 8));
    let result = pixelize()
        .args(["render", "--dither-strength", "2.5"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.png"))
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains("ERROR:"), "{stderr}");
    assert!(stderr.contains("dithering_strength"), "{stderr}");
}

#[test]
fn test_algorithm_maps_to_quantized_style() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", &gradient(32, 32));
    let output = dir.path().join("out.png");
    let result = pixelize()
        .args(["render", "--algorithm", "median", "--pixel-size", "4", "--color-count", "3"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let image = assert_png(&std::fs::read(&output).unwrap());
    assert_max_colors(&image, 3);
}

#[test]
fn test_post_filter_flags() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", &gradient(16, 16));
    let output = dir.path().join("out.png");
    let result = pixelize()
        .args(["render", "--pixel-size", "4", "--edge-smoothing", "0.5"])
        .args(["--edge-harden", "0.5", "--cartoon-effect"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();
    assert!(result.status.success());
    assert_size(&assert_png(&std::fs::read(&output).unwrap()), 16, 16);

    let result = pixelize()
        .args(["render", "--edge-smoothing", "1.5"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains("edge_smoothing"), "{stderr}");
}

#[test]
fn test_compare_writes_grid() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "in.png", &gradient(20, 10));
    let output = dir.path().join("grid.png");
    let result = pixelize()
        .args(["compare", "--pixel-size", "5", "--color-count", "4"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let grid = assert_png(&std::fs::read(&output).unwrap());
    assert_size(&grid, 60, 2 * (10 + 30));
}

#[test]
fn test_palettes_listing() {
    let result = pixelize().arg("palettes").output().unwrap();
    assert!(result.status.success());
    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    let names: Vec<&str> = json["palettes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(names.len(), PaletteName::ALL.len());
    assert_eq!(names[0], "gameboy");

    let result = pixelize()
        .args(["palettes", "--colors", "gameboy"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(json["colors"].as_array().unwrap().len(), 4);
}
