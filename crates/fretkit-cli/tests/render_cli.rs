use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn cli_renders_svg_to_a_file() {
    let input = fixture("open_c.json");
    assert!(input.exists(), "fixture missing: {}", input.display());

    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("open_c.svg");

    let exe = assert_cmd::cargo_bin!("fretkit-cli");
    Command::new(exe)
        .args([
            "render",
            "--out",
            out.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg "), "output is not an SVG");
    assert!(svg.contains(">C</text>"));
    assert_eq!(svg.matches("<text ").count(), 7);
}

#[test]
fn cli_reads_a_bare_chord_from_stdin() {
    let chord = fs::read_to_string(fixture("f_barre.json")).expect("read fixture");

    let exe = assert_cmd::cargo_bin!("fretkit-cli");
    let output = assert_cmd::Command::new(exe)
        .args(["render", "--title", "F", "-"])
        .write_stdin(chord)
        .output()
        .expect("run cli");

    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    assert!(svg.contains("<rect "));
    assert!(svg.contains(">F</text>"));
}

#[test]
fn cli_applies_settings_files_and_seeds_handdrawn_output() {
    let input = fixture("open_c.json");
    let settings = fixture("handdrawn.json");

    let render = || {
        let exe = assert_cmd::cargo_bin!("fretkit-cli");
        let output = Command::new(exe)
            .args([
                "render",
                "--settings",
                settings.to_string_lossy().as_ref(),
                "--hand-drawn-seed",
                "42",
                input.to_string_lossy().as_ref(),
            ])
            .output()
            .expect("run cli");
        assert!(output.status.success());
        String::from_utf8(output.stdout).expect("utf-8 svg")
    };

    let first = render();
    assert!(first.contains("sketch-line"));
    assert!(first.contains(">5fr</text>"));
    assert!(first.contains(r##"stroke="#333""##));
    assert_eq!(first, render());
}

#[test]
fn cli_prints_the_diagram_size() {
    let exe = assert_cmd::cargo_bin!("fretkit-cli");
    let output = Command::new(exe)
        .args(["size", fixture("f_barre.json").to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let size: serde_json::Value = serde_json::from_slice(&output.stdout).expect("size json");
    assert_eq!(size["width"], 400.0);
    assert!(size["height"].as_f64().is_some_and(|h| h > 0.0));
}

#[test]
fn cli_rejects_invalid_settings() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let settings = tmp.path().join("bad.json");
    fs::write(&settings, r#"{ "strings": 1 }"#).expect("write settings");

    let exe = assert_cmd::cargo_bin!("fretkit-cli");
    Command::new(exe)
        .args([
            "render",
            "--settings",
            settings.to_string_lossy().as_ref(),
            fixture("f_barre.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn cli_usage_errors_exit_with_two() {
    let exe = assert_cmd::cargo_bin!("fretkit-cli");
    Command::new(exe)
        .args(["render", "--style", "pastel"])
        .assert()
        .failure()
        .code(2);
}
