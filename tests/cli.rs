use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn summary_mode_prints_the_fixed_scene() {
    let mut cmd = Command::cargo_bin("glimmer").expect("binary exists");
    cmd.arg("--summary-only");
    cmd.assert()
        .success()
        .stdout(contains("Scene contains 4 objects:"))
        .stdout(contains(" - box (36 vertices, texture unit 2)"))
        .stdout(contains(" - box (36 vertices, texture unit 1)"))
        .stdout(contains(" - sphere 20x20 (840 vertices, flat color)"))
        .stdout(contains("Cached 2 unique meshes"));
}

#[test]
fn unknown_arguments_are_rejected() {
    let mut cmd = Command::cargo_bin("glimmer").expect("binary exists");
    cmd.arg("--frobnicate");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --frobnicate"));
}
