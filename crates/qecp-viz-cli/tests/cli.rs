// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use qecp_dry_tests::{CaseBuilder, VizDataBuilder};
use qecp_model::VizData;
use tempfile::TempDir;

fn chain(vertices: usize) -> CaseBuilder {
    let mut case = CaseBuilder::new().vertices(vertices);
    for v in 1..vertices {
        case = case.edge(v - 1, v, 2.0);
    }
    case
}

fn write_data(dir: &Path, data: &VizData) -> PathBuf {
    let path = dir.join("viz.json");
    std::fs::write(&path, serde_json::to_vec(data).unwrap()).unwrap();
    path
}

struct Fixture {
    dir: TempDir,
    data: PathBuf,
    settings: PathBuf,
}

fn fixture(data: &VizData) -> Fixture {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json");
    std::fs::write(&settings, "{}").unwrap();
    let data = write_data(dir.path(), data);
    Fixture {
        dir,
        data,
        settings,
    }
}

fn line_dataset() -> VizData {
    VizDataBuilder::new()
        .line_positions(4)
        .case("chain", chain(4).defect(0).build())
        .build()
}

fn cli(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("qecp-viz").unwrap();
    cmd.arg("--config").arg(&fixture.settings);
    cmd
}

#[test]
fn inspect_prints_scene_stats() {
    let fx = fixture(&line_dataset());
    cli(&fx)
        .arg("inspect")
        .arg(&fx.data)
        .assert()
        .success()
        .stdout(predicate::str::contains("case            0 of 1 (chain)"))
        .stdout(predicate::str::contains("vertices        4 (+4 outlines)"))
        .stdout(predicate::str::contains("edges           3"));
}

#[test]
fn inspect_rejects_a_missing_case() {
    let fx = fixture(&line_dataset());
    cli(&fx)
        .args(["inspect", "--case", "3"])
        .arg(&fx.data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("building case 3"));
}

#[test]
fn pick_reports_the_vertex_under_the_pointer() {
    let fx = fixture(&line_dataset());
    cli(&fx)
        .arg("pick")
        .arg(&fx.data)
        .args(["--x", "640", "--y", "480"])
        .assert()
        .success()
        .stdout("vertex 2\n");
    cli(&fx)
        .arg("pick")
        .arg(&fx.data)
        .args(["--x", "100", "--y", "100"])
        .assert()
        .success()
        .stdout("nothing\n");
}

#[test]
fn validate_accepts_clean_data() {
    let fx = fixture(&line_dataset());
    cli(&fx)
        .arg("validate")
        .arg(&fx.data)
        .assert()
        .success()
        .stdout("ok\n");
}

#[test]
fn validate_lists_problems_and_fails() {
    let data = VizDataBuilder::new()
        .line_positions(2)
        .case(
            "bad",
            CaseBuilder::new()
                .vertices(2)
                .grown_edge(0, 1, 2.0, 2.0, 1.0)
                .edge(1, 5, 2.0)
                .build(),
        )
        .build();
    let fx = fixture(&data);
    cli(&fx)
        .arg("validate")
        .arg(&fx.data)
        .assert()
        .failure()
        .stdout(predicate::str::contains("case 0 edge 0 is grown beyond its weight"))
        .stdout(predicate::str::contains(
            "case 0 edge 1 references vertex 5 without a position",
        ))
        .stderr(predicate::str::contains("2 problem(s) found"));
}

#[test]
fn unreadable_input_names_the_file() {
    let fx = fixture(&line_dataset());
    let missing = fx.dir.path().join("nope.json");
    cli(&fx)
        .arg("validate")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
    let garbage = fx.dir.path().join("garbage.json");
    std::fs::write(&garbage, "{\"cases\": 7}").unwrap();
    cli(&fx)
        .arg("validate")
        .arg(&garbage)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing"));
}
