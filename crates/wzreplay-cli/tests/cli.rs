use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const GAME_STRUCTUREINFO: u8 = 113;
const REPLAY_ENDED: u8 = 133;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("wzreplay"))
}

fn varint(mut value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    for threshold in [78u32, 95, 32, 70] {
        let limit = 256 - threshold;
        if value < limit {
            out.push(value as u8);
            return out;
        }
        value -= limit;
        out.push((255 - value % threshold) as u8);
        value /= threshold;
    }
    out.push(value as u8);
    out
}

fn be_block(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

/// Factory order for a three-turret design, which always raises a violation.
fn manufacture_payload() -> Vec<u8> {
    let mut payload = vec![0];
    payload.extend(varint(30));
    payload.push(0);
    payload.extend(varint(3));
    for unit in "Rig".encode_utf16() {
        payload.extend_from_slice(&unit.to_be_bytes());
    }
    payload.extend(varint(1030));
    payload.extend(varint(0));
    payload.extend_from_slice(&[0; 7]);
    payload.push(3);
    payload.extend([0, 0, 0]);
    payload
}

fn replay_bytes(map: &[u8]) -> Vec<u8> {
    let header = r#"{"gameOptions": {"game": {"map": "Sk-Rush"},
        "netplay.players": [{"name": "alpha", "allocated": true}]},
        "major": 4, "minor": 1, "replayFormatVer": 2}"#;
    let mut out = b"WZrp".to_vec();
    be_block(&mut out, header.as_bytes());
    out.extend_from_slice(&1u32.to_be_bytes());
    be_block(&mut out, map);

    let payload = manufacture_payload();
    out.push(0);
    out.push(GAME_STRUCTUREINFO);
    out.extend(varint(payload.len() as u32));
    out.extend(payload);
    out.extend([0, REPLAY_ENDED, 0]);

    be_block(&mut out, br#"{"gameTimeElapsed": 5000}"#);
    out.extend_from_slice(&0x0102_0304u32.to_be_bytes());
    out
}

fn write_replay(dir: &Path, map: &[u8]) -> PathBuf {
    let path = dir.join("game.wzrp");
    fs::write(&path, replay_bytes(map)).expect("write replay");
    path
}

#[test]
fn help_supports_analyse_and_analyze() {
    cmd()
        .arg("replay")
        .arg("analyse")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("replay")
        .arg("analyze")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn version_flag_prints_package_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.wzrp");
    let report = temp.path().join("report.json");

    cmd()
        .arg("replay")
        .arg("analyze")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn wrong_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("game.txt");
    fs::write(&input, replay_bytes(&[])).expect("write input");

    cmd()
        .arg("replay")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format").and(contains(".wzrp")));
}

#[test]
fn bad_magic_points_at_the_format() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("game.wzrp");
    fs::write(&input, b"nope, not a replay").expect("write input");

    cmd()
        .arg("replay")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("magic").and(contains("not a Warzone 2100 replay")));
}

#[test]
fn stdout_outputs_json() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_replay(temp.path(), &[]);

    let assert = cmd()
        .arg("replay")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(report["tool"]["name"], "wzreplay");
    assert_eq!(report["replay"]["map_name"], "Sk-Rush");
    assert_eq!(report["replay"]["messages"], 2);
    assert_eq!(report["droid_violations"][0]["id"], "WZ-DROID-TURRETS");
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_replay(temp.path(), &[]);
    let report = temp.path().join("report.json");

    cmd()
        .arg("replay")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure();
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_replay(temp.path(), &[]);

    cmd()
        .arg("replay")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("--pretty").and(contains("--compact")));
}

#[test]
fn report_file_is_written_quietly() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_replay(temp.path(), &[]);
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("replay")
        .arg("analyse")
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::is_empty());

    let json: Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("read report")).expect("json");
    assert_eq!(json["input"]["path"], input.display().to_string());
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_replay(temp.path(), &[]);

    cmd()
        .arg("replay")
        .arg("analyse")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("must differ from input"));
}

#[test]
fn strict_fails_on_violations_but_still_writes_report() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_replay(temp.path(), &[]);
    let report = temp.path().join("report.json");

    cmd()
        .arg("replay")
        .arg("analyse")
        .arg(input)
        .arg("-o")
        .arg(&report)
        .arg("--strict")
        .arg("--list-violations")
        .assert()
        .code(2)
        .stderr(
            contains("WZ-DROID-TURRETS")
                .and(contains("error:"))
                .and(contains("--list-violations")),
        );
    assert!(report.exists());
}

#[test]
fn map_out_writes_embedded_map() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_replay(temp.path(), b"PK\x03\x04map");
    let map = temp.path().join("map.wz");

    cmd()
        .arg("replay")
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--map-out")
        .arg(&map)
        .assert()
        .success();

    assert_eq!(fs::read(&map).expect("read map"), b"PK\x03\x04map");
}

#[test]
fn glob_input_resolves_single_match() {
    let temp = TempDir::new().expect("tempdir");
    write_replay(temp.path(), &[]);
    let pattern = temp.path().join("*.wzrp");

    cmd()
        .arg("replay")
        .arg("analyse")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
}

#[test]
fn orders_flag_adds_order_sections() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_replay(temp.path(), &[]);

    let assert = cmd()
        .arg("replay")
        .arg("analyse")
        .arg(&input)
        .arg("--stdout")
        .arg("--orders")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(
        report["structure_orders"][0]["name"],
        "STRUCTUREINFO_MANUFACTURE"
    );
    assert_eq!(report["structure_orders"][0]["droid_name"], "Rig");

    let assert = cmd()
        .arg("replay")
        .arg("analyse")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert!(report.get("structure_orders").is_none());
}
