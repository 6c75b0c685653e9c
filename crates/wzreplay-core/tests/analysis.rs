mod common;

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wzreplay_core::{
    AnalysisError, AnalysisOptions, ReportOptions, StructureRef, VIOLATION_BABA,
    VIOLATION_TURRETS, analyze_replay, analyze_replay_file,
};

use common::{
    DroidDesign, GAME_DROIDINFO, GAME_GAME_TIME, GAME_RESEARCHSTATUS, GAME_STRUCTUREINFO,
    NET_PING, ReplayBuilder,
};

fn write_stats(dir: &Path) {
    let tables = [
        ("body.json", r#"{"Body1REC": {"id": "Body1REC", "name": "Viper"}}"#),
        ("brain.json", r#"{}"#),
        (
            "propulsion.json",
            r#"{"BaBaProp": {"id": "BaBaProp", "name": "Fan"},
                "wheeled01": {"id": "wheeled01", "name": "Wheels"}}"#,
        ),
        (
            "repair.json",
            r#"{"AutoRepair": {"id": "AutoRepair", "name": "Auto-Repair"},
                "ZNULLREPAIR": {"id": "ZNULLREPAIR", "name": "None"}}"#,
        ),
        ("ecm.json", r#"{}"#),
        ("sensor.json", r#"{}"#),
        ("construction.json", r#"{}"#),
        (
            "research.json",
            r#"{"R-Sys-Engineering01": {"name": "Engineering"},
                "R-Vehicle-Prop-Halftracks": {"name": "Half-tracks"}}"#,
        ),
        ("structure.json", r#"{}"#),
        ("weapons.json", r#"{"MG1Mk1": {"id": "MG1Mk1", "name": "Machinegun"}}"#),
    ];
    for (file, json) in tables {
        fs::write(dir.join(file), json).unwrap();
    }
}

fn sample_replay() -> Vec<u8> {
    ReplayBuilder::new()
        .message(0, GAME_GAME_TIME, &common::game_time(1_000))
        .message(0, NET_PING, &[0; 4])
        .message(0, GAME_RESEARCHSTATUS, &common::research(0, true, 12, 1))
        .message(0, GAME_GAME_TIME, &common::game_time(65_000))
        .message(
            1,
            GAME_STRUCTUREINFO,
            &common::manufacture(
                1,
                30,
                &DroidDesign {
                    name: "Fan Rig",
                    body: 0,
                    propulsion: 0,
                    repair_unit: 0,
                    weapons: &[0, 0, 0],
                },
            ),
        )
        .message(1, GAME_RESEARCHSTATUS, &common::research(1, false, 13, 9))
        .message(2, 251, &[1])
        .build()
}

#[test]
fn report_without_stats_uses_raw_indices() {
    let bytes = sample_replay();
    let report = analyze_replay(
        "memory.wzrp",
        bytes.len() as u64,
        &bytes[..],
        &AnalysisOptions::default(),
    )
    .unwrap()
    .report;

    let replay = report.replay.as_ref().unwrap();
    assert_eq!(replay.map_name, "Sk-Rush");
    assert_eq!(replay.netcode_version, "4.1");
    assert_eq!(replay.last_game_time, Some(65_000));
    assert_eq!(replay.last_game_time_text.as_deref(), Some("1m5s"));
    assert_eq!(replay.game_time_elapsed, Some(65_000));
    assert_eq!(replay.messages, 8);

    assert_eq!(report.players.len(), 2);
    assert_eq!(report.players[0].identity_hash.as_ref().map(String::len), Some(64));

    let codes: Vec<u8> = report.packets.iter().map(|p| p.type_code).collect();
    assert_eq!(codes, vec![NET_PING, GAME_STRUCTUREINFO, GAME_RESEARCHSTATUS, GAME_GAME_TIME, 251]);
    let game_time = &report.packets[3];
    assert_eq!(game_time.count, 2);
    assert_eq!(report.packets[4].name, "UNKNOWN");

    assert_eq!(report.research.len(), 2);
    assert!(report.research.iter().all(|r| r.topic_name.is_none()));
    assert_eq!(report.research[0].game_time, 1_000);

    let ids: Vec<&str> = report.droid_violations.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec![VIOLATION_TURRETS]);
    assert!(report.auto_repair.is_empty());

    assert_eq!(report.diagnostics.len(), 2);
    assert!(report.diagnostics[0].contains("has 3 weapons"));
    assert!(report.diagnostics[1].contains("unknown packet type 251"));
}

#[test]
fn report_with_stats_resolves_names_and_checks_designs() {
    let stats = TempDir::new().unwrap();
    write_stats(stats.path());
    let options = AnalysisOptions {
        stats_dir: Some(stats.path().to_path_buf()),
        ..AnalysisOptions::default()
    };

    let bytes = sample_replay();
    let report = analyze_replay("memory.wzrp", bytes.len() as u64, &bytes[..], &options)
        .unwrap()
        .report;

    assert_eq!(report.research[0].topic_name.as_deref(), Some("Half-tracks"));
    assert!(report.research[1].topic_name.is_none());
    assert!(report
        .diagnostics
        .iter()
        .any(|line| line == "research topic 9 out of range (2 topics loaded)"));

    let ids: Vec<&str> = report.droid_violations.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec![VIOLATION_TURRETS, VIOLATION_BABA]);
    let violation = &report.droid_violations[1];
    assert_eq!(violation.player, 1);
    assert_eq!(violation.game_time, 65_000);
    assert_eq!(violation.droid.propulsion.id.as_deref(), Some("BaBaProp"));

    assert_eq!(report.auto_repair.len(), 1);
    assert_eq!(report.auto_repair[0].name, "beta");
    assert_eq!(report.auto_repair[0].first_game_time_text, "1m5s");
}

#[test]
fn report_is_deterministic() {
    let bytes = sample_replay();
    let options = AnalysisOptions::default();
    let first = analyze_replay("a.wzrp", 1, &bytes[..], &options).unwrap();
    let second = analyze_replay("a.wzrp", 1, &bytes[..], &options).unwrap();
    assert_eq!(
        serde_json::to_string(&first.report).unwrap(),
        serde_json::to_string(&second.report).unwrap()
    );
}

#[test]
fn analyze_file_reports_size_and_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game.wzrp");
    let bytes = sample_replay();
    fs::write(&path, &bytes).unwrap();

    let analysis = analyze_replay_file(&path, &AnalysisOptions::default()).unwrap();
    assert_eq!(analysis.report.input.bytes, bytes.len() as u64);
    assert_eq!(analysis.report.input.path, path.display().to_string());
    assert_eq!(analysis.replay.messages.len(), 8);
    assert!(analysis.embedded_map().is_none());
}

#[test]
fn missing_stats_directory_fails() {
    let dir = TempDir::new().unwrap();
    let options = AnalysisOptions {
        stats_dir: Some(dir.path().join("nope")),
        ..AnalysisOptions::default()
    };
    let bytes = sample_replay();
    let err = analyze_replay("a.wzrp", 1, &bytes[..], &options).unwrap_err();
    assert!(matches!(err, AnalysisError::Stats(_)));
}

#[test]
fn corrupt_replay_is_a_replay_error() {
    let err = analyze_replay("a.wzrp", 4, &b"NOPE"[..], &AnalysisOptions::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::Replay(_)));
}

fn orders_replay() -> Vec<u8> {
    ReplayBuilder::new()
        .message(0, GAME_GAME_TIME, &common::game_time(2_000))
        .message(
            0,
            GAME_DROIDINFO,
            &common::build_order(0, 1_280, 640, 0x000d_0003, &[101, 104]),
        )
        .message(1, GAME_DROIDINFO, &common::move_order(1, 64, 64, &[7]))
        .message(1, GAME_RESEARCHSTATUS, &common::research(1, true, 13, 0))
        .build()
}

#[test]
fn build_orders_resolve_structure_names() {
    let stats = TempDir::new().unwrap();
    write_stats(stats.path());
    fs::write(
        stats.path().join("structure.json"),
        r#"{"A0BaBaFactory": {"name": "Scavenger Factory"},
            "A0CommandCentre": {"name": "Command Center"},
            "A0CyborgFactory": {"name": "Cyborg Factory"},
            "A0HardcreteMk1Wall": {"name": "Hardcrete Wall"}}"#,
    )
    .unwrap();
    let options = AnalysisOptions {
        stats_dir: Some(stats.path().to_path_buf()),
        report: ReportOptions {
            include_orders: true,
        },
        ..AnalysisOptions::default()
    };

    let bytes = orders_replay();
    let report = analyze_replay("orders.wzrp", 1, &bytes[..], &options)
        .unwrap()
        .report;

    assert_eq!(report.droid_orders.len(), 2);
    let build = &report.droid_orders[0];
    assert_eq!(build.player, 0);
    assert_eq!(build.game_time, 2_000);
    assert_eq!(build.subtype, "LOC");
    assert_eq!(build.order.as_deref(), Some("DORDER_BUILD"));
    assert_eq!(build.droid_ids, vec![101, 104]);
    let placed = build.build.as_ref().unwrap();
    assert_eq!(placed.direction, 180);
    assert_eq!(
        placed.structure,
        Some(StructureRef::Named {
            index: 3,
            name: "Hardcrete Wall".to_string()
        })
    );

    let movement = &report.droid_orders[1];
    assert_eq!(movement.order.as_deref(), Some("DORDER_MOVE"));
    assert!(movement.build.is_none());

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("Hardcrete Wall"));
}

#[test]
fn orders_are_omitted_unless_requested() {
    let bytes = orders_replay();
    let report = analyze_replay("orders.wzrp", 1, &bytes[..], &AnalysisOptions::default())
        .unwrap()
        .report;
    assert!(report.droid_orders.is_empty());
    assert!(report.structure_orders.is_empty());

    let value = serde_json::to_value(&report).unwrap();
    assert!(value.get("droid_orders").is_none());
}

#[test]
fn structure_orders_list_every_structure_command() {
    let options = AnalysisOptions {
        report: ReportOptions {
            include_orders: true,
        },
        ..AnalysisOptions::default()
    };
    let bytes = sample_replay();
    let report = analyze_replay("a.wzrp", 1, &bytes[..], &options).unwrap().report;

    assert_eq!(report.structure_orders.len(), 1);
    let order = &report.structure_orders[0];
    assert_eq!(order.player, 1);
    assert_eq!(order.struct_id, 30);
    assert_eq!(order.name, "STRUCTUREINFO_MANUFACTURE");
    assert_eq!(order.droid_name.as_deref(), Some("Fan Rig"));
}
