//! wzreplay core library for Warzone 2100 replay decoding.
//!
//! This crate decodes the `.wzrp` replay container and the netplay messages
//! it records, then aggregates them into a deterministic report. Sources
//! frame messages from a byte stream, protocol decoders (layout/reader/
//! parser) turn payloads into typed packets, and the analysis layer builds
//! the report. Decoding is byte-oriented and side-effect free; file access
//! stays in `source` and `stats`.
//!
//! Invariants:
//! - The netplay varint never consumes more than five bytes.
//! - The message stream ends exactly at the sentinel; nothing is read past
//!   the footer.
//! - Unknown packet types and trailing payload bytes are diagnostics, never
//!   fatal errors.
//! - Report ordering is deterministic and stable across runs.
//!
//! Version française (résumé):
//! Cette crate décode le conteneur de replay `.wzrp` et les messages netplay
//! qu'il enregistre : sources -> décodeurs (layout/reader/parser) -> rapport
//! déterministe. Les types de paquets inconnus et les octets résiduels sont
//! signalés comme diagnostics, jamais comme erreurs fatales.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use wzreplay_core::{AnalysisOptions, analyze_replay_file};
//!
//! let analysis = analyze_replay_file(Path::new("game.wzrp"), &AnalysisOptions::default())?;
//! println!("report version: {}", analysis.report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod protocols;
pub mod source;
pub mod stats;

pub use analysis::{
    Analysis, AnalysisError, AnalysisOptions, ReportOptions, VIOLATION_BABA,
    VIOLATION_CYBORG_BODY, VIOLATION_TURRETS, analyze_replay, analyze_replay_file, build_report,
};
use protocols::netplay::model::{Coord, OrderTarget};
pub use protocols::netplay::{Packet, PacketClass, decode, decode_packet};
pub use source::replay::{
    Diagnostic, ParseOptions, ParseStep, Replay, ReplayError, ReplayErrorKind, ReplayFileSource,
    ReplayMessage, ReplayReader, read_replay,
};
pub use source::{MessageSource, RawMessage};
pub use stats::{NameLookup, StatCategory, StatsCatalog, StatsError, StructureRef};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Aggregated replay report with deterministic ordering.
///
/// # Examples
/// ```
/// use wzreplay_core::make_stub_report;
///
/// let report = make_stub_report("game.wzrp", 123);
/// assert_eq!(report.report_version, wzreplay_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input replay metadata.
    pub input: InputInfo,

    /// Container summary (absent in stub reports).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replay: Option<ReplaySummary>,
    /// Allocated player slots in index order.
    pub players: Vec<PlayerSummary>,
    /// Per type code traffic, sorted by code. The sentinel is not counted.
    pub packets: Vec<PacketSummary>,
    /// Research status changes in arrival order.
    pub research: Vec<ResearchEvent>,
    /// Illegal droid designs in arrival order.
    pub droid_violations: Vec<DroidViolation>,
    /// First auto-repair production per player, sorted by slot.
    pub auto_repair: Vec<AutoRepairSummary>,
    /// Non-fatal findings, one line each.
    pub diagnostics: Vec<String>,
    /// Droid commands in arrival order; only filled when orders are requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub droid_orders: Vec<DroidOrderEvent>,
    /// Factory and research facility commands; only filled when orders are
    /// requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub structure_orders: Vec<StructureOrderEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gifts: Vec<GiftEvent>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "wzreplay").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input replay metadata embedded in reports.
///
/// # Examples
/// ```
/// use wzreplay_core::InputInfo;
///
/// let input = InputInfo {
///     path: "game.wzrp".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Header, framing and timing facts about one replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// `replayFormatVer` from the header.
    pub format_version: i64,
    /// Netcode version as `major.minor`.
    pub netcode_version: String,
    /// Game build that recorded the replay.
    pub version_string: String,
    pub map_name: String,
    pub map_hash: String,
    /// `netplay.bComms` from the header.
    pub b_comms: bool,
    /// Size of the embedded map blob, zero when absent.
    pub embedded_map_bytes: u64,
    /// Framed messages, sentinel included.
    pub messages: u64,
    /// Opaque footer value after the end chunk.
    pub footer: u32,
    /// Game time of the last `GameTime` message, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_game_time: Option<u32>,
    /// `last_game_time` as whole seconds (e.g., `1m5s`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_game_time_text: Option<String>,
    /// `gameTimeElapsed` from the end chunk, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_time_elapsed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub slot: usize,
    pub name: String,
    pub position: i64,
    pub team: i64,
    pub spectator: bool,
    /// Hex SHA-256 of the player's public key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketSummary {
    pub type_code: u8,
    /// Registry name, or `UNKNOWN`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<PacketClass>,
    pub count: u64,
    /// Sum of declared payload lengths.
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchEvent {
    pub game_time: u32,
    /// Sender slot.
    pub player: u8,
    /// False when the topic was cancelled.
    pub started: bool,
    pub building_id: u32,
    pub topic_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroidViolation {
    /// Stable violation identifier (e.g., `WZ-DROID-TURRETS`).
    pub id: String,
    pub message: String,
    /// Sender slot.
    pub player: u8,
    pub game_time: u32,
    pub droid: DroidSummary,
}

/// Manufactured droid design with components resolved where possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroidSummary {
    pub name: String,
    pub droid_id: u32,
    pub kind: i32,
    pub body: ComponentRef,
    pub brain: ComponentRef,
    pub propulsion: ComponentRef,
    pub repair_unit: ComponentRef,
    pub ecm: ComponentRef,
    pub sensor: ComponentRef,
    pub construct: ComponentRef,
    pub weapons: Vec<ComponentRef>,
}

/// Dense component index plus its stats id when stats are loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRef {
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoRepairSummary {
    pub player: u8,
    pub name: String,
    pub first_game_time: u32,
    pub first_game_time_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroidOrderEvent {
    pub game_time: u32,
    /// Sender slot.
    pub player: u8,
    /// `OBJ`, `LOC`, `SEC`, or `UNKNOWN(n)`.
    pub subtype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<OrderTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_end: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SecondaryOrder>,
    pub droid_ids: Vec<u32>,
}

/// Structure placed by a build or line-build order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOrder {
    /// Raw tagged stat reference.
    pub struct_ref: u32,
    pub direction: u16,
    /// Resolution against the structure dictionary, when stats are loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryOrder {
    pub order: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureOrderEvent {
    pub game_time: u32,
    /// Sender slot.
    pub player: u8,
    pub struct_id: u32,
    pub code: u8,
    pub name: String,
    /// Design name for manufacture orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droid_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftEvent {
    pub game_time: u32,
    /// Sender slot.
    pub player: u8,
    pub gift: String,
    pub from: u8,
    pub to: u8,
    pub droid_id: u32,
}

pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "wzreplay".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        replay: None,
        players: vec![],
        packets: vec![],
        research: vec![],
        droid_violations: vec![],
        auto_repair: vec![],
        diagnostics: vec![],
        droid_orders: vec![],
        structure_orders: vec![],
        gifts: vec![],
    }
}
