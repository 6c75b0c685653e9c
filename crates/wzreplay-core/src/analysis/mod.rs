use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::protocols::netplay::Packet;
use crate::source::replay::{ParseOptions, Replay, ReplayError, read_replay};
use crate::stats::{NameLookup, StatsCatalog, StatsError};
use crate::{Report, ReplaySummary, make_stub_report};

mod droids;
mod orders;
mod packets;
mod players;
mod research;
mod time;

pub use droids::{VIOLATION_BABA, VIOLATION_CYBORG_BODY, VIOLATION_TURRETS};

use droids::{DroidStats, add_manufactured_droid, build_auto_repair_summaries};
use orders::{droid_order_event, gift_event, structure_order_event};
use packets::{PacketStats, add_packet_stats, build_packet_summaries};
use players::build_player_summaries;
use research::research_event;
use time::format_game_time;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),
    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),
}

/// Optional report sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Fill `droid_orders`, `structure_orders` and `gifts`.
    pub include_orders: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub parse: ParseOptions,
    /// Directory of stats JSON files used for names and droid checks.
    pub stats_dir: Option<PathBuf>,
    pub report: ReportOptions,
}

/// A report together with the replay it was built from.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: Report,
    pub replay: Replay,
}

impl Analysis {
    pub fn embedded_map(&self) -> Option<&[u8]> {
        self.replay.embedded_map.as_deref()
    }
}

impl AnalysisOptions {
    pub fn load_catalog(&self) -> Result<Option<StatsCatalog>, StatsError> {
        self.stats_dir
            .as_deref()
            .map(StatsCatalog::load)
            .transpose()
    }
}

pub fn analyze_replay_file(
    path: &Path,
    options: &AnalysisOptions,
) -> Result<Analysis, AnalysisError> {
    let file = File::open(path)?;
    let bytes = file.metadata()?.len();
    analyze_replay(
        &path.display().to_string(),
        bytes,
        BufReader::new(file),
        options,
    )
}

pub fn analyze_replay<R: Read>(
    path: &str,
    bytes: u64,
    reader: R,
    options: &AnalysisOptions,
) -> Result<Analysis, AnalysisError> {
    let catalog = options.load_catalog()?;
    let replay = read_replay(reader, &options.parse)?;
    let lookup = catalog.as_ref().map(|catalog| catalog as &dyn NameLookup);
    let report = build_report(path, bytes, &replay, lookup, &options.report);
    Ok(Analysis { report, replay })
}

/// Aggregate a parsed replay into a report.
///
/// Game time for each event is the latest `GameTime` value seen before it.
/// Droid, structure and gift orders are only collected when
/// `options.include_orders` is set.
pub fn build_report(
    path: &str,
    bytes: u64,
    replay: &Replay,
    lookup: Option<&dyn NameLookup>,
    options: &ReportOptions,
) -> Report {
    let mut packet_stats: BTreeMap<u8, PacketStats> = BTreeMap::new();
    let mut droid_stats = DroidStats::default();
    let mut research = Vec::new();
    let mut droid_orders = Vec::new();
    let mut structure_orders = Vec::new();
    let mut gifts = Vec::new();
    let mut analysis_diagnostics = Vec::new();
    let mut game_time = 0u32;

    for message in &replay.messages {
        match &message.packet {
            Packet::ReplayEnded => continue,
            Packet::GameTime(time) => game_time = time.game_time,
            Packet::StructureInfo(info) => {
                if let Some(droid) = &info.manufactured_droid {
                    add_manufactured_droid(&mut droid_stats, message.sender, game_time, droid, lookup);
                }
                if options.include_orders {
                    structure_orders.push(structure_order_event(message.sender, game_time, info));
                }
            }
            Packet::DroidOrder(order) if options.include_orders => {
                droid_orders.push(droid_order_event(message.sender, game_time, order, lookup));
            }
            Packet::Gift(gift) if options.include_orders => {
                gifts.push(gift_event(message.sender, game_time, gift));
            }
            Packet::ResearchStatus(status) => {
                let (event, diagnostic) = research_event(message.sender, game_time, status, lookup);
                research.push(event);
                analysis_diagnostics.extend(diagnostic);
            }
            _ => {}
        }
        add_packet_stats(
            &mut packet_stats,
            message.packet.type_code(),
            message.length,
        );
    }

    let mut report = make_stub_report(path, bytes);
    report.replay = Some(build_replay_summary(replay));
    report.players = build_player_summaries(&replay.settings);
    report.packets = build_packet_summaries(packet_stats);
    report.research = research;
    report.droid_violations = droid_stats.violations;
    report.auto_repair = build_auto_repair_summaries(droid_stats.auto_repair, &replay.settings);
    report.diagnostics = replay
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .chain(analysis_diagnostics)
        .collect();
    report.droid_orders = droid_orders;
    report.structure_orders = structure_orders;
    report.gifts = gifts;

    info!(
        messages = replay.messages.len(),
        violations = report.droid_violations.len(),
        diagnostics = report.diagnostics.len(),
        "replay analysed"
    );
    report
}

fn build_replay_summary(replay: &Replay) -> ReplaySummary {
    let settings = &replay.settings;
    let options = &settings.game_options;
    let last_game_time = replay.last_game_time();
    ReplaySummary {
        format_version: settings.replay_format_version,
        netcode_version: format!("{}.{}", settings.major, settings.minor),
        version_string: options.version_string.clone(),
        map_name: options.game.map.clone(),
        map_hash: options.game.hash.clone(),
        b_comms: options.netplay_b_comms,
        embedded_map_bytes: replay
            .embedded_map
            .as_ref()
            .map_or(0, |map| map.len() as u64),
        messages: replay.messages.len() as u64,
        footer: replay.footer,
        last_game_time,
        last_game_time_text: last_game_time.map(format_game_time),
        game_time_elapsed: replay.end.game_time_elapsed,
    }
}
