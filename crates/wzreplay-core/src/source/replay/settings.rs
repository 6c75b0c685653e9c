use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// JSON header written by the game when recording starts.
///
/// Missing fields decode to their defaults so that headers from other game
/// versions still parse; only the format version is checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    #[serde(rename = "gameOptions")]
    pub game_options: GameOptions,
    pub major: i64,
    pub minor: i64,
    #[serde(rename = "replayFormatVer")]
    pub replay_format_version: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    #[serde(rename = "dataHash")]
    pub data_hash: Vec<Value>,
    pub game: GameSetup,
    pub ingame: IngameSettings,
    pub multistats: Vec<MultiStats>,
    #[serde(rename = "netplay.bComms")]
    pub netplay_b_comms: bool,
    #[serde(rename = "netplay.hostPlayer")]
    pub netplay_host_player: i64,
    #[serde(rename = "netplay.players")]
    pub netplay_players: Vec<NetplayPlayer>,
    #[serde(rename = "randSeed")]
    pub rand_seed: i64,
    #[serde(rename = "selectedPlayer")]
    pub selected_player: i64,
    #[serde(rename = "versionString")]
    pub version_string: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSetup {
    pub alliance: i64,
    pub base: i64,
    pub hash: String,
    pub inactivity_minutes: i64,
    pub is_map_mod: bool,
    pub is_random: bool,
    pub map: String,
    pub map_has_scavengers: bool,
    pub max_players: i64,
    pub mod_hashes: Vec<Value>,
    pub name: String,
    pub power: i64,
    pub scavengers: i64,
    pub tech_level: i64,
    #[serde(rename = "type")]
    pub game_type: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngameSettings {
    pub flags: i64,
    pub side: bool,
    pub structure_limits: Vec<StructureLimit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureLimit {
    pub id: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiStats {
    /// Base64 public key of the player.
    pub identity: String,
    pub losses: i64,
    pub played: i64,
    pub recent_kills: i64,
    pub recent_power_lost: i64,
    pub recent_score: i64,
    pub total_kills: i64,
    pub total_score: i64,
    pub wins: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetplayPlayer {
    pub ai: i64,
    pub allocated: bool,
    pub colour: i64,
    pub difficulty: i64,
    pub faction: i64,
    pub heartattacktime: i64,
    pub heartbeat: bool,
    #[serde(rename = "isSpectator")]
    pub is_spectator: bool,
    pub kick: bool,
    pub name: String,
    pub position: i64,
    pub ready: bool,
    pub team: i64,
}

/// Trailing JSON summary written when recording stops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndChunk {
    #[serde(
        rename = "gameTimeElapsed",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub game_time_elapsed: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One player slot, joining the netplay table with the matching stats entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSlot {
    pub index: usize,
    pub name: String,
    pub position: i64,
    pub team: i64,
    pub allocated: bool,
    pub spectator: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_hash: Option<String>,
}

impl ReplaySettings {
    pub fn map_name(&self) -> &str {
        &self.game_options.game.map
    }

    /// All slots in index order, allocated or not.
    pub fn player_slots(&self) -> Vec<PlayerSlot> {
        let options = &self.game_options;
        options
            .netplay_players
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerSlot {
                index,
                name: player.name.clone(),
                position: player.position,
                team: player.team,
                allocated: player.allocated,
                spectator: player.is_spectator,
                identity_hash: options
                    .multistats
                    .get(index)
                    .and_then(|stats| identity_hash(&stats.identity)),
            })
            .collect()
    }
}

/// Lowercase hex SHA-256 of a base64 identity key.
///
/// Returns `None` for an empty or undecodable identity.
///
/// # Examples
/// ```text
/// use wzreplay_core::source::replay::settings::identity_hash;
///
/// assert_eq!(identity_hash(""), None);
/// assert_eq!(identity_hash("AA==").map(|h| h.len()), Some(64));
/// ```
pub fn identity_hash(identity: &str) -> Option<String> {
    if identity.is_empty() {
        return None;
    }
    let key = STANDARD.decode(identity).ok()?;
    let digest = Sha256::digest(&key);
    Some(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}
