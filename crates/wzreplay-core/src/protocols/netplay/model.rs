use serde::{Deserialize, Serialize};

use super::layout;
use super::registry;

/// One decoded message payload.
///
/// Every registered code maps to exactly one variant: a structured record
/// for the codes this crate decodes, `Unhandled` for the rest of the
/// registry, and `Unknown` for codes the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Packet {
    GameTime(GameTime),
    StructureInfo(StructureInfo),
    ResearchStatus(ResearchStatus),
    DroidOrder(DroidOrder),
    PlayerLeft { player: u8 },
    Gift(Gift),
    LasSat(LasSat),
    DebugMode { enable: bool },
    ReplayEnded,
    Unhandled { type_code: u8 },
    Unknown { type_code: u8 },
}

impl Packet {
    /// Wire type code this packet was decoded from.
    pub fn type_code(&self) -> u8 {
        match self {
            Packet::GameTime(_) => layout::GAME_GAME_TIME,
            Packet::StructureInfo(_) => layout::GAME_STRUCTUREINFO,
            Packet::ResearchStatus(_) => layout::GAME_RESEARCHSTATUS,
            Packet::DroidOrder(_) => layout::GAME_DROIDINFO,
            Packet::PlayerLeft { .. } => layout::GAME_PLAYER_LEFT,
            Packet::Gift(_) => layout::GAME_GIFT,
            Packet::LasSat(_) => layout::GAME_LASSAT,
            Packet::DebugMode { .. } => layout::GAME_DEBUG_MODE,
            Packet::ReplayEnded => layout::REPLAY_ENDED,
            Packet::Unhandled { type_code } | Packet::Unknown { type_code } => *type_code,
        }
    }

    /// Registry name, or `None` for unknown codes.
    pub fn name(&self) -> Option<&'static str> {
        registry::packet_name(self.type_code())
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Packet::ReplayEnded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTime {
    pub latency_ticks: u32,
    pub game_time: u32,
    pub crc16: u16,
    pub wanted_latency: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureInfo {
    pub player: u8,
    pub struct_id: u32,
    pub struct_info_code: u8,
    /// Present only for the manufacture code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufactured_droid: Option<DroidSpec>,
}

/// Droid design carried by a manufacture order.
///
/// Component fields are dense indices into the matching stats dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroidSpec {
    pub name: String,
    pub id: u32,
    pub kind: i32,
    pub body: u8,
    pub brain: u8,
    pub propulsion: u8,
    pub repair_unit: u8,
    pub ecm: u8,
    pub sensor: u8,
    pub construct: u8,
    pub weapons: Vec<u32>,
}

impl DroidSpec {
    pub fn has_too_many_weapons(&self) -> bool {
        self.weapons.len() > layout::MAX_DROID_WEAPONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchStatus {
    pub player: u8,
    pub started: bool,
    pub building_id: u32,
    pub topic_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroidOrder {
    pub player: u8,
    pub command: DroidOrderCommand,
    /// Absolute droid ids, rebuilt from the transmitted deltas.
    pub droid_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DroidOrderCommand {
    /// `Obj` and `Loc` subtypes: a primary order with a target.
    Order(OrderDetails),
    /// `Sec` subtype: a secondary order change.
    Secondary { sec_order: u32, sec_state: u32 },
    /// Subtype outside the three legal values; only the id list follows.
    Unrecognized { subtype: u32 },
}

impl DroidOrderCommand {
    pub fn subtype(&self) -> u32 {
        match self {
            DroidOrderCommand::Order(details) => match details.target {
                OrderTarget::Object { .. } => layout::DROID_ORDER_SUBTYPE_OBJ,
                OrderTarget::Location { .. } => layout::DROID_ORDER_SUBTYPE_LOC,
            },
            DroidOrderCommand::Secondary { .. } => layout::DROID_ORDER_SUBTYPE_SEC,
            DroidOrderCommand::Unrecognized { subtype } => *subtype,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order: u32,
    pub target: OrderTarget,
    /// Build and line-build orders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildTarget>,
    /// Line-build orders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_end: Option<Coord>,
    /// Build-module orders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_index: Option<u32>,
    pub add: bool,
}

impl OrderDetails {
    pub fn order_name(&self) -> Option<&'static str> {
        registry::order_name(self.order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderTarget {
    Object { dest_id: u32, dest_type: u32 },
    Location(Coord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    /// Raw stat reference; see `stats::resolve_structure_ref`.
    pub struct_ref: u32,
    pub direction: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    pub gift_type: u8,
    pub from: u8,
    pub to: u8,
    pub droid_id: u32,
}

impl Gift {
    pub fn gift_name(&self) -> Option<&'static str> {
        registry::gift_name(self.gift_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LasSat {
    pub player: u8,
    pub weapon_id: u32,
    pub target_id: u32,
    pub target_player: u8,
}
