use serde::{Deserialize, Serialize};

use super::layout::*;

/// Which region of the type-code space a registered code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketClass {
    /// Session-control traffic, not tied to game time.
    Net,
    /// Synchronised game traffic, applied at the same game time everywhere.
    Game,
    /// End-of-recording marker.
    Sentinel,
}

/// Human-readable name of a registered type code.
///
/// Returns `None` for codes outside the NET range, the GAME range and the
/// sentinel; those are surfaced as unknown packets, never as errors.
pub fn packet_name(type_code: u8) -> Option<&'static str> {
    let name = match type_code {
        NET_MIN_TYPE => "NET_MIN_TYPE",
        NET_PING => "NET_PING",
        NET_PLAYER_STATS => "NET_PLAYER_STATS",
        NET_TEXTMSG => "NET_TEXTMSG",
        NET_PLAYERRESPONDING => "NET_PLAYERRESPONDING",
        NET_OPTIONS => "NET_OPTIONS",
        NET_KICK => "NET_KICK",
        NET_FIREUP => "NET_FIREUP",
        NET_COLOURREQUEST => "NET_COLOURREQUEST",
        NET_FACTIONREQUEST => "NET_FACTIONREQUEST",
        NET_AITEXTMSG => "NET_AITEXTMSG",
        NET_BEACONMSG => "NET_BEACONMSG",
        NET_TEAMREQUEST => "NET_TEAMREQUEST",
        NET_JOIN => "NET_JOIN",
        NET_ACCEPTED => "NET_ACCEPTED",
        NET_PLAYER_INFO => "NET_PLAYER_INFO",
        NET_PLAYER_JOINED => "NET_PLAYER_JOINED",
        NET_PLAYER_LEAVING => "NET_PLAYER_LEAVING",
        NET_PLAYER_DROPPED => "NET_PLAYER_DROPPED",
        NET_GAME_FLAGS => "NET_GAME_FLAGS",
        NET_READY_REQUEST => "NET_READY_REQUEST",
        NET_REJECTED => "NET_REJECTED",
        NET_POSITIONREQUEST => "NET_POSITIONREQUEST",
        NET_DATA_CHECK => "NET_DATA_CHECK",
        NET_HOST_DROPPED => "NET_HOST_DROPPED",
        NET_SEND_TO_PLAYER => "NET_SEND_TO_PLAYER",
        NET_SHARE_GAME_QUEUE => "NET_SHARE_GAME_QUEUE",
        NET_FILE_REQUESTED => "NET_FILE_REQUESTED",
        NET_FILE_CANCELLED => "NET_FILE_CANCELLED",
        NET_FILE_PAYLOAD => "NET_FILE_PAYLOAD",
        NET_DEBUG_SYNC => "NET_DEBUG_SYNC",
        NET_VOTE => "NET_VOTE",
        NET_VOTE_REQUEST => "NET_VOTE_REQUEST",
        NET_SPECTEXTMSG => "NET_SPECTEXTMSG",
        NET_PLAYERNAME_CHANGEREQUEST => "NET_PLAYERNAME_CHANGEREQUEST",
        NET_PLAYER_SLOTTYPE_REQUEST => "NET_PLAYER_SLOTTYPE_REQUEST",
        NET_PLAYER_SWAP_INDEX => "NET_PLAYER_SWAP_INDEX",
        NET_PLAYER_SWAP_INDEX_ACK => "NET_PLAYER_SWAP_INDEX_ACK",
        NET_DATA_CHECK2 => "NET_DATA_CHECK2",
        NET_MAX_TYPE => "NET_MAX_TYPE",
        GAME_MIN_TYPE => "GAME_MIN_TYPE",
        GAME_DROIDINFO => "GAME_DROIDINFO",
        GAME_STRUCTUREINFO => "GAME_STRUCTUREINFO",
        GAME_RESEARCHSTATUS => "GAME_RESEARCHSTATUS",
        GAME_TEMPLATE => "GAME_TEMPLATE",
        GAME_TEMPLATEDEST => "GAME_TEMPLATEDEST",
        GAME_ALLIANCE => "GAME_ALLIANCE",
        GAME_GIFT => "GAME_GIFT",
        GAME_LASSAT => "GAME_LASSAT",
        GAME_GAME_TIME => "GAME_GAME_TIME",
        GAME_PLAYER_LEFT => "GAME_PLAYER_LEFT",
        GAME_DROIDDISEMBARK => "GAME_DROIDDISEMBARK",
        GAME_SYNC_REQUEST => "GAME_SYNC_REQUEST",
        GAME_DEBUG_MODE => "GAME_DEBUG_MODE",
        GAME_DEBUG_ADD_DROID => "GAME_DEBUG_ADD_DROID",
        GAME_DEBUG_ADD_STRUCTURE => "GAME_DEBUG_ADD_STRUCTURE",
        GAME_DEBUG_ADD_FEATURE => "GAME_DEBUG_ADD_FEATURE",
        GAME_DEBUG_REMOVE_DROID => "GAME_DEBUG_REMOVE_DROID",
        GAME_DEBUG_REMOVE_STRUCTURE => "GAME_DEBUG_REMOVE_STRUCTURE",
        GAME_DEBUG_REMOVE_FEATURE => "GAME_DEBUG_REMOVE_FEATURE",
        GAME_DEBUG_FINISH_RESEARCH => "GAME_DEBUG_FINISH_RESEARCH",
        GAME_MAX_TYPE => "GAME_MAX_TYPE",
        REPLAY_ENDED => "REPLAY_ENDED",
        _ => return None,
    };
    Some(name)
}

pub fn classify(type_code: u8) -> Option<PacketClass> {
    if NET_RANGE.contains(&type_code) {
        Some(PacketClass::Net)
    } else if GAME_RANGE.contains(&type_code) {
        Some(PacketClass::Game)
    } else if type_code == REPLAY_ENDED {
        Some(PacketClass::Sentinel)
    } else {
        None
    }
}

pub fn is_registered(type_code: u8) -> bool {
    classify(type_code).is_some()
}

pub fn droid_order_subtype_name(subtype: u32) -> Option<&'static str> {
    let name = match subtype {
        DROID_ORDER_SUBTYPE_OBJ => "OBJ",
        DROID_ORDER_SUBTYPE_LOC => "LOC",
        DROID_ORDER_SUBTYPE_SEC => "SEC",
        _ => return None,
    };
    Some(name)
}

pub fn order_name(order: u32) -> Option<&'static str> {
    DORDER_NAMES
        .iter()
        .find(|(code, _)| *code == order)
        .map(|(_, name)| *name)
}

pub fn secondary_order_name(order: u32) -> Option<&'static str> {
    SECONDARY_ORDER_NAMES.get(order as usize).copied()
}

pub fn secondary_state_name(state: u32) -> Option<&'static str> {
    SECONDARY_STATE_NAMES
        .iter()
        .find(|(code, _)| *code == state)
        .map(|(_, name)| *name)
}

pub fn gift_name(gift_type: u8) -> Option<&'static str> {
    let name = match gift_type {
        GIFT_RADAR => "GIFT_RADAR",
        GIFT_DROID => "GIFT_DROID",
        GIFT_RESEARCH => "GIFT_RESEARCH",
        GIFT_POWER => "GIFT_POWER",
        GIFT_STRUCTURE => "GIFT_STRUCTURE",
        GIFT_AUTOGAME => "GIFT_AUTOGAME",
        _ => return None,
    };
    Some(name)
}

pub fn structure_info_name(code: u8) -> Option<&'static str> {
    let name = match code {
        STRUCTUREINFO_MANUFACTURE => "STRUCTUREINFO_MANUFACTURE",
        STRUCTUREINFO_CANCELPRODUCTION => "STRUCTUREINFO_CANCELPRODUCTION",
        STRUCTUREINFO_HOLDPRODUCTION => "STRUCTUREINFO_HOLDPRODUCTION",
        STRUCTUREINFO_RELEASEPRODUCTION => "STRUCTUREINFO_RELEASEPRODUCTION",
        STRUCTUREINFO_HOLDRESEARCH => "STRUCTUREINFO_HOLDRESEARCH",
        STRUCTUREINFO_RELEASERESEARCH => "STRUCTUREINFO_RELEASERESEARCH",
        _ => return None,
    };
    Some(name)
}
