// Session-control messages. Not synchronised with game time.
pub const NET_MIN_TYPE: u8 = 33;
pub const NET_PING: u8 = 34;
pub const NET_PLAYER_STATS: u8 = 35;
pub const NET_TEXTMSG: u8 = 36;
pub const NET_PLAYERRESPONDING: u8 = 37;
pub const NET_OPTIONS: u8 = 38;
pub const NET_KICK: u8 = 39;
pub const NET_FIREUP: u8 = 40;
pub const NET_COLOURREQUEST: u8 = 41;
pub const NET_FACTIONREQUEST: u8 = 42;
pub const NET_AITEXTMSG: u8 = 43;
pub const NET_BEACONMSG: u8 = 44;
pub const NET_TEAMREQUEST: u8 = 45;
pub const NET_JOIN: u8 = 46;
pub const NET_ACCEPTED: u8 = 47;
pub const NET_PLAYER_INFO: u8 = 48;
pub const NET_PLAYER_JOINED: u8 = 49;
pub const NET_PLAYER_LEAVING: u8 = 50;
pub const NET_PLAYER_DROPPED: u8 = 51;
pub const NET_GAME_FLAGS: u8 = 52;
pub const NET_READY_REQUEST: u8 = 53;
pub const NET_REJECTED: u8 = 54;
pub const NET_POSITIONREQUEST: u8 = 55;
pub const NET_DATA_CHECK: u8 = 56;
pub const NET_HOST_DROPPED: u8 = 57;
pub const NET_SEND_TO_PLAYER: u8 = 58;
pub const NET_SHARE_GAME_QUEUE: u8 = 59;
pub const NET_FILE_REQUESTED: u8 = 60;
pub const NET_FILE_CANCELLED: u8 = 61;
pub const NET_FILE_PAYLOAD: u8 = 62;
pub const NET_DEBUG_SYNC: u8 = 63;
pub const NET_VOTE: u8 = 64;
pub const NET_VOTE_REQUEST: u8 = 65;
pub const NET_SPECTEXTMSG: u8 = 66;
pub const NET_PLAYERNAME_CHANGEREQUEST: u8 = 67;
pub const NET_PLAYER_SLOTTYPE_REQUEST: u8 = 68;
pub const NET_PLAYER_SWAP_INDEX: u8 = 69;
pub const NET_PLAYER_SWAP_INDEX_ACK: u8 = 70;
pub const NET_DATA_CHECK2: u8 = 71;
pub const NET_MAX_TYPE: u8 = 72;

// Game-state messages. Applied by every client at the same game time.
pub const GAME_MIN_TYPE: u8 = 111;
pub const GAME_DROIDINFO: u8 = 112;
pub const GAME_STRUCTUREINFO: u8 = 113;
pub const GAME_RESEARCHSTATUS: u8 = 114;
pub const GAME_TEMPLATE: u8 = 115;
pub const GAME_TEMPLATEDEST: u8 = 116;
pub const GAME_ALLIANCE: u8 = 117;
pub const GAME_GIFT: u8 = 118;
pub const GAME_LASSAT: u8 = 119;
pub const GAME_GAME_TIME: u8 = 120;
pub const GAME_PLAYER_LEFT: u8 = 121;
pub const GAME_DROIDDISEMBARK: u8 = 122;
pub const GAME_SYNC_REQUEST: u8 = 123;
pub const GAME_DEBUG_MODE: u8 = 124;
pub const GAME_DEBUG_ADD_DROID: u8 = 125;
pub const GAME_DEBUG_ADD_STRUCTURE: u8 = 126;
pub const GAME_DEBUG_ADD_FEATURE: u8 = 127;
pub const GAME_DEBUG_REMOVE_DROID: u8 = 128;
pub const GAME_DEBUG_REMOVE_STRUCTURE: u8 = 129;
pub const GAME_DEBUG_REMOVE_FEATURE: u8 = 130;
pub const GAME_DEBUG_FINISH_RESEARCH: u8 = 131;
pub const GAME_MAX_TYPE: u8 = 132;

/// Marks the end of a recorded message stream.
pub const REPLAY_ENDED: u8 = 133;

pub const NET_RANGE: std::ops::RangeInclusive<u8> = NET_MIN_TYPE..=NET_MAX_TYPE;
pub const GAME_RANGE: std::ops::RangeInclusive<u8> = GAME_MIN_TYPE..=GAME_MAX_TYPE;

// Droid order subtypes.
pub const DROID_ORDER_SUBTYPE_OBJ: u32 = 0;
pub const DROID_ORDER_SUBTYPE_LOC: u32 = 1;
pub const DROID_ORDER_SUBTYPE_SEC: u32 = 2;

// Primary droid orders that change the packet layout.
pub const DORDER_BUILD: u32 = 4;
pub const DORDER_LINEBUILD: u32 = 6;
pub const DORDER_BUILDMODULE: u32 = 20;

pub const DORDER_NAMES: [(u32, &str); 38] = [
    (0, "DORDER_NONE"),
    (1, "DORDER_STOP"),
    (2, "DORDER_MOVE"),
    (3, "DORDER_ATTACK"),
    (4, "DORDER_BUILD"),
    (5, "DORDER_HELPBUILD"),
    (6, "DORDER_LINEBUILD"),
    (7, "DORDER_DEMOLISH"),
    (8, "DORDER_REPAIR"),
    (9, "DORDER_OBSERVE"),
    (10, "DORDER_FIRESUPPORT"),
    (11, "DORDER_UNUSED_4"),
    (12, "DORDER_UNUSED_2"),
    (13, "DORDER_RTB"),
    (14, "DORDER_RTR"),
    (15, "DORDER_UNUSED_5"),
    (16, "DORDER_EMBARK"),
    (17, "DORDER_DISEMBARK"),
    (18, "DORDER_ATTACKTARGET"),
    (19, "DORDER_COMMANDERSUPPORT"),
    (20, "DORDER_BUILDMODULE"),
    (21, "DORDER_RECYCLE"),
    (22, "DORDER_TRANSPORTOUT"),
    (23, "DORDER_TRANSPORTIN"),
    (24, "DORDER_TRANSPORTRETURN"),
    (25, "DORDER_GUARD"),
    (26, "DORDER_DROIDREPAIR"),
    (27, "DORDER_RESTORE"),
    (28, "DORDER_SCOUT"),
    (29, "DORDER_UNUSED_3"),
    (30, "DORDER_UNUSED"),
    (31, "DORDER_PATROL"),
    (32, "DORDER_REARM"),
    (33, "DORDER_RECOVER"),
    (34, "DORDER_UNUSED_6"),
    (35, "DORDER_RTR_SPECIFIED"),
    (40, "DORDER_CIRCLE"),
    (41, "DORDER_HOLD"),
];

pub const SECONDARY_ORDER_NAMES: [&str; 15] = [
    "DSO_UNUSED",
    "DSO_ATTACK_RANGE",
    "DSO_REPAIR_LEVEL",
    "DSO_ATTACK_LEVEL",
    "DSO_ASSIGN_PRODUCTION",
    "DSO_ASSIGN_CYBORG_PRODUCTION",
    "DSO_CLEAR_PRODUCTION",
    "DSO_RECYCLE",
    "DSO_PATROL",
    "DSO_HALTTYPE",
    "DSO_RETURN_TO_LOC",
    "DSO_FIRE_DESIGNATOR",
    "DSO_ASSIGN_VTOL_PRODUCTION",
    "DSO_CIRCLE",
    "DSO_ACCEPT_RETREP",
];

pub const SECONDARY_STATE_NAMES: [(u32, &str); 24] = [
    (0x000000, "DSS_NONE"),
    (0x000001, "DSS_ARANGE_SHORT"),
    (0x000002, "DSS_ARANGE_LONG"),
    (0x000003, "DSS_ARANGE_OPTIMUM"),
    (0x000004, "DSS_REPLEV_LOW"),
    (0x000008, "DSS_REPLEV_HIGH"),
    (0x00000c, "DSS_REPLEV_NEVER"),
    (0x000010, "DSS_ALEV_ALWAYS"),
    (0x000020, "DSS_ALEV_ATTACKED"),
    (0x000030, "DSS_ALEV_NEVER"),
    (0x000040, "DSS_HALT_HOLD"),
    (0x000080, "DSS_HALT_GUARD"),
    (0x0000c0, "DSS_HALT_PURSUE"),
    (0x000100, "DSS_RECYCLE_SET"),
    (0x000200, "DSS_ASSPROD_START"),
    (0x000400, "DSS_ACCREP_SET"),
    (0x002000, "DSS_ASSPROD_MID"),
    (0x040000, "DSS_ASSPROD_END"),
    (0x080000, "DSS_RTL_REPAIR"),
    (0x100000, "DSS_RTL_BASE"),
    (0x200000, "DSS_RTL_TRANSPORT"),
    (0x400000, "DSS_PATROL_SET"),
    (0x400100, "DSS_CIRCLE_SET"),
    (0x800000, "DSS_FIREDES_SET"),
];

// Structure-info codes.
pub const STRUCTUREINFO_MANUFACTURE: u8 = 0;
pub const STRUCTUREINFO_CANCELPRODUCTION: u8 = 1;
pub const STRUCTUREINFO_HOLDPRODUCTION: u8 = 2;
pub const STRUCTUREINFO_RELEASEPRODUCTION: u8 = 3;
pub const STRUCTUREINFO_HOLDRESEARCH: u8 = 4;
pub const STRUCTUREINFO_RELEASERESEARCH: u8 = 5;

// Gift types.
pub const GIFT_RADAR: u8 = 0;
pub const GIFT_DROID: u8 = 1;
pub const GIFT_RESEARCH: u8 = 2;
pub const GIFT_POWER: u8 = 3;
pub const GIFT_STRUCTURE: u8 = 4;
pub const GIFT_AUTOGAME: u8 = 5;

/// Weapon turrets a legal droid design can carry.
pub const MAX_DROID_WEAPONS: usize = 2;
