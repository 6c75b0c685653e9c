/// File signature, the ASCII bytes `WZrp`.
pub const MAGIC: [u8; 4] = *b"WZrp";
pub const MAGIC_LEN: usize = MAGIC.len();

/// `replayFormatVer` this decoder understands.
pub const HEADER_FORMAT_VERSION: i64 = 2;
pub const EMBEDDED_MAP_VERSION: u32 = 1;

/// Width of the fixed big-endian length and version fields in the container.
pub const FIXED_FIELD_LEN: usize = 4;

/// Conventional file extension for replays.
pub const REPLAY_EXTENSION: &str = "wzrp";
