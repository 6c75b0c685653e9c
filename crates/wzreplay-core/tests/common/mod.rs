//! Test-only replay encoder.
//!
//! Builds `.wzrp` byte streams in memory so tests do not depend on recorded
//! fixtures.

#![allow(dead_code)]

const THRESHOLDS: [u32; 4] = [78, 95, 32, 70];

pub const REPLAY_ENDED: u8 = 133;
pub const GAME_DROIDINFO: u8 = 112;
pub const GAME_STRUCTUREINFO: u8 = 113;
pub const GAME_RESEARCHSTATUS: u8 = 114;
pub const GAME_GAME_TIME: u8 = 120;
pub const GAME_PLAYER_LEFT: u8 = 121;
pub const NET_PING: u8 = 34;

pub fn varint(mut value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    for threshold in THRESHOLDS {
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

/// Inverse of the protocol's signed mapping, for values it can produce.
pub fn signed(value: i32) -> Vec<u8> {
    let raw = if value > 0 {
        (value as u32) * 2
    } else {
        (1 - value) as u32 * 2 + 1
    };
    varint(raw)
}

pub fn string(text: &str) -> Vec<u8> {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut out = varint(units.len() as u32);
    for unit in units {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

pub fn game_time(game_time: u32) -> Vec<u8> {
    let mut payload = varint(1);
    payload.extend(varint(game_time));
    payload.extend_from_slice(&[0x12, 0x34, 0x00, 0x02]);
    payload
}

pub fn research(player: u8, started: bool, building_id: u32, topic_id: u32) -> Vec<u8> {
    let mut payload = vec![player, u8::from(started)];
    payload.extend(varint(building_id));
    payload.extend(varint(topic_id));
    payload
}

pub struct DroidDesign<'a> {
    pub name: &'a str,
    pub body: u8,
    pub propulsion: u8,
    pub repair_unit: u8,
    pub weapons: &'a [u32],
}

pub fn manufacture(player: u8, struct_id: u32, droid: &DroidDesign<'_>) -> Vec<u8> {
    let mut payload = vec![player];
    payload.extend(varint(struct_id));
    payload.push(0);
    payload.extend(string(droid.name));
    payload.extend(varint(1000 + struct_id));
    payload.extend(varint(0));
    payload.extend_from_slice(&[droid.body, 0, droid.propulsion, droid.repair_unit, 0, 0, 0]);
    payload.push(droid.weapons.len() as u8);
    for weapon in droid.weapons {
        payload.extend(varint(*weapon));
    }
    payload
}

/// Move order to a location for the given absolute droid ids.
pub fn move_order(player: u8, x: i32, y: i32, droid_ids: &[u32]) -> Vec<u8> {
    let mut payload = vec![player];
    payload.extend(varint(1));
    payload.extend(varint(2));
    payload.extend(signed(x));
    payload.extend(signed(y));
    payload.push(0);
    payload.extend(varint(droid_ids.len() as u32));
    let mut previous = 0;
    for id in droid_ids {
        payload.extend(varint(id - previous));
        previous = *id;
    }
    payload
}

/// Build order at a location for a structure stat reference.
pub fn build_order(player: u8, x: i32, y: i32, struct_ref: u32, droid_ids: &[u32]) -> Vec<u8> {
    let mut payload = vec![player];
    payload.extend(varint(1));
    payload.extend(varint(4));
    payload.extend(signed(x));
    payload.extend(signed(y));
    payload.extend(varint(struct_ref));
    payload.extend_from_slice(&180u16.to_be_bytes());
    payload.push(0);
    payload.extend(varint(droid_ids.len() as u32));
    let mut previous = 0;
    for id in droid_ids {
        payload.extend(varint(id - previous));
        previous = *id;
    }
    payload
}

pub fn header_json(format_version: i64) -> String {
    format!(
        r#"{{
            "gameOptions": {{
                "game": {{"map": "Sk-Rush", "hash": "0123abcd", "maxPlayers": 2}},
                "multistats": [{{"identity": "AA=="}}, {{"identity": ""}}],
                "netplay.bComms": true,
                "netplay.players": [
                    {{"name": "alpha", "allocated": true, "position": 0, "team": 0}},
                    {{"name": "beta", "allocated": true, "position": 1, "team": 1}}
                ],
                "versionString": "4.4.2"
            }},
            "major": 4,
            "minor": 1,
            "replayFormatVer": {format_version}
        }}"#
    )
}

pub struct ReplayBuilder {
    header: String,
    map_version: u32,
    map: Vec<u8>,
    messages: Vec<u8>,
    message_offsets: Vec<usize>,
    end_chunk: String,
    footer: u32,
}

impl ReplayBuilder {
    pub fn new() -> Self {
        Self {
            header: header_json(2),
            map_version: 1,
            map: Vec::new(),
            messages: Vec::new(),
            message_offsets: Vec::new(),
            end_chunk: r#"{"gameTimeElapsed": 65000}"#.to_string(),
            footer: 0x0102_0304,
        }
    }

    pub fn header(mut self, json: String) -> Self {
        self.header = json;
        self
    }

    pub fn map_version(mut self, version: u32) -> Self {
        self.map_version = version;
        self
    }

    pub fn embedded_map(mut self, map: &[u8]) -> Self {
        self.map = map.to_vec();
        self
    }

    pub fn message(mut self, sender: u8, type_code: u8, payload: &[u8]) -> Self {
        self.message_offsets.push(self.messages.len());
        self.messages.push(sender);
        self.messages.push(type_code);
        self.messages.extend(varint(payload.len() as u32));
        self.messages.extend_from_slice(payload);
        self
    }

    pub fn end_chunk(mut self, json: &str) -> Self {
        self.end_chunk = json.to_string();
        self
    }

    /// Bytes up to the start of message `index`, as if recording stopped
    /// there.
    pub fn truncated_before(&self, index: usize) -> Vec<u8> {
        let mut out = self.prefix();
        out.extend_from_slice(&self.messages[..self.message_offsets[index]]);
        out
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.prefix();
        out.extend_from_slice(&self.messages);
        out.push(0);
        out.push(REPLAY_ENDED);
        out.extend(varint(0));
        out.extend_from_slice(&(self.end_chunk.len() as u32).to_be_bytes());
        out.extend_from_slice(self.end_chunk.as_bytes());
        out.extend_from_slice(&self.footer.to_be_bytes());
        out
    }

    fn prefix(&self) -> Vec<u8> {
        let mut out = b"WZrp".to_vec();
        out.extend_from_slice(&(self.header.len() as u32).to_be_bytes());
        out.extend_from_slice(self.header.as_bytes());
        out.extend_from_slice(&self.map_version.to_be_bytes());
        out.extend_from_slice(&(self.map.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.map);
        out
    }
}
