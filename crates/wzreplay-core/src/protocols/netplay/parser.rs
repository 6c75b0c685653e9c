use super::error::DecodeError;
use super::layout;
use super::model::{
    BuildTarget, DroidOrder, DroidOrderCommand, DroidSpec, GameTime, Gift, LasSat, OrderDetails,
    OrderTarget, Packet, ResearchStatus, StructureInfo,
};
use super::reader::PacketReader;
use super::registry;

/// Decoded packet plus the number of payload bytes the decoder left unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub packet: Packet,
    pub trailing_bytes: usize,
}

/// Decode one payload into a [`Packet`], discarding trailing-byte information.
pub fn decode(type_code: u8, payload: &[u8]) -> Result<Packet, DecodeError> {
    decode_packet(type_code, payload).map(|decoded| decoded.packet)
}

/// Decode one payload for `type_code`.
///
/// Codes outside the registry decode to `Packet::Unknown` and registered
/// codes without a structured layout decode to `Packet::Unhandled`; neither
/// consumes the payload. A payload that ends before the layout is complete
/// is an error.
///
/// # Examples
/// ```text
/// use wzreplay_core::protocols::netplay::{decode_packet, Packet};
///
/// let decoded = decode_packet(121, &[3]).unwrap();
/// assert_eq!(decoded.packet, Packet::PlayerLeft { player: 3 });
/// assert_eq!(decoded.trailing_bytes, 0);
/// ```
pub fn decode_packet(type_code: u8, payload: &[u8]) -> Result<Decoded, DecodeError> {
    if !registry::is_registered(type_code) {
        return Ok(Decoded {
            packet: Packet::Unknown { type_code },
            trailing_bytes: 0,
        });
    }

    let mut reader = PacketReader::new(type_code, payload);
    let packet = match type_code {
        layout::GAME_GAME_TIME => Packet::GameTime(parse_game_time(&mut reader)?),
        layout::GAME_STRUCTUREINFO => Packet::StructureInfo(parse_structure_info(&mut reader)?),
        layout::GAME_RESEARCHSTATUS => {
            Packet::ResearchStatus(parse_research_status(&mut reader)?)
        }
        layout::GAME_DROIDINFO => Packet::DroidOrder(parse_droid_order(&mut reader)?),
        layout::GAME_PLAYER_LEFT => Packet::PlayerLeft {
            player: reader.read_u8("player")?,
        },
        layout::GAME_GIFT => Packet::Gift(parse_gift(&mut reader)?),
        layout::GAME_LASSAT => Packet::LasSat(parse_lassat(&mut reader)?),
        layout::GAME_DEBUG_MODE => Packet::DebugMode {
            enable: reader.read_bool("enable")?,
        },
        layout::REPLAY_ENDED => Packet::ReplayEnded,
        _ => {
            return Ok(Decoded {
                packet: Packet::Unhandled { type_code },
                trailing_bytes: 0,
            });
        }
    };

    Ok(Decoded {
        packet,
        trailing_bytes: reader.remaining(),
    })
}

fn parse_game_time(reader: &mut PacketReader<'_>) -> Result<GameTime, DecodeError> {
    Ok(GameTime {
        latency_ticks: reader.read_u32("latency_ticks")?,
        game_time: reader.read_u32("game_time")?,
        crc16: reader.read_u16("crc16")?,
        wanted_latency: reader.read_u16("wanted_latency")?,
    })
}

fn parse_structure_info(reader: &mut PacketReader<'_>) -> Result<StructureInfo, DecodeError> {
    let player = reader.read_u8("player")?;
    let struct_id = reader.read_u32("struct_id")?;
    let struct_info_code = reader.read_u8("struct_info_code")?;
    let manufactured_droid = if struct_info_code == layout::STRUCTUREINFO_MANUFACTURE {
        Some(parse_droid_spec(reader)?)
    } else {
        None
    };
    Ok(StructureInfo {
        player,
        struct_id,
        struct_info_code,
        manufactured_droid,
    })
}

fn parse_droid_spec(reader: &mut PacketReader<'_>) -> Result<DroidSpec, DecodeError> {
    let name = reader.read_string("droid_name")?;
    let id = reader.read_u32("droid_id")?;
    let kind = reader.read_s32("droid_type")?;
    let body = reader.read_u8("body")?;
    let brain = reader.read_u8("brain")?;
    let propulsion = reader.read_u8("propulsion")?;
    let repair_unit = reader.read_u8("repair_unit")?;
    let ecm = reader.read_u8("ecm")?;
    let sensor = reader.read_u8("sensor")?;
    let construct = reader.read_u8("construct")?;
    let weapon_count = reader.read_u8("weapon_count")?;
    let mut weapons = Vec::with_capacity(usize::from(weapon_count));
    for _ in 0..weapon_count {
        weapons.push(reader.read_u32("weapon")?);
    }
    Ok(DroidSpec {
        name,
        id,
        kind,
        body,
        brain,
        propulsion,
        repair_unit,
        ecm,
        sensor,
        construct,
        weapons,
    })
}

fn parse_research_status(reader: &mut PacketReader<'_>) -> Result<ResearchStatus, DecodeError> {
    Ok(ResearchStatus {
        player: reader.read_u8("player")?,
        started: reader.read_bool("started")?,
        building_id: reader.read_u32("building_id")?,
        topic_id: reader.read_u32("topic_id")?,
    })
}

fn parse_droid_order(reader: &mut PacketReader<'_>) -> Result<DroidOrder, DecodeError> {
    let player = reader.read_u8("player")?;
    let subtype = reader.read_u32("subtype")?;
    let command = match subtype {
        layout::DROID_ORDER_SUBTYPE_OBJ | layout::DROID_ORDER_SUBTYPE_LOC => {
            DroidOrderCommand::Order(parse_order_details(reader, subtype)?)
        }
        layout::DROID_ORDER_SUBTYPE_SEC => DroidOrderCommand::Secondary {
            sec_order: reader.read_u32("sec_order")?,
            sec_state: reader.read_u32("sec_state")?,
        },
        other => DroidOrderCommand::Unrecognized { subtype: other },
    };
    let droid_ids = reader.read_delta_ids("droid_ids")?;
    Ok(DroidOrder {
        player,
        command,
        droid_ids,
    })
}

fn parse_order_details(
    reader: &mut PacketReader<'_>,
    subtype: u32,
) -> Result<OrderDetails, DecodeError> {
    let order = reader.read_u32("order")?;
    let target = if subtype == layout::DROID_ORDER_SUBTYPE_OBJ {
        OrderTarget::Object {
            dest_id: reader.read_u32("dest_id")?,
            dest_type: reader.read_u32("dest_type")?,
        }
    } else {
        OrderTarget::Location(reader.read_coord()?)
    };

    let build = if order == layout::DORDER_BUILD || order == layout::DORDER_LINEBUILD {
        Some(BuildTarget {
            struct_ref: reader.read_u32("struct_ref")?,
            direction: reader.read_u16("direction")?,
        })
    } else {
        None
    };
    let line_end = if order == layout::DORDER_LINEBUILD {
        Some(reader.read_coord()?)
    } else {
        None
    };
    let module_index = if order == layout::DORDER_BUILDMODULE {
        Some(reader.read_u32("module_index")?)
    } else {
        None
    };
    let add = reader.read_bool("add")?;

    Ok(OrderDetails {
        order,
        target,
        build,
        line_end,
        module_index,
        add,
    })
}

fn parse_gift(reader: &mut PacketReader<'_>) -> Result<Gift, DecodeError> {
    Ok(Gift {
        gift_type: reader.read_u8("gift_type")?,
        from: reader.read_u8("from")?,
        to: reader.read_u8("to")?,
        droid_id: reader.read_u32("droid_id")?,
    })
}

fn parse_lassat(reader: &mut PacketReader<'_>) -> Result<LasSat, DecodeError> {
    Ok(LasSat {
        player: reader.read_u8("player")?,
        weapon_id: reader.read_u32("weapon_id")?,
        target_id: reader.read_u32("target_id")?,
        target_player: reader.read_u8("target_player")?,
    })
}
