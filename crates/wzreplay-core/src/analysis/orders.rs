use crate::protocols::netplay::model::{DroidOrder, DroidOrderCommand, Gift, StructureInfo};
use crate::protocols::netplay::registry;
use crate::stats::{NameLookup, resolve_structure_ref};
use crate::{BuildOrder, DroidOrderEvent, GiftEvent, SecondaryOrder, StructureOrderEvent};

fn name_or_raw(name: Option<&'static str>, raw: impl std::fmt::Display) -> String {
    name.map_or_else(|| format!("UNKNOWN({raw})"), str::to_string)
}

/// Flatten a droid command into a report entry.
///
/// Build targets are resolved against the structure dictionary when stats
/// are loaded.
pub(crate) fn droid_order_event(
    sender: u8,
    game_time: u32,
    order: &DroidOrder,
    lookup: Option<&dyn NameLookup>,
) -> DroidOrderEvent {
    let subtype = order.command.subtype();
    let mut event = DroidOrderEvent {
        game_time,
        player: sender,
        subtype: name_or_raw(registry::droid_order_subtype_name(subtype), subtype),
        order: None,
        target: None,
        build: None,
        line_end: None,
        module_index: None,
        add: None,
        secondary: None,
        droid_ids: order.droid_ids.clone(),
    };

    match &order.command {
        DroidOrderCommand::Order(details) => {
            event.order = Some(name_or_raw(details.order_name(), details.order));
            event.target = Some(details.target);
            event.build = details.build.map(|build| BuildOrder {
                struct_ref: build.struct_ref,
                direction: build.direction,
                structure: lookup.map(|lookup| resolve_structure_ref(lookup, build.struct_ref)),
            });
            event.line_end = details.line_end;
            event.module_index = details.module_index;
            event.add = Some(details.add);
        }
        DroidOrderCommand::Secondary {
            sec_order,
            sec_state,
        } => {
            event.secondary = Some(SecondaryOrder {
                order: name_or_raw(registry::secondary_order_name(*sec_order), sec_order),
                state: name_or_raw(registry::secondary_state_name(*sec_state), sec_state),
            });
        }
        DroidOrderCommand::Unrecognized { .. } => {}
    }
    event
}

pub(crate) fn structure_order_event(
    sender: u8,
    game_time: u32,
    info: &StructureInfo,
) -> StructureOrderEvent {
    StructureOrderEvent {
        game_time,
        player: sender,
        struct_id: info.struct_id,
        code: info.struct_info_code,
        name: name_or_raw(
            registry::structure_info_name(info.struct_info_code),
            info.struct_info_code,
        ),
        droid_name: info.manufactured_droid.as_ref().map(|droid| droid.name.clone()),
    }
}

pub(crate) fn gift_event(sender: u8, game_time: u32, gift: &Gift) -> GiftEvent {
    GiftEvent {
        game_time,
        player: sender,
        gift: name_or_raw(gift.gift_name(), gift.gift_type),
        from: gift.from,
        to: gift.to,
        droid_id: gift.droid_id,
    }
}
