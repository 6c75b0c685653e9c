//! Tagged stat references.
//!
//! A reference packs a category tag in the high 16 bits and an index in the
//! low 16 bits. The index is the dense position in the category's stats
//! dictionary.

use serde::{Deserialize, Serialize};

use super::category::{NameLookup, StatCategory};

pub const STAT_BODY: u32 = 0x01_0000;
pub const STAT_BRAIN: u32 = 0x02_0000;
pub const STAT_PROPULSION: u32 = 0x04_0000;
pub const STAT_SENSOR: u32 = 0x05_0000;
pub const STAT_ECM: u32 = 0x06_0000;
pub const STAT_REPAIR: u32 = 0x08_0000;
pub const STAT_WEAPON: u32 = 0x0a_0000;
pub const STAT_RESEARCH: u32 = 0x0b_0000;
pub const STAT_TEMPLATE: u32 = 0x0c_0000;
pub const STAT_STRUCTURE: u32 = 0x0d_0000;
pub const STAT_FUNCTION: u32 = 0x0e_0000;
pub const STAT_CONSTRUCT: u32 = 0x0f_0000;
pub const STAT_FEATURE: u32 = 0x10_0000;
pub const STAT_MASK: u32 = 0xffff_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Body,
    Brain,
    Propulsion,
    Sensor,
    Ecm,
    Repair,
    Weapon,
    Research,
    Template,
    Structure,
    Function,
    Construct,
    Feature,
}

impl StatKind {
    /// Tag value in the high 16 bits.
    pub fn base(self) -> u32 {
        match self {
            StatKind::Body => STAT_BODY,
            StatKind::Brain => STAT_BRAIN,
            StatKind::Propulsion => STAT_PROPULSION,
            StatKind::Sensor => STAT_SENSOR,
            StatKind::Ecm => STAT_ECM,
            StatKind::Repair => STAT_REPAIR,
            StatKind::Weapon => STAT_WEAPON,
            StatKind::Research => STAT_RESEARCH,
            StatKind::Template => STAT_TEMPLATE,
            StatKind::Structure => STAT_STRUCTURE,
            StatKind::Function => STAT_FUNCTION,
            StatKind::Construct => STAT_CONSTRUCT,
            StatKind::Feature => STAT_FEATURE,
        }
    }

    /// Dictionary backing this kind, if one is loaded.
    pub fn category(self) -> Option<StatCategory> {
        match self {
            StatKind::Body => Some(StatCategory::Body),
            StatKind::Brain => Some(StatCategory::Brain),
            StatKind::Propulsion => Some(StatCategory::Propulsion),
            StatKind::Sensor => Some(StatCategory::Sensor),
            StatKind::Ecm => Some(StatCategory::Ecm),
            StatKind::Repair => Some(StatCategory::Repair),
            StatKind::Weapon => Some(StatCategory::Weapon),
            StatKind::Research => Some(StatCategory::Research),
            StatKind::Structure => Some(StatCategory::Structure),
            StatKind::Construct => Some(StatCategory::Construct),
            StatKind::Template | StatKind::Function | StatKind::Feature => None,
        }
    }

    fn from_tag(tag: u32) -> Option<Self> {
        let kind = match tag {
            STAT_BODY => StatKind::Body,
            STAT_BRAIN => StatKind::Brain,
            STAT_PROPULSION => StatKind::Propulsion,
            STAT_SENSOR => StatKind::Sensor,
            STAT_ECM => StatKind::Ecm,
            STAT_REPAIR => StatKind::Repair,
            STAT_WEAPON => StatKind::Weapon,
            STAT_RESEARCH => StatKind::Research,
            STAT_TEMPLATE => StatKind::Template,
            STAT_STRUCTURE => StatKind::Structure,
            STAT_FUNCTION => StatKind::Function,
            STAT_CONSTRUCT => StatKind::Construct,
            STAT_FEATURE => StatKind::Feature,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatRef {
    pub kind: StatKind,
    pub index: u32,
}

/// Split a raw reference into its kind and index.
///
/// # Examples
/// ```text
/// use wzreplay_core::stats::refs::{decode_stat_ref, StatKind};
///
/// let stat = decode_stat_ref(0x000d_0003).unwrap();
/// assert_eq!((stat.kind, stat.index), (StatKind::Structure, 3));
/// assert!(decode_stat_ref(0x0003_0000).is_none());
/// ```
pub fn decode_stat_ref(raw: u32) -> Option<StatRef> {
    let kind = StatKind::from_tag(raw & STAT_MASK)?;
    Some(StatRef {
        kind,
        index: raw - kind.base(),
    })
}

/// What a raw reference names in the structure dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructureRef {
    NotAStructure,
    /// Structure tag, index past the end of the dictionary.
    Unresolved { index: u32 },
    Named { index: u32, name: String },
}

impl StructureRef {
    pub fn label(&self) -> &str {
        match self {
            StructureRef::NotAStructure => "notastructure",
            StructureRef::Unresolved { .. } => "overflow",
            StructureRef::Named { name, .. } => name,
        }
    }
}

pub fn resolve_structure_ref<L: NameLookup + ?Sized>(lookup: &L, raw: u32) -> StructureRef {
    match decode_stat_ref(raw) {
        Some(StatRef {
            kind: StatKind::Structure,
            index,
        }) => match lookup.lookup(StatCategory::Structure, index) {
            Some(name) => StructureRef::Named {
                index,
                name: name.to_string(),
            },
            None => StructureRef::Unresolved { index },
        },
        _ => StructureRef::NotAStructure,
    }
}
