use std::fmt;

use serde::Serialize;

/// Stats dictionary a dense component or topic index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatCategory {
    Body,
    Brain,
    Propulsion,
    Repair,
    Ecm,
    Sensor,
    Construct,
    Research,
    Structure,
    Weapon,
}

impl StatCategory {
    pub const ALL: [StatCategory; 10] = [
        StatCategory::Body,
        StatCategory::Brain,
        StatCategory::Propulsion,
        StatCategory::Repair,
        StatCategory::Ecm,
        StatCategory::Sensor,
        StatCategory::Construct,
        StatCategory::Research,
        StatCategory::Structure,
        StatCategory::Weapon,
    ];

    /// File holding this dictionary inside a stats directory.
    pub fn file_name(self) -> &'static str {
        match self {
            StatCategory::Body => "body.json",
            StatCategory::Brain => "brain.json",
            StatCategory::Propulsion => "propulsion.json",
            StatCategory::Repair => "repair.json",
            StatCategory::Ecm => "ecm.json",
            StatCategory::Sensor => "sensor.json",
            StatCategory::Construct => "construction.json",
            StatCategory::Research => "research.json",
            StatCategory::Structure => "structure.json",
            StatCategory::Weapon => "weapons.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatCategory::Body => "body",
            StatCategory::Brain => "brain",
            StatCategory::Propulsion => "propulsion",
            StatCategory::Repair => "repair",
            StatCategory::Ecm => "ecm",
            StatCategory::Sensor => "sensor",
            StatCategory::Construct => "construct",
            StatCategory::Research => "research",
            StatCategory::Structure => "structure",
            StatCategory::Weapon => "weapon",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index-to-name resolution for stats dictionaries.
pub trait NameLookup {
    /// Display name at a dense index.
    fn lookup(&self, category: StatCategory, index: u32) -> Option<&str>;

    /// Stable stats id at a dense index.
    fn lookup_id(&self, category: StatCategory, index: u32) -> Option<&str>;

    /// Number of entries in a dictionary.
    fn entry_count(&self, category: StatCategory) -> usize;
}
