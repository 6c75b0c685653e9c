use std::collections::BTreeMap;

use crate::protocols::netplay::layout::MAX_DROID_WEAPONS;
use crate::protocols::netplay::model::DroidSpec;
use crate::source::replay::ReplaySettings;
use crate::stats::{NameLookup, StatCategory};
use crate::{AutoRepairSummary, ComponentRef, DroidSummary, DroidViolation};

use super::players::player_name;
use super::time::format_game_time;

pub const VIOLATION_TURRETS: &str = "WZ-DROID-TURRETS";
pub const VIOLATION_BABA: &str = "WZ-DROID-BABA";
pub const VIOLATION_CYBORG_BODY: &str = "WZ-DROID-CYBORG-BODY";

const BABA_PROPULSIONS: [&str; 2] = ["BaBaLegs", "BaBaProp"];
const CYBORG_PROPULSION: &str = "CyborgLegs";
const CYBORG_BODIES: [&str; 2] = ["CyborgHeavyBody", "CyborgLightBody"];
const AUTO_REPAIR_ID: &str = "AutoRepair";

#[derive(Debug, Default)]
pub(crate) struct DroidStats {
    pub violations: Vec<DroidViolation>,
    /// First game time each sender produced an auto-repair design.
    pub auto_repair: BTreeMap<u8, u32>,
}

pub(crate) fn add_manufactured_droid(
    stats: &mut DroidStats,
    sender: u8,
    game_time: u32,
    spec: &DroidSpec,
    lookup: Option<&dyn NameLookup>,
) {
    let droid = describe_droid(spec, lookup);
    if droid.repair_unit.id.as_deref() == Some(AUTO_REPAIR_ID) {
        stats.auto_repair.entry(sender).or_insert(game_time);
    }
    for (id, message) in check_droid(&droid) {
        stats.violations.push(DroidViolation {
            id: id.to_string(),
            message,
            player: sender,
            game_time,
            droid: droid.clone(),
        });
    }
}

pub(crate) fn build_auto_repair_summaries(
    auto_repair: BTreeMap<u8, u32>,
    settings: &ReplaySettings,
) -> Vec<AutoRepairSummary> {
    auto_repair
        .into_iter()
        .map(|(player, first_game_time)| AutoRepairSummary {
            player,
            name: player_name(settings, player),
            first_game_time,
            first_game_time_text: format_game_time(first_game_time),
        })
        .collect()
}

/// Resolve component indices to stats ids where a dictionary is available.
pub(crate) fn describe_droid(spec: &DroidSpec, lookup: Option<&dyn NameLookup>) -> DroidSummary {
    let component = |category: StatCategory, index: u32| ComponentRef {
        index,
        id: lookup
            .and_then(|lookup| lookup.lookup_id(category, index))
            .map(str::to_string),
    };
    DroidSummary {
        name: spec.name.clone(),
        droid_id: spec.id,
        kind: spec.kind,
        body: component(StatCategory::Body, u32::from(spec.body)),
        brain: component(StatCategory::Brain, u32::from(spec.brain)),
        propulsion: component(StatCategory::Propulsion, u32::from(spec.propulsion)),
        repair_unit: component(StatCategory::Repair, u32::from(spec.repair_unit)),
        ecm: component(StatCategory::Ecm, u32::from(spec.ecm)),
        sensor: component(StatCategory::Sensor, u32::from(spec.sensor)),
        construct: component(StatCategory::Construct, u32::from(spec.construct)),
        weapons: spec
            .weapons
            .iter()
            .map(|weapon| component(StatCategory::Weapon, *weapon))
            .collect(),
    }
}

/// Composition rules a legal design must satisfy.
///
/// The propulsion rules need resolved ids and are skipped without stats.
pub(crate) fn check_droid(droid: &DroidSummary) -> Vec<(&'static str, String)> {
    let mut found = Vec::new();
    if droid.weapons.len() > MAX_DROID_WEAPONS {
        found.push((
            VIOLATION_TURRETS,
            format!(
                "droid has {} weapon turrets, at most {MAX_DROID_WEAPONS} allowed",
                droid.weapons.len()
            ),
        ));
    }

    let propulsion = droid.propulsion.id.as_deref();
    let body = droid.body.id.as_deref();
    if let Some(propulsion) = propulsion {
        if BABA_PROPULSIONS.contains(&propulsion) {
            found.push((VIOLATION_BABA, format!("scavenger propulsion {propulsion}")));
        } else if propulsion == CYBORG_PROPULSION
            && !body.is_some_and(|body| CYBORG_BODIES.contains(&body))
        {
            found.push((
                VIOLATION_CYBORG_BODY,
                format!("cyborg legs on body {}", body.unwrap_or("unknown")),
            ));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::{
        DroidStats, VIOLATION_BABA, VIOLATION_CYBORG_BODY, VIOLATION_TURRETS,
        add_manufactured_droid, build_auto_repair_summaries, check_droid, describe_droid,
    };
    use crate::protocols::netplay::model::DroidSpec;
    use crate::source::replay::ReplaySettings;
    use crate::stats::{NameLookup, StatCategory, StatsCatalog};

    fn catalog() -> StatsCatalog {
        StatsCatalog::default()
            .with_table_json(
                StatCategory::Body,
                r#"{"Body1REC": {"id": "Body1REC", "name": "Viper"},
                    "CyborgLightBody": {"id": "CyborgLightBody", "name": "Cyborg Light"}}"#,
            )
            .unwrap()
            .with_table_json(
                StatCategory::Propulsion,
                r#"{"BaBaProp": {"id": "BaBaProp", "name": "Fan"},
                    "CyborgLegs": {"id": "CyborgLegs", "name": "Legs"},
                    "wheeled01": {"id": "wheeled01", "name": "Wheels"}}"#,
            )
            .unwrap()
            .with_table_json(
                StatCategory::Repair,
                r#"{"AutoRepair": {"id": "AutoRepair", "name": "Auto-Repair"},
                    "ZNULLREPAIR": {"id": "ZNULLREPAIR", "name": "None"}}"#,
            )
            .unwrap()
    }

    fn spec(body: u8, propulsion: u8, repair_unit: u8, weapons: Vec<u32>) -> DroidSpec {
        DroidSpec {
            name: "Test".to_string(),
            id: 1,
            kind: 0,
            body,
            brain: 0,
            propulsion,
            repair_unit,
            ecm: 0,
            sensor: 0,
            construct: 0,
            weapons,
        }
    }

    fn ids(spec: &DroidSpec, catalog: &StatsCatalog) -> Vec<&'static str> {
        let lookup: &dyn NameLookup = catalog;
        check_droid(&describe_droid(spec, Some(lookup)))
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn legal_design_passes() {
        assert!(ids(&spec(0, 2, 1, vec![0]), &catalog()).is_empty());
    }

    #[test]
    fn too_many_turrets_without_stats() {
        let droid = describe_droid(&spec(0, 0, 0, vec![1, 2, 3]), None);
        let found = check_droid(&droid);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, VIOLATION_TURRETS);
        assert!(droid.body.id.is_none());
    }

    #[test]
    fn baba_propulsion() {
        assert_eq!(ids(&spec(0, 0, 1, vec![]), &catalog()), vec![VIOLATION_BABA]);
    }

    #[test]
    fn cyborg_legs_need_cyborg_body() {
        let catalog = catalog();
        assert_eq!(ids(&spec(0, 1, 1, vec![]), &catalog), vec![VIOLATION_CYBORG_BODY]);
        assert!(ids(&spec(1, 1, 1, vec![]), &catalog).is_empty());
    }

    #[test]
    fn auto_repair_keeps_first_time() {
        let catalog = catalog();
        let lookup: &dyn NameLookup = &catalog;
        let mut stats = DroidStats::default();
        add_manufactured_droid(&mut stats, 2, 5_000, &spec(0, 2, 0, vec![]), Some(lookup));
        add_manufactured_droid(&mut stats, 2, 9_000, &spec(0, 2, 0, vec![]), Some(lookup));
        add_manufactured_droid(&mut stats, 1, 7_000, &spec(0, 2, 1, vec![]), Some(lookup));

        let summaries = build_auto_repair_summaries(stats.auto_repair, &ReplaySettings::default());
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].player, 2);
        assert_eq!(summaries[0].first_game_time, 5_000);
        assert_eq!(summaries[0].first_game_time_text, "5s");
        assert!(stats.violations.is_empty());
    }
}
