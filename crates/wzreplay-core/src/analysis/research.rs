use crate::ResearchEvent;
use crate::protocols::netplay::model::ResearchStatus;
use crate::stats::{NameLookup, StatCategory};

/// Build a research event, naming the topic when stats are loaded.
///
/// Returns the event and, for a topic past the end of a loaded research
/// dictionary, a diagnostic line.
pub(crate) fn research_event(
    sender: u8,
    game_time: u32,
    status: &ResearchStatus,
    lookup: Option<&dyn NameLookup>,
) -> (ResearchEvent, Option<String>) {
    let mut diagnostic = None;
    let topic_name = lookup.and_then(|lookup| {
        let name = lookup.lookup(StatCategory::Research, status.topic_id);
        if name.is_none() {
            diagnostic = Some(format!(
                "research topic {} out of range ({} topics loaded)",
                status.topic_id,
                lookup.entry_count(StatCategory::Research)
            ));
        }
        name.map(str::to_string)
    });
    let event = ResearchEvent {
        game_time,
        player: sender,
        started: status.started,
        building_id: status.building_id,
        topic_id: status.topic_id,
        topic_name,
    };
    (event, diagnostic)
}
