use crate::PlayerSummary;
use crate::source::replay::ReplaySettings;

/// Allocated slots in index order.
pub(crate) fn build_player_summaries(settings: &ReplaySettings) -> Vec<PlayerSummary> {
    settings
        .player_slots()
        .into_iter()
        .filter(|slot| slot.allocated)
        .map(|slot| PlayerSummary {
            slot: slot.index,
            name: slot.name,
            position: slot.position,
            team: slot.team,
            spectator: slot.spectator,
            identity_hash: slot.identity_hash,
        })
        .collect()
}

/// Display name of a sender slot; empty when the slot is not in the header.
pub(crate) fn player_name(settings: &ReplaySettings, slot: u8) -> String {
    settings
        .game_options
        .netplay_players
        .get(usize::from(slot))
        .map(|player| player.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{build_player_summaries, player_name};
    use crate::source::replay::ReplaySettings;

    fn settings() -> ReplaySettings {
        serde_json::from_str(
            r#"{"gameOptions": {"netplay.players": [
                {"name": "host", "allocated": true, "position": 1, "team": 0},
                {"name": "", "allocated": false},
                {"name": "guest", "allocated": true, "position": 0, "team": 1, "isSpectator": true}
            ]}, "replayFormatVer": 2}"#,
        )
        .unwrap()
    }

    #[test]
    fn only_allocated_slots_are_listed() {
        let players = build_player_summaries(&settings());
        let slots: Vec<usize> = players.iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![0, 2]);
        assert_eq!(players[1].name, "guest");
        assert!(players[1].spectator);
        assert_eq!(players[0].identity_hash, None);
    }

    #[test]
    fn sender_names() {
        let settings = settings();
        assert_eq!(player_name(&settings, 2), "guest");
        assert_eq!(player_name(&settings, 9), "");
    }
}
