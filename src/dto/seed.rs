//! Seed data embedded by the hosting page when the tracker starts.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dto::{response::RecentPlay, validation::validate_unique_player_ids},
    state::{
        game::GameState,
        roster::{Player, Roster},
    },
};

/// Everything the tracker needs before the first interaction.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeedData {
    pub game_id: u64,
    #[validate(nested)]
    pub team: TeamIdentity,
    #[serde(default)]
    #[validate(custom(function = "validate_unique_player_ids"))]
    pub roster: Vec<Player>,
    #[serde(default)]
    #[validate(nested)]
    pub game_state: SeedGameState,
    /// Most recent plays, newest first.
    #[serde(default)]
    pub recent_plays: Vec<RecentPlay>,
}

impl SeedData {
    pub fn roster(&self) -> Roster {
        Roster::new(self.roster.clone())
    }
}

/// Labels of the two sides, used by score prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TeamIdentity {
    #[validate(length(min = 1, max = 8))]
    pub team_abbr: String,
    #[validate(length(min = 1))]
    pub opponent: String,
}

/// Game state as rendered by the hosting page; omitted keys take the page's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct SeedGameState {
    #[validate(range(min = 1, max = 9))]
    pub quarter: u8,
    pub down: Option<u8>,
    pub distance: Option<i32>,
    #[validate(range(min = -50, max = 50))]
    pub ball_position: Option<i32>,
    pub team_score: u32,
    pub opponent_score: u32,
    #[validate(range(min = 1))]
    pub next_sequence: u32,
}

impl Default for SeedGameState {
    fn default() -> Self {
        let defaults = GameState::default();
        Self {
            quarter: defaults.quarter,
            down: defaults.down,
            distance: defaults.distance,
            ball_position: defaults.ball_position,
            team_score: defaults.team_score,
            opponent_score: defaults.opponent_score,
            next_sequence: defaults.next_sequence,
        }
    }
}

impl From<SeedGameState> for GameState {
    fn from(seed: SeedGameState) -> Self {
        Self {
            quarter: seed.quarter,
            down: seed.down,
            distance: seed.distance,
            ball_position: seed.ball_position,
            team_score: seed.team_score,
            opponent_score: seed.opponent_score,
            next_sequence: seed.next_sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn seed(value: serde_json::Value) -> SeedData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_state_takes_page_defaults() {
        let data = seed(json!({
            "game_id": 7,
            "team": {"team_abbr": "EAG", "opponent": "Lions"}
        }));
        assert!(data.validate().is_ok());
        assert_eq!(GameState::from(data.game_state), GameState::default());
        assert!(data.roster.is_empty());
        assert!(data.recent_plays.is_empty());
    }

    #[test]
    fn partial_state_keeps_other_defaults() {
        let data = seed(json!({
            "game_id": 7,
            "team": {"team_abbr": "EAG", "opponent": "Lions"},
            "game_state": {"quarter": 3, "next_sequence": 42, "team_score": 14}
        }));
        let state = GameState::from(data.game_state);
        assert_eq!(state.quarter, 3);
        assert_eq!(state.next_sequence, 42);
        assert_eq!(state.team_score, 14);
        assert_eq!(state.down, Some(1));
        assert_eq!(state.ball_position, Some(25));
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let data = seed(json!({
            "game_id": 7,
            "team": {"team_abbr": "", "opponent": "Lions"},
            "game_state": {"quarter": 0, "ball_position": 60}
        }));
        let errors = data.validate().unwrap_err().to_string();
        assert!(errors.contains("team_abbr"));
        assert!(errors.contains("quarter"));
        assert!(errors.contains("ball_position"));
    }

    #[test]
    fn duplicate_roster_ids_fail_validation() {
        let player = json!({"id": 3, "number": 12, "first_name": "Tom",
                            "last_name": "Brady", "position": "QB"});
        let data = seed(json!({
            "game_id": 7,
            "team": {"team_abbr": "EAG", "opponent": "Lions"},
            "roster": [player.clone(), player]
        }));
        assert!(data.validate().is_err());
    }
}
