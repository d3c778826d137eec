//! Locally known game situation and the scoreboard values derived from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dto::{
    play::SituationSnapshot,
    validation::{OverrideRejection, validate_quarter_input},
};

/// Yards to go shown when the down is set but the distance is unknown.
const DEFAULT_DISTANCE: i32 = 10;

/// Score, clock period and field position as last acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 1–4 for regulation, 5 and above for overtime periods.
    pub quarter: u8,
    /// Current down, absent after a score or before a kickoff.
    pub down: Option<u8>,
    pub distance: Option<i32>,
    /// Signed yards from midfield: negative is own territory, positive is opponent territory.
    pub ball_position: Option<i32>,
    pub team_score: u32,
    pub opponent_score: u32,
    /// Number the next recorded play will be displayed with.
    pub next_sequence: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            quarter: 1,
            down: Some(1),
            distance: Some(DEFAULT_DISTANCE),
            ball_position: Some(25),
            team_score: 0,
            opponent_score: 0,
            next_sequence: 1,
        }
    }
}

impl GameState {
    /// Situation fields sent along with every play submission.
    pub fn situation(&self) -> SituationSnapshot {
        SituationSnapshot {
            quarter: self.quarter,
            down: self.down,
            distance: self.distance,
            ball_position: self.ball_position,
        }
    }
}

/// Both scores, always reported together by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreline {
    pub team: u32,
    pub opponent: u32,
}

/// Down, distance and spot as reported by the server after a play.
///
/// Applied as a group: an absent value clears the local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldPosition {
    pub down: Option<u8>,
    pub distance: Option<i32>,
    pub ball_position: Option<i32>,
}

/// Partial update merged into the store after a successful server response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateUpdate {
    pub quarter: Option<u8>,
    pub field: Option<FieldPosition>,
    pub scores: Option<Scoreline>,
}

/// Which side a manual score override targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSide {
    Team,
    Opponent,
}

/// Errors raised by the store itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store only accepts a single seed per session.
    #[error("game state has already been initialized")]
    AlreadyInitialized,
}

/// Owner of the [`GameState`] for the lifetime of the tracker.
#[derive(Debug, Clone, Default)]
pub struct GameStateStore {
    state: GameState,
    initialized: bool,
}

impl GameStateStore {
    /// Seed the store from server-rendered data. Allowed once.
    pub fn initialize(&mut self, seed: GameState) -> Result<(), StoreError> {
        if self.initialized {
            return Err(StoreError::AlreadyInitialized);
        }
        self.state = seed;
        self.initialized = true;
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Merge a server-reported update; fields absent from `update` are left unchanged.
    pub fn apply_server_update(&mut self, update: &StateUpdate) {
        if let Some(quarter) = update.quarter {
            self.state.quarter = quarter;
        }
        if let Some(field) = update.field {
            self.state.down = field.down;
            self.state.distance = field.distance;
            self.state.ball_position = field.ball_position;
        }
        if let Some(scores) = update.scores {
            self.set_scores(scores);
        }
    }

    /// Overwrite both scores with server-confirmed values.
    pub fn set_scores(&mut self, scores: Scoreline) {
        self.state.team_score = scores.team;
        self.state.opponent_score = scores.opponent;
    }

    pub fn scores(&self) -> Scoreline {
        Scoreline {
            team: self.state.team_score,
            opponent: self.state.opponent_score,
        }
    }

    /// Consume the next display sequence number, returning the one assigned to the play.
    pub fn advance_sequence(&mut self) -> u32 {
        let assigned = self.state.next_sequence;
        self.state.next_sequence = assigned.saturating_add(1);
        assigned
    }

    /// Manual quarter override; out-of-range or non-numeric input leaves the state untouched.
    pub fn set_quarter(&mut self, raw: &str) -> Result<u8, OverrideRejection> {
        let quarter = validate_quarter_input(raw)?;
        self.state.quarter = quarter;
        Ok(quarter)
    }

    /// Derive the values shown on the scoreboard and field strip.
    pub fn derive_display(&self) -> ScoreboardDisplay {
        let state = &self.state;
        let down_distance = state
            .down
            .filter(|down| *down != 0)
            .map(|down| DownDistanceDisplay {
                down_label: down_ordinal(down),
                distance: state.distance.filter(|d| *d != 0).unwrap_or(DEFAULT_DISTANCE),
            });

        ScoreboardDisplay {
            team_score: state.team_score,
            opponent_score: state.opponent_score,
            quarter_label: quarter_label(state.quarter),
            down_distance,
            ball_label: ball_position_label(state.ball_position),
            marker_percent: marker_percent(state.ball_position),
        }
    }
}

/// Values rendered by the scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreboardDisplay {
    pub team_score: u32,
    pub opponent_score: u32,
    pub quarter_label: String,
    /// `None` hides the down & distance bar.
    pub down_distance: Option<DownDistanceDisplay>,
    pub ball_label: String,
    /// Horizontal offset of the ball marker, as a percentage of the field width.
    pub marker_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownDistanceDisplay {
    pub down_label: String,
    pub distance: i32,
}

/// `Q1`..`Q4` for regulation, `OT` beyond.
pub fn quarter_label(quarter: u8) -> String {
    if quarter <= 4 {
        format!("Q{quarter}")
    } else {
        "OT".to_string()
    }
}

/// `1st`, `2nd`, `3rd`, `4th`; any other value takes the `th` suffix.
pub fn down_ordinal(down: u8) -> String {
    let suffix = match down {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{down}{suffix}")
}

/// Yard-line label for a signed ball position.
pub fn ball_position_label(position: Option<i32>) -> String {
    match position {
        None => "--".to_string(),
        Some(0) => "50".to_string(),
        Some(p) if p < 0 => format!("OWN {}", 50 + p),
        Some(p) => format!("OPP {}", 50 - p),
    }
}

/// Marker offset in percent; an unknown spot renders at midfield.
pub fn marker_percent(position: Option<i32>) -> f64 {
    let position = f64::from(position.unwrap_or(0));
    ((position + 50.0) / 100.0) * 100.0
}
