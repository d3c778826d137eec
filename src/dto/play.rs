//! Request bodies sent to the tracker endpoints.

use serde::Serialize;

use crate::state::form::PlayType;

/// Situation fields common to every play submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SituationSnapshot {
    pub quarter: u8,
    pub down: Option<u8>,
    pub distance: Option<i32>,
    pub ball_position: Option<i32>,
}

/// Normalized body of a play submission: situation plus type-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayRequest {
    #[serde(flatten)]
    pub situation: SituationSnapshot,
    #[serde(flatten)]
    pub details: PlayDetails,
}

impl PlayRequest {
    pub fn play_type(&self) -> PlayType {
        self.details.play_type()
    }
}

/// Type-specific part of a play submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlayDetails {
    Run(RunDetails),
    Pass(PassDetails),
    Penalty(PenaltyDetails),
    Kickoff(KickoffDetails),
    Punt(PuntDetails),
    FieldGoal(FieldGoalDetails),
    ExtraPoint(ExtraPointDetails),
}

impl PlayDetails {
    pub fn play_type(&self) -> PlayType {
        match self {
            PlayDetails::Run(_) => PlayType::Run,
            PlayDetails::Pass(_) => PlayType::Pass,
            PlayDetails::Penalty(_) => PlayType::Penalty,
            PlayDetails::Kickoff(_) => PlayType::Kickoff,
            PlayDetails::Punt(_) => PlayType::Punt,
            PlayDetails::FieldGoal(_) => PlayType::FieldGoal,
            PlayDetails::ExtraPoint(_) => PlayType::ExtraPoint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunDetails {
    pub ball_carrier: Option<u64>,
    pub yards_gained: i32,
    pub is_touchdown: bool,
    pub is_first_down: bool,
    pub fumbled: bool,
    pub fumble_lost: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassDetails {
    pub quarterback: Option<u64>,
    pub receiver: Option<u64>,
    pub is_complete: bool,
    /// Always zero on a sack; the loss travels in `sack_yards`.
    pub yards_gained: i32,
    pub is_touchdown: bool,
    pub is_first_down: bool,
    pub is_interception: bool,
    pub was_sacked: bool,
    /// Non-positive yardage lost on a sack, zero otherwise.
    pub sack_yards: i32,
    pub fumbled: bool,
    pub fumble_lost: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PenaltyDetails {
    pub penalty_description: String,
    pub penalty_yards: i32,
    pub on_offense: bool,
    pub accepted: bool,
    pub declined: bool,
    pub repeat_down: bool,
    pub auto_first_down: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KickoffDetails {
    pub kicker: Option<u64>,
    pub kick_yards: i32,
    pub is_touchback: bool,
    pub is_onside_kick: bool,
    pub out_of_bounds: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuntDetails {
    pub punter: Option<u64>,
    pub punt_yards: i32,
    pub is_touchback: bool,
    pub is_blocked: bool,
    pub out_of_bounds: bool,
    pub notes: String,
}

/// Outcome of a field-goal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldGoalResult {
    Good,
    #[default]
    Miss,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldGoalDetails {
    pub kicker: Option<u64>,
    pub kick_distance: i32,
    pub result: FieldGoalResult,
    pub notes: String,
}

/// Kind of try after a touchdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExtraPointAttempt {
    #[default]
    #[serde(rename = "KICK")]
    Kick,
    #[serde(rename = "2PT_RUN")]
    TwoPointRun,
    #[serde(rename = "2PT_PASS")]
    TwoPointPass,
}

/// Outcome of a try after a touchdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraPointResult {
    Good,
    #[default]
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraPointDetails {
    pub attempt_type: ExtraPointAttempt,
    pub result: ExtraPointResult,
    /// Only set for kicked tries.
    pub kicker: Option<u64>,
    pub notes: String,
}

/// Body of a manual score correction; only the edited side is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_score: Option<u32>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn play_request_flattens_situation_and_details() {
        let request = PlayRequest {
            situation: SituationSnapshot {
                quarter: 2,
                down: None,
                distance: None,
                ball_position: Some(-10),
            },
            details: PlayDetails::FieldGoal(FieldGoalDetails {
                kicker: Some(4),
                kick_distance: 30,
                result: FieldGoalResult::default(),
                notes: String::new(),
            }),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "quarter": 2,
                "down": null,
                "distance": null,
                "ball_position": -10,
                "kicker": 4,
                "kick_distance": 30,
                "result": "MISS",
                "notes": ""
            })
        );
        assert_eq!(request.play_type(), PlayType::FieldGoal);
    }

    #[test]
    fn extra_point_enums_use_wire_names() {
        assert_eq!(
            serde_json::to_value(ExtraPointAttempt::TwoPointPass).unwrap(),
            json!("2PT_PASS")
        );
        assert_eq!(
            serde_json::to_value(ExtraPointAttempt::default()).unwrap(),
            json!("KICK")
        );
        assert_eq!(
            serde_json::to_value(FieldGoalResult::Block).unwrap(),
            json!("BLOCK")
        );
    }

    #[test]
    fn score_update_sends_only_edited_side() {
        let request = ScoreUpdateRequest {
            opponent_score: Some(14),
            ..ScoreUpdateRequest::default()
        };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({ "opponent_score": 14 })
        );
    }
}
