//! Response bodies returned by the tracker endpoints and their domain projections.

use serde::Deserialize;
use thiserror::Error;

use crate::state::{
    form::PlayType,
    game::{FieldPosition, Scoreline},
};

/// Server hint about the next required situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    ExtraPoint,
    Kickoff,
    Normal,
    Turnover,
    OpponentBall,
    TurnoverOnDowns,
    #[serde(other)]
    Other,
}

impl Situation {
    /// Form to open automatically after the play, if the situation demands one.
    pub fn chained_form(self) -> Option<PlayType> {
        match self {
            Situation::ExtraPoint => Some(PlayType::ExtraPoint),
            Situation::Kickoff => Some(PlayType::Kickoff),
            _ => None,
        }
    }
}

/// `next_state` block of a successful play response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NextState {
    #[serde(default)]
    pub down: Option<u8>,
    #[serde(default)]
    pub distance: Option<i32>,
    #[serde(default)]
    pub ball_position: Option<i32>,
    #[serde(default)]
    pub situation: Option<Situation>,
}

impl NextState {
    pub fn field_position(&self) -> FieldPosition {
        FieldPosition {
            down: self.down,
            distance: self.distance,
            ball_position: self.ball_position,
        }
    }

    pub fn chained_form(&self) -> Option<PlayType> {
        self.situation.and_then(Situation::chained_form)
    }
}

/// `play_detail` block of a successful play response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayDetail {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub sequence: Option<u32>,
    #[serde(default)]
    pub quarter: Option<u8>,
    #[serde(default)]
    pub yards: Option<i32>,
    #[serde(default)]
    pub is_touchdown: bool,
    #[serde(default)]
    pub is_first_down: bool,
    #[serde(default)]
    pub is_interception: bool,
    #[serde(default)]
    pub result: Option<String>,
}

/// Raw body of a play submission response, before success/failure is resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayResponseBody {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub next_state: Option<NextState>,
    #[serde(default)]
    pub team_score: Option<u32>,
    #[serde(default)]
    pub opponent_score: Option<u32>,
    #[serde(default)]
    pub play_summary: Option<String>,
    #[serde(default)]
    pub play_detail: Option<PlayDetail>,
}

/// A play the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPlay {
    pub next_state: Option<NextState>,
    pub scores: Scoreline,
    pub summary: String,
    pub detail: Option<PlayDetail>,
}

/// Resolved outcome of a play submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayReply {
    Recorded(RecordedPlay),
    /// Well-formed refusal, with the server's message when it sent one.
    Rejected { error: Option<String> },
}

/// Raised when a body claims success but lacks the fields success implies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("successful response is missing `{field}`")]
pub struct MalformedResponse {
    pub field: &'static str,
}

fn scores_of(
    team_score: Option<u32>,
    opponent_score: Option<u32>,
) -> Result<Scoreline, MalformedResponse> {
    Ok(Scoreline {
        team: team_score.ok_or(MalformedResponse {
            field: "team_score",
        })?,
        opponent: opponent_score.ok_or(MalformedResponse {
            field: "opponent_score",
        })?,
    })
}

impl TryFrom<PlayResponseBody> for PlayReply {
    type Error = MalformedResponse;

    fn try_from(body: PlayResponseBody) -> Result<Self, Self::Error> {
        if !body.success {
            return Ok(PlayReply::Rejected { error: body.error });
        }

        Ok(PlayReply::Recorded(RecordedPlay {
            next_state: body.next_state,
            scores: scores_of(body.team_score, body.opponent_score)?,
            summary: body.play_summary.unwrap_or_default(),
            detail: body.play_detail,
        }))
    }
}

/// Raw body shared by the undo and score-update endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreResponseBody {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub team_score: Option<u32>,
    #[serde(default)]
    pub opponent_score: Option<u32>,
}

/// Resolved outcome of an undo or score-update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreReply {
    Updated(Scoreline),
    Rejected { error: Option<String> },
}

impl TryFrom<ScoreResponseBody> for ScoreReply {
    type Error = MalformedResponse;

    fn try_from(body: ScoreResponseBody) -> Result<Self, Self::Error> {
        if !body.success {
            return Ok(ScoreReply::Rejected { error: body.error });
        }
        scores_of(body.team_score, body.opponent_score).map(ScoreReply::Updated)
    }
}

/// One entry of the recent plays listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecentPlay {
    pub sequence_number: u32,
    pub quarter: u8,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub yards: Option<i32>,
    #[serde(default)]
    pub is_touchdown: bool,
}

/// Body of the recent plays listing, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentPlaysBody {
    pub success: bool,
    #[serde(default)]
    pub plays: Vec<RecentPlay>,
    #[serde(default)]
    pub error: Option<String>,
}
