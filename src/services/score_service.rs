//! Manual score and quarter corrections entered by the operator.

use tracing::{debug, info, warn};

use crate::{
    dto::{
        play::ScoreUpdateRequest,
        response::ScoreReply,
        seed::TeamIdentity,
        validation::{OverrideRejection, validate_score_input},
    },
    services::notifications::messages,
    state::{
        SharedTracker,
        game::{ScoreSide, Scoreline},
    },
};

/// How a score override ended. Only `Updated` changes local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreOverride {
    Updated(Scoreline),
    /// Input refused locally; nothing was sent.
    Invalid(OverrideRejection),
    /// The service refused the new score.
    Refused,
    TransportFailed,
}

/// Prompt shown when asking for a new score, e.g. `EAG score:`.
pub fn prompt_label(team: &TeamIdentity, side: ScoreSide) -> String {
    match side {
        ScoreSide::Team => format!("{} score:", team.team_abbr),
        ScoreSide::Opponent => format!("{} score:", team.opponent),
    }
}

/// Push a new score for one side to the service.
///
/// Runs outside the submission lock. Refusals and transport failures are only logged.
pub async fn override_score(tracker: &SharedTracker, side: ScoreSide, raw: &str) -> ScoreOverride {
    let value = match validate_score_input(raw) {
        Ok(value) => value,
        Err(rejection) => {
            debug!(?side, raw, %rejection, "score override rejected");
            return ScoreOverride::Invalid(rejection);
        }
    };

    let request = match side {
        ScoreSide::Team => ScoreUpdateRequest {
            team_score: Some(value),
            ..ScoreUpdateRequest::default()
        },
        ScoreSide::Opponent => ScoreUpdateRequest {
            opponent_score: Some(value),
            ..ScoreUpdateRequest::default()
        },
    };

    match tracker.service().update_score(request).await {
        Ok(ScoreReply::Updated(scores)) => {
            tracker.game().write().await.set_scores(scores);
            tracker.notifier().success(messages::SCORE_UPDATED);
            info!(team = scores.team, opponent = scores.opponent, "score overridden");
            ScoreOverride::Updated(scores)
        }
        Ok(ScoreReply::Rejected { error }) => {
            warn!(?side, error = error.as_deref().unwrap_or(""), "score update refused");
            ScoreOverride::Refused
        }
        Err(err) => {
            warn!(?side, error = %err, "score update failed");
            ScoreOverride::TransportFailed
        }
    }
}

/// Set the quarter locally. Returns the rejection when the input is out of range.
pub async fn override_quarter(tracker: &SharedTracker, raw: &str) -> Result<u8, OverrideRejection> {
    let result = tracker.game().write().await.set_quarter(raw);
    match result {
        Ok(quarter) => {
            tracker.notifier().success(messages::QUARTER_UPDATED);
            info!(quarter, "quarter overridden");
        }
        Err(rejection) => debug!(raw, %rejection, "quarter override rejected"),
    }
    result
}
