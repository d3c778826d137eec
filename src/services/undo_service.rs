//! Removal of the most recently recorded play.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::{
    dto::response::ScoreReply,
    error::TrackerError,
    services::notifications::messages,
    state::{SharedTracker, game::Scoreline, state_machine::TrackerEvent},
};

/// How an undo attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// Another request held the lock; nothing was asked or sent.
    Dropped,
    /// The operator declined the confirmation.
    Cancelled,
    /// The service removed the play; both scores are the server's.
    Undone(Scoreline),
    /// The service refused, e.g. nothing left to undo; `message` is what the operator saw.
    Rejected { message: String },
    /// No usable reply; local state is unchanged.
    TransportFailed,
}

/// Ask the operator through `confirm`, then undo the last recorded play.
///
/// The submission lock is taken before confirming so no play can be sent while the
/// question is open. The sequence counter is never rolled back.
pub async fn undo_last<F, Fut>(tracker: &SharedTracker, confirm: F) -> Result<UndoOutcome, TrackerError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = bool>,
{
    let Some(_gate) = tracker.try_begin_submission() else {
        debug!("request already in flight; dropping undo");
        return Ok(UndoOutcome::Dropped);
    };

    if !confirm().await {
        debug!("undo declined by operator");
        return Ok(UndoOutcome::Cancelled);
    }

    tracker.apply_event(TrackerEvent::BeginUndo).await?;

    let outcome = match tracker.service().undo_last().await {
        Ok(ScoreReply::Updated(scores)) => {
            tracker.game().write().await.set_scores(scores);
            let removed = tracker.feed().write().await.remove_newest();
            tracker.notifier().success(messages::PLAY_UNDONE);
            info!(
                removed = ?removed.map(|entry| entry.sequence_number),
                team = scores.team,
                opponent = scores.opponent,
                "last play undone"
            );
            UndoOutcome::Undone(scores)
        }
        Ok(ScoreReply::Rejected { error }) => {
            let message = error.unwrap_or_else(|| messages::NOTHING_TO_UNDO.to_string());
            warn!(%message, "undo rejected by tracker service");
            tracker.notifier().error(message.clone());
            UndoOutcome::Rejected { message }
        }
        Err(err) => {
            warn!(error = %err, "undo request failed");
            tracker.notifier().error(messages::NETWORK_ERROR);
            UndoOutcome::TransportFailed
        }
    };

    tracker.apply_event(TrackerEvent::UndoFinished).await?;
    Ok(outcome)
}
