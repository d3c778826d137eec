//! Sends the open form to the tracker service and reconciles local state with the reply.

use tracing::{debug, info, warn};

use crate::{
    dto::response::{PlayReply, RecordedPlay},
    error::TrackerError,
    services::{notifications::messages, payload::build_request, tracker_service::arm_chain},
    state::{
        SharedTracker,
        feed::FeedEntry,
        form::PlayType,
        game::StateUpdate,
        state_machine::TrackerEvent,
    },
};

/// How a submission attempt ended. Every variant releases the submission lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another request held the lock; nothing was sent.
    Dropped,
    /// The service recorded the play under `sequence`.
    Recorded {
        sequence: u32,
        /// Form scheduled to open on its own, if the new situation calls for one.
        chain: Option<PlayType>,
    },
    /// The service refused the play; the form stays open.
    Rejected { message: String },
    /// The request never got a usable answer; the form stays open.
    TransportFailed,
}

/// Submit the open form of type `play_type`.
pub async fn submit(
    tracker: &SharedTracker,
    play_type: PlayType,
) -> Result<SubmitOutcome, TrackerError> {
    let Some(_gate) = tracker.try_begin_submission() else {
        debug!(%play_type, "submission already in flight; dropping");
        return Ok(SubmitOutcome::Dropped);
    };

    let request = {
        let form = tracker.form().read().await;
        let form = form.as_ref().ok_or(TrackerError::NoOpenForm)?;
        if form.play_type() != play_type {
            return Err(TrackerError::FormTypeMismatch {
                open: form.play_type(),
                requested: play_type,
            });
        }
        let situation = tracker.game().read().await.state().situation();
        build_request(form, situation)
    };

    tracker.apply_event(TrackerEvent::Submit).await?;

    let outcome = match tracker.service().record_play(request).await {
        Ok(PlayReply::Recorded(play)) => return record(tracker, play_type, play).await,
        Ok(PlayReply::Rejected { error }) => {
            let message = error.unwrap_or_else(|| messages::PLAY_FAILED.to_string());
            warn!(%play_type, %message, "play rejected by tracker service");
            tracker.notifier().error(message.clone());
            SubmitOutcome::Rejected { message }
        }
        Err(err) => {
            warn!(%play_type, error = %err, "play submission failed");
            tracker.notifier().error(messages::PLAY_NETWORK_ERROR);
            SubmitOutcome::TransportFailed
        }
    };

    tracker.apply_event(TrackerEvent::SubmissionFailed).await?;
    Ok(outcome)
}

async fn record(
    tracker: &SharedTracker,
    play_type: PlayType,
    play: RecordedPlay,
) -> Result<SubmitOutcome, TrackerError> {
    let chain = play.next_state.as_ref().and_then(|next| next.chained_form());

    let sequence = {
        let mut game = tracker.game().write().await;
        game.apply_server_update(&StateUpdate {
            quarter: None,
            field: play.next_state.as_ref().map(|next| next.field_position()),
            scores: Some(play.scores),
        });
        let sequence = game.advance_sequence();
        let entry = FeedEntry::recorded(
            sequence,
            game.state().quarter,
            play.summary,
            play.detail.as_ref(),
        );
        tracker.feed().write().await.push_front(entry);
        sequence
    };

    tracker.form().write().await.take();
    tracker.notifier().success(messages::PLAY_SAVED);
    info!(%play_type, sequence, chain = ?chain, "play recorded");

    let mut chain_slot = tracker.chain().lock().await;
    tracker
        .apply_event(TrackerEvent::SubmissionSucceeded { chain })
        .await?;
    if let Some(next) = chain {
        arm_chain(tracker, &mut chain_slot, next);
    }

    Ok(SubmitOutcome::Recorded { sequence, chain })
}
