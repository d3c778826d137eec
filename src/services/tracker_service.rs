//! Navigation between type selection, the special-teams menu and play forms, plus the
//! edits an operator makes inside an open form.

use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    dao::remote::RemoteResult,
    error::TrackerError,
    services::form_factory::build_form,
    state::{
        ChainTimer, SharedTracker, TrackerState,
        feed::FeedEntry,
        form::{FormSession, FormSpec, PlayType},
        penalty::PenaltySelection,
        state_machine::{TrackerEvent, TrackerPhase},
    },
};

/// Open the form for `play_type`, replacing any form already open.
pub async fn open_form(
    tracker: &SharedTracker,
    play_type: PlayType,
) -> Result<FormSpec, TrackerError> {
    let mut chain = tracker.chain().lock().await;
    let spec = install_form(tracker, play_type).await?;
    if tracker.settings().cancel_chain_on_navigation {
        disarm(&mut chain);
    }
    Ok(spec)
}

/// Show the special-teams submenu.
pub async fn open_special_teams(tracker: &SharedTracker) -> Result<TrackerPhase, TrackerError> {
    navigate(tracker, TrackerEvent::OpenSpecialTeams).await
}

/// Back to type selection; an open form is discarded.
pub async fn cancel(tracker: &SharedTracker) -> Result<TrackerPhase, TrackerError> {
    navigate(tracker, TrackerEvent::Cancel).await
}

async fn navigate(
    tracker: &SharedTracker,
    event: TrackerEvent,
) -> Result<TrackerPhase, TrackerError> {
    let mut chain = tracker.chain().lock().await;
    let phase = tracker.apply_event(event).await?;
    if phase.open_form().is_none() {
        tracker.form().write().await.take();
    }
    if tracker.settings().cancel_chain_on_navigation {
        disarm(&mut chain);
    }
    Ok(phase)
}

async fn install_form(
    tracker: &TrackerState,
    play_type: PlayType,
) -> Result<FormSpec, TrackerError> {
    tracker.apply_event(TrackerEvent::OpenForm(play_type)).await?;
    let spec = build_form(play_type, tracker.roster(), tracker.catalog());
    *tracker.form().write().await = Some(FormSession::from_spec(&spec));
    Ok(spec)
}

fn disarm(chain: &mut Option<ChainTimer>) {
    if let Some(timer) = chain.take() {
        timer.handle.abort();
        debug!(ticket = %timer.ticket, "chained form cancelled by navigation");
    }
}

/// Open `play_type` once the chain delay elapses, unless the operator navigates first.
///
/// The caller must hold the chain lock and pass its slot; any earlier timer is replaced.
pub(crate) fn arm_chain(
    tracker: &SharedTracker,
    chain: &mut Option<ChainTimer>,
    play_type: PlayType,
) {
    if let Some(previous) = chain.take() {
        previous.handle.abort();
    }

    let ticket = Uuid::new_v4();
    let delay = tracker.settings().chain_delay;
    let tracker = SharedTracker::clone(tracker);
    let handle = tokio::spawn(async move {
        sleep(delay).await;
        fire_chain(&tracker, ticket, play_type).await;
    });
    *chain = Some(ChainTimer { ticket, handle });
}

async fn fire_chain(tracker: &TrackerState, ticket: Uuid, play_type: PlayType) {
    let mut chain = tracker.chain().lock().await;
    if chain.as_ref().is_none_or(|timer| timer.ticket != ticket) {
        debug!(%ticket, "discarding stale chained form");
        return;
    }
    chain.take();

    match install_form(tracker, play_type).await {
        Ok(_) => debug!(%play_type, "chained form opened"),
        Err(err) => debug!(%play_type, error = %err, "chained form could not open"),
    }
}

/// Run `edit` against the open form.
pub async fn with_form<T>(
    tracker: &TrackerState,
    edit: impl FnOnce(&mut FormSession) -> Result<T, TrackerError>,
) -> Result<T, TrackerError> {
    let mut form = tracker.form().write().await;
    let form = form.as_mut().ok_or(TrackerError::NoOpenForm)?;
    edit(form)
}

/// Flip a toggle, or select it within its radio group. Returns the toggle's new state.
pub async fn toggle(tracker: &TrackerState, field: &str) -> Result<bool, TrackerError> {
    with_form(tracker, |form| Ok(form.toggle(field)?)).await
}

/// Set a player, number or text field from raw operator input.
pub async fn set_value(tracker: &TrackerState, field: &str, raw: &str) -> Result<(), TrackerError> {
    with_form(tracker, |form| Ok(form.set_value(field, raw)?)).await
}

/// Apply a quick-yards shortcut, returning the field it was written to.
pub async fn quick_yards(tracker: &TrackerState, yards: i32) -> Result<&'static str, TrackerError> {
    with_form(tracker, |form| Ok(form.apply_quick_yards(yards)?)).await
}

/// Select a catalog penalty in the open penalty form.
pub async fn choose_penalty(
    tracker: &TrackerState,
    index: usize,
) -> Result<PenaltySelection, TrackerError> {
    let catalog = *tracker.catalog();
    with_form(tracker, |form| Ok(form.choose_penalty(index, &catalog)?)).await
}

/// Replace the feed with the service's most recent plays. Returns the number of entries shown.
pub async fn refresh_feed(tracker: &TrackerState) -> RemoteResult<usize> {
    let limit = tracker.settings().feed_refresh_limit;
    let plays = match tracker.service().recent_plays(limit).await {
        Ok(plays) => plays,
        Err(err) => {
            warn!(
                endpoint = err.endpoint(),
                refused = err.is_refusal(),
                error = %err,
                "failed to refresh play feed; keeping current entries"
            );
            return Err(err);
        }
    };

    let mut feed = tracker.feed().write().await;
    feed.replace_with(plays.into_iter().map(FeedEntry::from));
    Ok(feed.len())
}
