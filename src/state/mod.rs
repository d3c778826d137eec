/// Recently recorded plays shown under the scoreboard.
pub mod feed;
/// Play types, form descriptions and open form values.
pub mod form;
/// Game situation, scores and the values derived for display.
pub mod game;
/// Fixed catalog of penalties.
pub mod penalty;
/// Players available to the pickers.
pub mod roster;
/// Phases of the tracker and the transitions between them.
pub mod state_machine;

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, MutexGuard, RwLock},
    task::JoinHandle,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::tracker_service::TrackerService,
    dto::seed::{SeedData, TeamIdentity},
    error::TrackerError,
    services::notifications::{DEFAULT_DISMISS_AFTER, Notifier},
};

use self::{
    feed::{FeedEntry, PlayFeed},
    form::FormSession,
    game::{GameStateStore, ScoreboardDisplay},
    penalty::PenaltyCatalog,
    roster::Roster,
    state_machine::{InvalidTransition, Snapshot, TrackerEvent, TrackerPhase, TrackerStateMachine},
};

pub type SharedTracker = Arc<TrackerState>;

/// Identity of one scheduled chained auto-open.
pub type ChainTicket = Uuid;

pub const DEFAULT_CHAIN_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_FEED_REFRESH_LIMIT: usize = 10;

/// Timings and policies of a tracker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Delay before a chained form (extra point, kickoff) opens on its own.
    pub chain_delay: Duration,
    /// Manual navigation cancels a pending chained auto-open. When off, the late timer
    /// replaces whatever the operator opened in the meantime.
    pub cancel_chain_on_navigation: bool,
    pub notification_dismiss: Duration,
    /// Number of plays requested when refreshing the feed from the service.
    pub feed_refresh_limit: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            chain_delay: DEFAULT_CHAIN_DELAY,
            cancel_chain_on_navigation: true,
            notification_dismiss: DEFAULT_DISMISS_AFTER,
            feed_refresh_limit: DEFAULT_FEED_REFRESH_LIMIT,
        }
    }
}

/// Scheduled auto-open of a chained form.
#[derive(Debug)]
pub struct ChainTimer {
    pub ticket: ChainTicket,
    pub handle: JoinHandle<()>,
}

/// Central tracker state: game record, open form, feed and the remote service handle.
///
/// Locks are held briefly and never across a network call, except the submission gate.
pub struct TrackerState {
    game_id: u64,
    team: TeamIdentity,
    roster: Roster,
    catalog: PenaltyCatalog,
    service: Arc<dyn TrackerService>,
    settings: TrackerSettings,
    machine: RwLock<TrackerStateMachine>,
    game: RwLock<GameStateStore>,
    form: RwLock<Option<FormSession>>,
    feed: RwLock<PlayFeed>,
    notifier: Notifier,
    chain: Mutex<Option<ChainTimer>>,
    submission_gate: Mutex<()>,
}

impl TrackerState {
    /// Validate `seed` and build a tracker wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(
        seed: SeedData,
        service: Arc<dyn TrackerService>,
        settings: TrackerSettings,
    ) -> Result<SharedTracker, TrackerError> {
        seed.validate()?;

        let roster = seed.roster();
        let mut game = GameStateStore::default();
        game.initialize(seed.game_state.into())?;
        let mut feed = PlayFeed::default();
        feed.replace_with(seed.recent_plays.into_iter().map(FeedEntry::from));

        Ok(Arc::new(Self {
            game_id: seed.game_id,
            team: seed.team,
            roster,
            catalog: PenaltyCatalog,
            service,
            settings,
            machine: RwLock::new(TrackerStateMachine::new()),
            game: RwLock::new(game),
            form: RwLock::new(None),
            feed: RwLock::new(feed),
            notifier: Notifier::new(settings.notification_dismiss),
            chain: Mutex::new(None),
            submission_gate: Mutex::new(()),
        }))
    }

    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    pub fn team(&self) -> &TeamIdentity {
        &self.team
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn catalog(&self) -> &PenaltyCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Handle to the remote service; cloned so callers never hold a lock while awaiting it.
    pub fn service(&self) -> Arc<dyn TrackerService> {
        Arc::clone(&self.service)
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn game(&self) -> &RwLock<GameStateStore> {
        &self.game
    }

    /// Form currently open, if any.
    pub fn form(&self) -> &RwLock<Option<FormSession>> {
        &self.form
    }

    pub fn feed(&self) -> &RwLock<PlayFeed> {
        &self.feed
    }

    /// Slot of the pending chained auto-open. Navigation and the timer both hold this lock
    /// while they change the phase, so one of them always wins cleanly.
    pub fn chain(&self) -> &Mutex<Option<ChainTimer>> {
        &self.chain
    }

    pub async fn phase(&self) -> TrackerPhase {
        self.machine.read().await.phase()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.machine.read().await.snapshot()
    }

    /// Apply an intent to the state machine, returning the new phase.
    pub async fn apply_event(&self, event: TrackerEvent) -> Result<TrackerPhase, InvalidTransition> {
        let mut sm = self.machine.write().await;
        sm.apply(event)
    }

    /// Try to take the page-wide submission lock. `None` means a request is already in flight.
    ///
    /// The lock is released when the guard drops, on every exit path.
    pub fn try_begin_submission(&self) -> Option<MutexGuard<'_, ()>> {
        self.submission_gate.try_lock().ok()
    }

    pub async fn display(&self) -> ScoreboardDisplay {
        self.game.read().await.derive_display()
    }

    pub async fn feed_entries(&self) -> Vec<FeedEntry> {
        self.feed.read().await.entries().cloned().collect()
    }
}
