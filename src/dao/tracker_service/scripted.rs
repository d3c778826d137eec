//! In-memory [`TrackerService`] replaying scripted replies, for tests.

use std::{
    collections::VecDeque,
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use futures::future::BoxFuture;

use crate::dao::{
    remote::{RemoteError, RemoteResult},
    tracker_service::TrackerService,
};
use crate::dto::{
    play::{PlayRequest, ScoreUpdateRequest},
    response::{PlayReply, RecentPlay, ScoreReply},
};
use crate::state::{SharedTracker, TrackerSettings, TrackerState};

/// One scripted answer of the fake service.
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    /// The service answers with this reply.
    Reply(T),
    /// The connection is refused before any answer.
    Offline,
    /// The service answers `success: false` with this reason.
    Refused(String),
}

impl<T> Scripted<T> {
    fn into_result(self, endpoint: &str) -> RemoteResult<T> {
        match self {
            Scripted::Reply(reply) => Ok(reply),
            Scripted::Offline => Err(RemoteError::Transport {
                endpoint: endpoint.to_string(),
                source: Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "offline")),
            }),
            Scripted::Refused(message) => Err(RemoteError::Refused {
                endpoint: endpoint.to_string(),
                message: Some(message),
            }),
        }
    }
}

/// Fake service answering each endpoint from its own queue of scripted replies.
#[derive(Default)]
pub struct ScriptedService {
    plays: Mutex<VecDeque<Scripted<PlayReply>>>,
    undos: Mutex<VecDeque<Scripted<ScoreReply>>>,
    score_updates: Mutex<VecDeque<Scripted<ScoreReply>>>,
    recent: Mutex<VecDeque<Scripted<Vec<RecentPlay>>>>,
    play_requests: Mutex<Vec<PlayRequest>>,
    score_requests: Mutex<Vec<ScoreUpdateRequest>>,
    calls: AtomicUsize,
    latency: Option<Duration>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply by `latency`, so tests can act while a request is in flight.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn push_play(&self, reply: Scripted<PlayReply>) {
        lock(&self.plays).push_back(reply);
    }

    pub fn push_undo(&self, reply: Scripted<ScoreReply>) {
        lock(&self.undos).push_back(reply);
    }

    pub fn push_score_update(&self, reply: Scripted<ScoreReply>) {
        lock(&self.score_updates).push_back(reply);
    }

    pub fn push_recent(&self, reply: Scripted<Vec<RecentPlay>>) {
        lock(&self.recent).push_back(reply);
    }

    /// Total number of calls received, across endpoints.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn play_requests(&self) -> Vec<PlayRequest> {
        lock(&self.play_requests).clone()
    }

    pub fn score_requests(&self) -> Vec<ScoreUpdateRequest> {
        lock(&self.score_requests).clone()
    }

    fn answer<T: Send + 'static>(
        &self,
        queue: &Mutex<VecDeque<Scripted<T>>>,
        endpoint: &'static str,
    ) -> BoxFuture<'static, RemoteResult<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = lock(queue).pop_front();
        let latency = self.latency;
        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            match next {
                Some(scripted) => scripted.into_result(endpoint),
                None => panic!("no scripted reply left for `{endpoint}`"),
            }
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TrackerService for ScriptedService {
    fn record_play(&self, request: PlayRequest) -> BoxFuture<'static, RemoteResult<PlayReply>> {
        lock(&self.play_requests).push(request);
        self.answer(&self.plays, "record_play")
    }

    fn undo_last(&self) -> BoxFuture<'static, RemoteResult<ScoreReply>> {
        self.answer(&self.undos, "undo_last")
    }

    fn update_score(
        &self,
        request: ScoreUpdateRequest,
    ) -> BoxFuture<'static, RemoteResult<ScoreReply>> {
        lock(&self.score_requests).push(request);
        self.answer(&self.score_updates, "update_score")
    }

    fn recent_plays(&self, _limit: usize) -> BoxFuture<'static, RemoteResult<Vec<RecentPlay>>> {
        self.answer(&self.recent, "recent_plays")
    }
}

/// Tracker seeded mid-game (Q2, 3rd & 7 at own 40, 7-3) and backed by `service`.
pub fn seeded_tracker(service: Arc<ScriptedService>, settings: TrackerSettings) -> SharedTracker {
    let seed = serde_json::from_value(serde_json::json!({
        "game_id": 7,
        "team": {"team_abbr": "EAG", "opponent": "Lions"},
        "roster": [
            {"id": 1, "number": 12, "first_name": "Tom", "last_name": "Brady", "position": "QB"},
            {"id": 22, "number": 22, "first_name": "Ray", "last_name": "Rice", "position": "RB"},
            {"id": 88, "number": 88, "first_name": "Tony", "last_name": "Gonzalez", "position": "TE"},
            {"id": 4, "number": 3, "first_name": "Adam", "last_name": "Vinatieri", "position": "K"}
        ],
        "game_state": {
            "quarter": 2, "down": 3, "distance": 7, "ball_position": -10,
            "team_score": 7, "opponent_score": 3, "next_sequence": 12
        }
    }))
    .unwrap();
    TrackerState::new(seed, service, settings).unwrap()
}
