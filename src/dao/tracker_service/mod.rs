#[cfg(feature = "http-service")]
pub mod http;
#[cfg(test)]
pub mod scripted;

use futures::future::BoxFuture;

use crate::dao::remote::RemoteResult;
use crate::dto::{
    play::{PlayRequest, ScoreUpdateRequest},
    response::{PlayReply, RecentPlay, ScoreReply},
};

/// Abstraction over the service holding the authoritative game record.
pub trait TrackerService: Send + Sync {
    /// Record a play; the endpoint is chosen from the request's play type.
    fn record_play(&self, request: PlayRequest) -> BoxFuture<'static, RemoteResult<PlayReply>>;
    /// Delete the most recent play and return the recomputed scores.
    fn undo_last(&self) -> BoxFuture<'static, RemoteResult<ScoreReply>>;
    fn update_score(
        &self,
        request: ScoreUpdateRequest,
    ) -> BoxFuture<'static, RemoteResult<ScoreReply>>;
    /// Most recent plays, newest first.
    fn recent_plays(&self, limit: usize) -> BoxFuture<'static, RemoteResult<Vec<RecentPlay>>>;
}
