use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::dao::{remote::RemoteResult, tracker_service::TrackerService};
use crate::dto::{
    play::{PlayRequest, ScoreUpdateRequest},
    response::{
        MalformedResponse, PlayReply, PlayResponseBody, RecentPlay, RecentPlaysBody, ScoreReply,
        ScoreResponseBody,
    },
};

use super::{
    config::HttpServiceConfig,
    error::{HttpResult, HttpServiceError},
};

const CSRF_HEADER: &str = "X-CSRFToken";
const UNDO: &str = "undo";
const UPDATE_SCORE: &str = "update-score";
const PLAYS: &str = "plays";

/// [`TrackerService`] talking JSON to the tracker endpoints of one game.
#[derive(Clone)]
pub struct HttpTrackerService {
    client: Client,
    base_url: Arc<str>,
    game_id: u64,
    csrf_token: Option<Arc<str>>,
}

impl HttpTrackerService {
    /// Build a client bound to `game_id`.
    pub fn connect(config: HttpServiceConfig, game_id: u64) -> HttpResult<Self> {
        let base_url = config.base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(HttpServiceError::InvalidBaseUrl {
                url: config.base_url,
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| HttpServiceError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url),
            game_id,
            csrf_token: config.csrf_token.map(Arc::from),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        tracker_url(&self.base_url, self.game_id, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(endpoint));
        match self.csrf_token {
            Some(ref token) => builder.header(CSRF_HEADER, token.as_ref()),
            None => builder,
        }
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> HttpResult<T>
    where
        B: ?Sized + Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, endpoint)
            .json(body)
            .send()
            .await
            .map_err(|source| HttpServiceError::RequestSend {
                path: endpoint.to_string(),
                source,
            })?;
        read_body(endpoint, response).await
    }

    async fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> HttpResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, endpoint)
            .query(query)
            .send()
            .await
            .map_err(|source| HttpServiceError::RequestSend {
                path: endpoint.to_string(),
                source,
            })?;
        read_body(endpoint, response).await
    }
}

/// `{base}/games/{id}/tracker/{endpoint}/`
fn tracker_url(base_url: &str, game_id: u64, endpoint: &str) -> String {
    format!("{base_url}/games/{game_id}/tracker/{endpoint}/")
}

async fn read_body<T>(path: &str, response: reqwest::Response) -> HttpResult<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|source| HttpServiceError::RequestSend {
            path: path.to_string(),
            source,
        })?;
    decode_body(path, status, &bytes)
}

/// Decode a body whatever the status: the service reports refusals as JSON with an error
/// status. Only a body that is not the expected JSON counts as a failure.
fn decode_body<T>(path: &str, status: StatusCode, bytes: &[u8]) -> HttpResult<T>
where
    T: DeserializeOwned,
{
    match serde_json::from_slice::<T>(bytes) {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Err(HttpServiceError::RequestStatus {
            path: path.to_string(),
            status,
        }),
        Err(source) => Err(HttpServiceError::DecodeResponse {
            path: path.to_string(),
            source,
        }),
    }
}

fn malformed(path: &str) -> impl FnOnce(MalformedResponse) -> HttpServiceError + '_ {
    move |source| HttpServiceError::Malformed {
        path: path.to_string(),
        source,
    }
}

/// Plays of a listing body; a refused listing is an error so callers keep what they show.
fn listed_plays(path: &str, body: RecentPlaysBody) -> HttpResult<Vec<RecentPlay>> {
    if body.success {
        Ok(body.plays)
    } else {
        Err(HttpServiceError::Refused {
            path: path.to_string(),
            message: body.error,
        })
    }
}

impl TrackerService for HttpTrackerService {
    fn record_play(&self, request: PlayRequest) -> BoxFuture<'static, RemoteResult<PlayReply>> {
        let service = self.clone();
        Box::pin(async move {
            let endpoint = request.play_type().endpoint();
            debug!(endpoint, game_id = service.game_id, "posting play");
            let body: PlayResponseBody = service.post(endpoint, &request).await?;
            PlayReply::try_from(body)
                .map_err(malformed(endpoint))
                .map_err(Into::into)
        })
    }

    fn undo_last(&self) -> BoxFuture<'static, RemoteResult<ScoreReply>> {
        let service = self.clone();
        Box::pin(async move {
            let body: ScoreResponseBody = service.post(UNDO, &serde_json::json!({})).await?;
            ScoreReply::try_from(body)
                .map_err(malformed(UNDO))
                .map_err(Into::into)
        })
    }

    fn update_score(
        &self,
        request: ScoreUpdateRequest,
    ) -> BoxFuture<'static, RemoteResult<ScoreReply>> {
        let service = self.clone();
        Box::pin(async move {
            let body: ScoreResponseBody = service.post(UPDATE_SCORE, &request).await?;
            ScoreReply::try_from(body)
                .map_err(malformed(UPDATE_SCORE))
                .map_err(Into::into)
        })
    }

    fn recent_plays(&self, limit: usize) -> BoxFuture<'static, RemoteResult<Vec<RecentPlay>>> {
        let service = self.clone();
        Box::pin(async move {
            let body: RecentPlaysBody = service
                .get(PLAYS, &[("limit", limit.to_string())])
                .await?;
            listed_plays(PLAYS, body).map_err(Into::into)
        })
    }
}
