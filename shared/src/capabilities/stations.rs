use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crux_http::Error as HttpError;

use super::AppHttp;
use crate::config::FeedEndpoint;
use crate::model::{RequestEpoch, Station};

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),

    #[error("Request failed ({0})")]
    Http(u16),

    #[error("Unexpected response format.")]
    Malformed,

    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Cancellation is bookkeeping, never something to show the user.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Network(detail) if detail.trim().is_empty() => UNKNOWN_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Http(http) => Self::Http(http.code.into()),
            HttpError::Json(_) => Self::Malformed,
            HttpError::Url(detail) | HttpError::Io(detail) => Self::Network(detail),
            HttpError::Timeout => Self::Network("Request timed out".to_string()),
        }
    }
}

pub type FetchResult = Result<Vec<Station>, FetchError>;

/// Decodes the feed body. Anything other than a JSON array of station
/// records is malformed.
pub fn decode_stations(body: &[u8]) -> FetchResult {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| FetchError::Malformed)?;

    let serde_json::Value::Array(records) = value else {
        return Err(FetchError::Malformed);
    };

    records
        .into_iter()
        .map(serde_json::from_value::<Station>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| FetchError::Malformed)
}

/// One GET against the station feed. No retries; that is the caller's call.
pub struct StationFeed {
    http: AppHttp,
    endpoint: FeedEndpoint,
}

impl StationFeed {
    pub fn new(http: AppHttp, endpoint: FeedEndpoint) -> Self {
        Self { http, endpoint }
    }

    /// Resolves to `FetchError::Cancelled` as soon as the paired
    /// `AbortHandle` fires, whatever state the request is in.
    pub async fn load(self, registration: AbortRegistration) -> FetchResult {
        match Abortable::new(self.fetch(), registration).await {
            Ok(outcome) => outcome,
            Err(Aborted) => Err(FetchError::Cancelled),
        }
    }

    async fn fetch(self) -> FetchResult {
        let mut response = self
            .http
            .get(self.endpoint.as_str())
            .send_async()
            .await
            .map_err(FetchError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.into()));
        }

        let body = response.body_bytes().await.map_err(FetchError::from)?;
        decode_stations(&body)
    }
}

/// Owns the cancellation side of the outstanding fetch. Dropping it aborts
/// the fetch; `settle` releases it without aborting once the result is in.
#[derive(Debug)]
pub struct InFlightLoad {
    epoch: RequestEpoch,
    abort: Option<AbortHandle>,
}

impl InFlightLoad {
    pub fn start(epoch: RequestEpoch) -> (Self, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        (
            Self {
                epoch,
                abort: Some(handle),
            },
            registration,
        )
    }

    pub fn epoch(&self) -> RequestEpoch {
        self.epoch
    }

    pub fn settle(mut self) {
        self.abort.take();
    }
}

impl Drop for InFlightLoad {
    fn drop(&mut self) {
        if let Some(handle) = self.abort.take() {
            tracing::debug!(epoch = self.epoch.value(), "aborting station fetch");
            handle.abort();
        }
    }
}
