//! # User record client
//!
//! Two thin REST calls against the profile backend:
//!
//! | Method | Request |
//! |--------|---------|
//! | [`fetch_user_data`](UserRecordApi::fetch_user_data) | `GET {base}/api/fetch-user-data/{userId}` |
//! | [`update_user_data`](UserRecordApi::update_user_data) | `PUT {base}/api/update-user-data`, body `{"userId", "data"}` |
//!
//! Both send `Authorization: Bearer {token}`. Every non-2xx status collapses into
//! [`ApiError::Unauthorized`]; the body is never inspected to tell "not found"
//! from "forbidden", but it is kept on the error. No retries, no timeout, no
//! caching, no deduplication.
//!
//! [`UserRecordApi`] is the seam the profile view model is written against, so
//! tests can swap in a recording fake.

use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, Url};
use serde::Serialize;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::models::{Credentials, UserRecord};

/// Backend operations on the signed-in user's record.
pub trait UserRecordApi {
    fn fetch_user_data(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<UserRecord, ApiError>>;

    fn update_user_data(
        &self,
        credentials: &Credentials,
        data: Value,
    ) -> impl Future<Output = Result<Value, ApiError>>;
}

/// Body of `PUT /api/update-user-data`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    user_id: &'a str,
    data: &'a Value,
}

/// HTTP implementation of [`UserRecordApi`].
#[derive(Debug, Clone)]
pub struct UserRecordClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl UserRecordClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Client for the backend named by `BACKEND_URL`.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self::new(BackendConfig::from_env()?))
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// `{base}/api/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|_| ApiError::InvalidArgument("invalid backend URL"))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidArgument("invalid backend URL"))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }
}

impl UserRecordApi for UserRecordClient {
    async fn fetch_user_data(&self, credentials: &Credentials) -> Result<UserRecord, ApiError> {
        let url = self.endpoint(&["fetch-user-data", credentials.user_id()])?;
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(credentials.token())
            .send()
            .await?;

        let body = read_json(response).await?;
        UserRecord::try_from(body)
            .map_err(|other| ApiError::Decode(format!("expected a JSON object, got {other}")))
    }

    async fn update_user_data(
        &self,
        credentials: &Credentials,
        data: Value,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(&["update-user-data"])?;
        tracing::debug!("PUT {}", url);

        let response = self
            .http
            .put(url)
            .bearer_auth(credentials.token())
            .json(&UpdateRequest {
                user_id: credentials.user_id(),
                data: &data,
            })
            .send()
            .await?;

        read_json(response).await
    }
}

/// Collapse non-2xx into `Unauthorized`, otherwise parse the body as JSON.
async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("backend answered {}", status);
        return Err(ApiError::Unauthorized {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
