use axum::{
    Json,
    body::Bytes,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

/// Status and body of a ratings service reply, relayed to the caller
/// without translation.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Option<UpstreamBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    /// Anything that did not parse as JSON, kept byte for byte.
    Raw {
        content_type: Option<HeaderValue>,
        bytes: Bytes,
    },
}

impl UpstreamResponse {
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            Some(UpstreamBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    async fn from_reqwest(response: reqwest::Response) -> Result<Self, AppError> {
        // reqwest and axum share the `http` crate, so the status carries over as is.
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let bytes = response.bytes().await?;

        if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            return Ok(Self { status, body: None });
        }

        let body = match serde_json::from_slice(&bytes) {
            Ok(value) => UpstreamBody::Json(value),
            Err(_) => {
                tracing::warn!("Ratings service answered {} with a non-JSON body", status);
                UpstreamBody::Raw {
                    content_type,
                    bytes,
                }
            }
        };

        Ok(Self {
            status,
            body: Some(body),
        })
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }

        match self.body {
            Some(UpstreamBody::Json(body)) => (self.status, Json(body)).into_response(),
            Some(UpstreamBody::Raw {
                content_type,
                bytes,
            }) => {
                let mut response = (self.status, bytes).into_response();
                match content_type {
                    Some(content_type) => {
                        response.headers_mut().insert(CONTENT_TYPE, content_type);
                    }
                    None => {
                        response.headers_mut().remove(CONTENT_TYPE);
                    }
                }
                response
            }
            None => self.status.into_response(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RatingsClient {
    http: Client,
    base_url: String,
}

impl RatingsClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn collection_url(&self, music_id: Uuid) -> String {
        format!("{}/musics/{}/ratings/", self.base_url, music_id)
    }

    fn rating_url(&self, music_id: Uuid, rating_id: Uuid) -> String {
        format!("{}{}", self.collection_url(music_id), rating_id)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<UpstreamResponse, AppError> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Ratings service unreachable on {} {}: {}", method, url, e);
            AppError::from(e)
        })?;

        UpstreamResponse::from_reqwest(response).await
    }

    pub async fn list(&self, music_id: Uuid) -> Result<UpstreamResponse, AppError> {
        self.send::<()>(Method::GET, self.collection_url(music_id), None)
            .await
    }

    pub async fn get(&self, music_id: Uuid, rating_id: Uuid) -> Result<UpstreamResponse, AppError> {
        self.send::<()>(Method::GET, self.rating_url(music_id, rating_id), None)
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(
        &self,
        music_id: Uuid,
        body: &B,
    ) -> Result<UpstreamResponse, AppError> {
        self.send(Method::POST, self.collection_url(music_id), Some(body))
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        music_id: Uuid,
        rating_id: Uuid,
        body: &B,
    ) -> Result<UpstreamResponse, AppError> {
        self.send(Method::PUT, self.rating_url(music_id, rating_id), Some(body))
            .await
    }

    pub async fn delete(
        &self,
        music_id: Uuid,
        rating_id: Uuid,
    ) -> Result<UpstreamResponse, AppError> {
        self.send::<()>(Method::DELETE, self.rating_url(music_id, rating_id), None)
            .await
    }
}
