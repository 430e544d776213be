use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use uuid::Uuid;

use crate::errors::AppError;

/// Answers whether a music exists before any rating call is forwarded.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    async fn music_exists(&self, music_id: Uuid) -> Result<bool, AppError>;
}

/// Looks musics up on the musics service (`GET /musics/{id}`).
#[derive(Debug, Clone)]
pub struct HttpMusicCatalog {
    http: Client,
    base_url: String,
}

impl HttpMusicCatalog {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MusicCatalog for HttpMusicCatalog {
    async fn music_exists(&self, music_id: Uuid) -> Result<bool, AppError> {
        let url = format!("{}/musics/{}", self.base_url, music_id);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::error!("Musics service unreachable: {}", e);
            AppError::from(e)
        })?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                tracing::error!("Musics service answered {} for music {}", status, music_id);
                Err(AppError::BadGateway(format!(
                    "musics service answered {}",
                    status
                )))
            }
        }
    }
}
