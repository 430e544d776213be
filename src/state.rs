use std::sync::Arc;

use crate::{
    clients::{HttpMusicCatalog, MusicCatalog, RatingsClient},
    config::Config,
    middleware::{IpRateLimiter, create_rate_limiter},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ratings: RatingsClient,
    pub musics: SharedMusicCatalog,
    pub rate_limiter: IpRateLimiter,
}

pub type SharedMusicCatalog = Arc<dyn MusicCatalog>;

impl AppState {
    pub fn new(config: Config) -> Self {
        // One pooled client for both downstream services.
        let http = reqwest::Client::new();

        let ratings = RatingsClient::new(http.clone(), config.ratings_api_url.clone());
        let musics: SharedMusicCatalog =
            Arc::new(HttpMusicCatalog::new(http, config.musics_api_url.clone()));

        let rate_limiter = create_rate_limiter(config.rate_limit_per_minute);

        Self {
            config: Arc::new(config),
            ratings,
            musics,
            rate_limiter,
        }
    }
}
