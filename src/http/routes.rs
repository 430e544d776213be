use axum::{Router, routing::get};

use crate::{
    http::handlers::{
        create_rating_handler, delete_rating_handler, get_rating_handler, get_ratings_handler,
        health_handler, modify_rating_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/musics/{music_id}/ratings",
            get(get_ratings_handler).post(create_rating_handler),
        )
        .route(
            "/musics/{music_id}/ratings/",
            get(get_ratings_handler).post(create_rating_handler),
        )
        .route(
            "/musics/{music_id}/ratings/{rating_id}",
            get(get_rating_handler)
                .put(modify_rating_handler)
                .delete(delete_rating_handler),
        )
        .with_state(state)
}
