use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    clients::UpstreamResponse,
    errors::AppError,
    services::{create_rating, delete_rating, get_rating, get_ratings, modify_rating},
    state::AppState,
};

// Caller mistakes (unknown music, foreign rating, bad payload) are warnings.
fn reject(context: String, err: AppError) -> (StatusCode, String) {
    if err.is_client_error() {
        tracing::warn!("{}: {}", context, err);
    } else {
        tracing::error!("{}: {}", context, err);
    }
    err.to_response()
}

pub async fn get_ratings_handler(
    Path(music_id): Path<Uuid>,
    _claims: AuthClaims,
    State(state): State<AppState>,
) -> Result<UpstreamResponse, (StatusCode, String)> {
    get_ratings(&state, music_id)
        .await
        .map_err(|e| reject(format!("Error listing ratings of music {}", music_id), e))
}

pub async fn create_rating_handler(
    Path(music_id): Path<Uuid>,
    claims: AuthClaims,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<UpstreamResponse, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    let response = create_rating(&state, music_id, user_id, payload)
        .await
        .map_err(|e| reject(format!("Error creating rating on music {}", music_id), e))?;

    if response.status.is_success() {
        tracing::info!("User {} rated music {}", user_id, music_id);
    }
    Ok(response)
}

pub async fn get_rating_handler(
    Path((music_id, rating_id)): Path<(Uuid, Uuid)>,
    _claims: AuthClaims,
    State(state): State<AppState>,
) -> Result<UpstreamResponse, (StatusCode, String)> {
    get_rating(&state, music_id, rating_id)
        .await
        .map_err(|e| reject(format!("Error retrieving rating {}", rating_id), e))
}

pub async fn delete_rating_handler(
    Path((music_id, rating_id)): Path<(Uuid, Uuid)>,
    claims: AuthClaims,
    State(state): State<AppState>,
) -> Result<UpstreamResponse, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    delete_rating(&state, music_id, rating_id, user_id)
        .await
        .map_err(|e| reject(format!("Error deleting rating {}", rating_id), e))
}

pub async fn modify_rating_handler(
    Path((music_id, rating_id)): Path<(Uuid, Uuid)>,
    claims: AuthClaims,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<UpstreamResponse, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    let response = modify_rating(&state, music_id, rating_id, user_id, payload)
        .await
        .map_err(|e| reject(format!("Error updating rating {}", rating_id), e))?;

    if response.status.is_success() {
        tracing::info!("Rating {} updated by user {}", rating_id, user_id);
    }
    Ok(response)
}
