use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    clients::UpstreamResponse,
    errors::AppError,
    models::{RatingInput, RatingOwner},
    state::AppState,
};

async fn ensure_music_exists(state: &AppState, music_id: Uuid) -> Result<(), AppError> {
    if state.musics.music_exists(music_id).await? {
        Ok(())
    } else {
        tracing::warn!("Music {} not found", music_id);
        Err(AppError::NotFound(format!("music {} not found", music_id)))
    }
}

fn ensure_owner(rating: &UpstreamResponse, user_id: Uuid) -> Result<(), AppError> {
    let owner = RatingOwner::from_body(rating.json())?;
    if owner.is(user_id) {
        Ok(())
    } else {
        tracing::warn!("User {} does not own the rating", user_id);
        Err(AppError::Forbidden("rating belongs to another user".into()))
    }
}

pub async fn get_ratings(state: &AppState, music_id: Uuid) -> Result<UpstreamResponse, AppError> {
    ensure_music_exists(state, music_id).await?;
    state.ratings.list(music_id).await
}

pub async fn create_rating(
    state: &AppState,
    music_id: Uuid,
    user_id: Uuid,
    payload: Value,
) -> Result<UpstreamResponse, AppError> {
    ensure_music_exists(state, music_id).await?;

    let new_rating = RatingInput::load(payload)?.with_owner(user_id);

    state.ratings.create(music_id, &new_rating).await
}

pub async fn get_rating(
    state: &AppState,
    music_id: Uuid,
    rating_id: Uuid,
) -> Result<UpstreamResponse, AppError> {
    ensure_music_exists(state, music_id).await?;
    state.ratings.get(music_id, rating_id).await
}

/// Deleting a rating that is already gone answers `204`.
pub async fn delete_rating(
    state: &AppState,
    music_id: Uuid,
    rating_id: Uuid,
    user_id: Uuid,
) -> Result<UpstreamResponse, AppError> {
    let existing = get_rating(state, music_id, rating_id).await?;

    match existing.status {
        StatusCode::NOT_FOUND => {
            tracing::info!("Rating {} already absent, nothing to delete", rating_id);
            return Ok(UpstreamResponse::no_content());
        }
        StatusCode::OK => {}
        _ => return Ok(existing),
    }

    ensure_owner(&existing, user_id)?;

    let response = state.ratings.delete(music_id, rating_id).await?;
    if response.status == StatusCode::NO_CONTENT {
        tracing::info!("Rating {} deleted by user {}", rating_id, user_id);
        return Ok(UpstreamResponse::no_content());
    }

    Ok(response)
}

pub async fn modify_rating(
    state: &AppState,
    music_id: Uuid,
    rating_id: Uuid,
    user_id: Uuid,
    payload: Value,
) -> Result<UpstreamResponse, AppError> {
    let existing = get_rating(state, music_id, rating_id).await?;
    if existing.status != StatusCode::OK {
        return Ok(existing);
    }

    ensure_owner(&existing, user_id)?;

    let rating_update = RatingInput::load(payload)?;

    state.ratings.update(music_id, rating_id, &rating_update).await
}
