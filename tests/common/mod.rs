//! Mock musics/ratings services and helpers for driving the gateway router.

#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use ratings_gateway::{auth::generate_jwt, config::Config, create_app, state::AppState};
use serde_json::{Value, json};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio::{net::TcpListener, sync::Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-secret";

#[derive(Default)]
pub struct MockStore {
    pub musics: HashSet<Uuid>,
    pub ratings: HashMap<Uuid, Value>,
    /// Bodies received on POST/PUT, in arrival order.
    pub received: Vec<(Method, Value)>,
    pub gets: usize,
    pub deletes: usize,
}

pub type SharedStore = Arc<Mutex<MockStore>>;

pub struct MockDownstream {
    pub base_url: String,
    pub store: SharedStore,
}

impl MockDownstream {
    pub async fn add_music(&self) -> Uuid {
        let music_id = Uuid::new_v4();
        self.store.lock().await.musics.insert(music_id);
        music_id
    }

    pub async fn add_rating(&self, music_id: Uuid, user_id: Uuid) -> Uuid {
        let rating_id = Uuid::new_v4();
        let rating = json!({
            "id": rating_id,
            "comment": "solid track",
            "rating": 3,
            "rating_date": "2026-10-01T12:00:00Z",
            "music_id": music_id,
            "user_id": user_id,
        });
        self.store.lock().await.ratings.insert(rating_id, rating);
        rating_id
    }

    pub async fn rating(&self, rating_id: Uuid) -> Option<Value> {
        self.store.lock().await.ratings.get(&rating_id).cloned()
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({"message": message, "code": status.as_u16()})),
    )
        .into_response()
}

async fn get_music(State(store): State<SharedStore>, Path(music_id): Path<Uuid>) -> Response {
    if store.lock().await.musics.contains(&music_id) {
        Json(json!({"id": music_id})).into_response()
    } else {
        error_body(StatusCode::NOT_FOUND, "music not found")
    }
}

async fn list_ratings(State(store): State<SharedStore>, Path(music_id): Path<Uuid>) -> Response {
    let mut store = store.lock().await;
    store.gets += 1;
    let ratings: Vec<Value> = store
        .ratings
        .values()
        .filter(|r| r["music_id"] == json!(music_id))
        .cloned()
        .collect();
    Json(ratings).into_response()
}

async fn add_rating(
    State(store): State<SharedStore>,
    Path(music_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = store.lock().await;
    store.received.push((Method::POST, body.clone()));

    let (Some(comment), Some(rating), Some(user_id)) = (
        body.get("comment"),
        body.get("rating").and_then(Value::as_i64),
        body.get("user_id"),
    ) else {
        return error_body(StatusCode::UNPROCESSABLE_ENTITY, "missing fields");
    };
    if !(0..=5).contains(&rating) {
        return error_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            "rating must be between 0 and 5",
        );
    }

    let rating_id = Uuid::new_v4();
    let created = json!({
        "id": rating_id,
        "comment": comment,
        "rating": rating,
        "rating_date": "2026-10-19T08:00:00Z",
        "music_id": music_id,
        "user_id": user_id,
    });
    store.ratings.insert(rating_id, created.clone());

    (StatusCode::CREATED, Json(created)).into_response()
}

async fn get_rating(
    State(store): State<SharedStore>,
    Path((_music_id, rating_id)): Path<(Uuid, Uuid)>,
) -> Response {
    let mut store = store.lock().await;
    store.gets += 1;
    match store.ratings.get(&rating_id) {
        Some(rating) => Json(rating.clone()).into_response(),
        None => error_body(StatusCode::NOT_FOUND, "rating not found"),
    }
}

async fn modify_rating(
    State(store): State<SharedStore>,
    Path((_music_id, rating_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = store.lock().await;
    store.received.push((Method::PUT, body.clone()));

    let Some(rating) = store.ratings.get_mut(&rating_id) else {
        return error_body(StatusCode::NOT_FOUND, "rating not found");
    };
    if let (Some(stored), Some(update)) = (rating.as_object_mut(), body.as_object()) {
        for (key, value) in update {
            stored.insert(key.clone(), value.clone());
        }
    }

    Json(rating.clone()).into_response()
}

async fn delete_rating(
    State(store): State<SharedStore>,
    Path((_music_id, rating_id)): Path<(Uuid, Uuid)>,
) -> StatusCode {
    let mut store = store.lock().await;
    store.deletes += 1;
    store.ratings.remove(&rating_id);
    StatusCode::NO_CONTENT
}

/// Starts the mock musics/ratings service on an ephemeral local port.
pub async fn start_mock_downstream() -> MockDownstream {
    let store: SharedStore = Default::default();

    let router = Router::new()
        .route("/musics/{music_id}", get(get_music))
        .route(
            "/musics/{music_id}/ratings/",
            get(list_ratings).post(add_rating),
        )
        .route(
            "/musics/{music_id}/ratings/{rating_id}",
            get(get_rating).put(modify_rating).delete(delete_rating),
        )
        .with_state(store.clone());

    MockDownstream {
        base_url: serve(router).await,
        store,
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

pub fn gateway(downstream: &MockDownstream) -> Router {
    gateway_for(&downstream.base_url, &downstream.base_url)
}

pub fn gateway_for(ratings_url: &str, musics_url: &str) -> Router {
    gateway_with_env(ratings_url, musics_url, &[])
}

pub fn gateway_with_env(ratings_url: &str, musics_url: &str, extra: &[(&str, &str)]) -> Router {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), JWT_SECRET.to_string()),
        ("RATINGS_API_URL".to_string(), ratings_url.to_string()),
        ("MUSICS_API_URL".to_string(), musics_url.to_string()),
    ]);
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

    create_app(AppState::new(config))
}

pub fn token_for(user_id: Uuid) -> String {
    generate_jwt(user_id, JWT_SECRET).unwrap()
}

/// Sends one request through the gateway and returns status plus JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<Value>) {
    let (status, _, bytes) = send_raw(app, method, uri, token, body).await;

    let body = if bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(&bytes).ok()
    };

    (status, body)
}

/// Like [`send`], but hands back headers and the undecoded body.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, bytes)
}
