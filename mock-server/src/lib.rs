use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub name: String,
    pub description: String,
}

/// Shape of the `GET /v1/posts` body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListEnvelope {
    #[default]
    Bare,
    Wrapped,
}

impl ListEnvelope {
    /// Reads `LIST_ENVELOPE`; anything other than `wrapped` means bare.
    pub fn from_env() -> Self {
        match std::env::var("LIST_ENVELOPE") {
            Ok(v) if v.eq_ignore_ascii_case("wrapped") => ListEnvelope::Wrapped,
            _ => ListEnvelope::Bare,
        }
    }
}

/// Posts newest first.
type Db = Arc<RwLock<Vec<Post>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    envelope: ListEnvelope,
}

pub fn app() -> Router {
    app_with(ListEnvelope::default())
}

pub fn app_with(envelope: ListEnvelope) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Vec::new())),
        envelope,
    };
    Router::new()
        .route("/v1/posts", get(list_posts).post(create_post))
        .route("/v1/posts/{id}", delete(delete_post))
        .with_state(state)
}

pub async fn run_with(listener: TcpListener, envelope: ListEnvelope) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(envelope)).await
}

async fn list_posts(State(state): State<AppState>) -> Response {
    let posts = state.db.read().await.clone();
    match state.envelope {
        ListEnvelope::Bare => Json(posts).into_response(),
        ListEnvelope::Wrapped => Json(serde_json::json!({ "posts": posts })).into_response(),
    }
}

async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>), (StatusCode, Json<serde_json::Value>)> {
    if input.name.trim().is_empty() || input.description.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "name and description are required" })),
        ));
    }
    let post = Post {
        id: Uuid::new_v4(),
        name: input.name,
        description: input.description,
    };
    state.db.write().await.insert(0, post.clone());
    log::info!("created post {}", post.id);
    Ok((StatusCode::CREATED, Json(post)))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut posts = state.db.write().await;
    let index = posts.iter().position(|p| p.id == id).ok_or(StatusCode::NOT_FOUND)?;
    posts.remove(index);
    log::info!("deleted post {id}");
    Ok(StatusCode::NO_CONTENT)
}
