use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::models::{NewPost, PostDetail, PostSummary, Vote, VoteOutcome, VoteTally};
use crate::db::posts;
use crate::error::{AppError, AppResult};
use crate::routes::api::created;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub project_id: Option<i64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", get(get_post))
        .route("/api/posts/{id}/vote", post(vote_post))
}

async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PostSummary>>> {
    let conn = state.db.get()?;
    Ok(Json(posts::list(&conn, query.project_id)?))
}

/// Every successful read counts as a view.
async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostDetail>> {
    let mut conn = state.db.get()?;
    posts::view(&mut conn, id)?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<NewPost>,
) -> AppResult<Response> {
    let mut conn = state.db.get()?;
    let post = posts::create(&mut conn, &input)?;
    tracing::info!(
        post_id = post.id,
        project_id = post.project_id,
        anonymous = post.is_anonymous,
        "Created post"
    );
    Ok(created(format!("/api/posts/{}", post.id), post))
}

async fn vote_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(vote): Json<Vote>,
) -> AppResult<Json<VoteTally>> {
    let conn = state.db.get()?;
    match posts::vote(&conn, id, vote.direction)? {
        VoteOutcome::Counted(votes) => Ok(Json(VoteTally { votes })),
        VoteOutcome::OutOfRange => Err(AppError::BadRequest("Vote total out of range".into())),
        VoteOutcome::Missing => Err(AppError::NotFound),
    }
}
