use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::answers;
use crate::db::models::{Answer, NewAnswer, Vote, VoteOutcome, VoteTally};
use crate::error::{AppError, AppResult};
use crate::routes::api::created;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub post_id: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/answers", get(list_answers).post(create_answer))
        .route("/api/answers/{id}", get(get_answer))
        .route("/api/answers/{id}/vote", post(vote_answer))
        .route("/api/answers/{id}/accept", post(accept_answer))
}

async fn list_answers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Answer>>> {
    let conn = state.db.get()?;
    Ok(Json(answers::list_for_post(&conn, query.post_id)?))
}

async fn create_answer(
    State(state): State<AppState>,
    Json(input): Json<NewAnswer>,
) -> AppResult<Response> {
    let conn = state.db.get()?;
    let answer = answers::create(&conn, &input)?;
    tracing::info!(answer_id = answer.id, post_id = answer.post_id, "Created answer");
    Ok(created(format!("/api/answers/{}", answer.id), answer))
}

async fn get_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Answer>> {
    let conn = state.db.get()?;
    answers::find(&conn, id)?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn vote_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(vote): Json<Vote>,
) -> AppResult<Json<VoteTally>> {
    let conn = state.db.get()?;
    match answers::vote(&conn, id, vote.direction)? {
        VoteOutcome::Counted(votes) => Ok(Json(VoteTally { votes })),
        VoteOutcome::OutOfRange => Err(AppError::BadRequest("Vote total out of range".into())),
        VoteOutcome::Missing => Err(AppError::NotFound),
    }
}

async fn accept_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let conn = state.db.get()?;
    if !answers::accept(&conn, id)? {
        return Err(AppError::NotFound);
    }
    tracing::info!(answer_id = id, "Accepted answer");
    Ok(StatusCode::OK)
}
