use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::models::{NewTag, Tag};
use crate::db::tags;
use crate::error::{AppError, AppResult};
use crate::routes::api::created;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tags", get(list_tags).post(create_tag))
        .route("/api/tags/{id}", get(get_tag))
}

async fn list_tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let conn = state.db.get()?;
    Ok(Json(tags::list(&conn)?))
}

async fn get_tag(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Tag>> {
    let conn = state.db.get()?;
    tags::find(&conn, id)?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn create_tag(
    State(state): State<AppState>,
    Json(input): Json<NewTag>,
) -> AppResult<Response> {
    let conn = state.db.get()?;
    let tag = tags::create(&conn, &input)?;
    Ok(created(format!("/api/tags/{}", tag.id), tag))
}
