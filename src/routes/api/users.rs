use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::models::{NewUser, User};
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::routes::api::created;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user))
}

async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let conn = state.db.get()?;
    Ok(Json(users::list(&conn)?))
}

async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<User>> {
    let conn = state.db.get()?;
    users::find(&conn, id)?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> AppResult<Response> {
    let conn = state.db.get()?;
    let user = users::create(&conn, &input)?;
    tracing::info!(user_id = user.id, role = user.role.as_str(), "Created user");
    Ok(created(format!("/api/users/{}", user.id), user))
}
