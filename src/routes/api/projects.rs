use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::models::{NewProject, Project};
use crate::db::projects;
use crate::error::{AppError, AppResult};
use crate::routes::api::created;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/{id}", get(get_project))
}

async fn list_projects(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let conn = state.db.get()?;
    Ok(Json(projects::list(&conn)?))
}

async fn get_project(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Project>> {
    let conn = state.db.get()?;
    projects::find(&conn, id)?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<NewProject>,
) -> AppResult<Response> {
    let conn = state.db.get()?;
    let project = projects::create(&conn, &input)?;
    tracing::info!(project_id = project.id, name = %project.name, "Created project");
    Ok(created(format!("/api/projects/{}", project.id), project))
}
