//! JSON endpoints under `/api`. Bodies and responses use camelCase field
//! names; a missing row is a bare 404.

pub mod answers;
pub mod posts;
pub mod projects;
pub mod tags;
pub mod users;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(posts::router())
        .merge(answers::router())
        .merge(projects::router())
        .merge(tags::router())
        .merge(users::router())
}

/// 201 with a `Location` pointing at the new resource.
pub(crate) fn created<T: Serialize>(location: String, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}
