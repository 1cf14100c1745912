use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rusqlite::Connection;

use crate::db::models::Tag;
use crate::db::posts;
use crate::error::AppResult;
use crate::routes::view::{Directory, NavProject, QuestionCard};
use crate::state::AppState;

/// Projects shown in the home sidebar card.
const FEATURED_PROJECTS: usize = 3;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub nav: Vec<NavProject>,
    pub interesting: Vec<QuestionCard>,
    pub hot: Vec<QuestionCard>,
    pub tags: Vec<Tag>,
    pub featured: Vec<NavProject>,
}

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate;

#[derive(Template)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub nav: Vec<NavProject>,
}

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<HomeTemplate>> {
    let conn = state.db.get()?;
    let directory = Directory::load(&conn)?;
    let posts = posts::list(&conn, None)?;

    let interesting: Vec<QuestionCard> = posts.iter().map(|p| directory.card(p)).collect();
    let mut hot = interesting.clone();
    hot.sort_by(|a, b| b.votes.cmp(&a.votes));

    let nav = directory.nav();
    let featured = nav.iter().take(FEATURED_PROJECTS).cloned().collect();

    Ok(Html(HomeTemplate {
        nav,
        interesting,
        hot,
        tags: directory.tags,
        featured,
    }))
}

pub async fn login() -> Html<LoginTemplate> {
    Html(LoginTemplate)
}

pub async fn fallback(State(state): State<AppState>) -> AppResult<Response> {
    let conn = state.db.get()?;
    not_found_page(&conn)
}

/// Full-layout 404 page for unknown paths and missing questions/projects.
pub fn not_found_page(conn: &Connection) -> AppResult<Response> {
    let nav = Directory::load(conn)?.nav();
    Ok((StatusCode::NOT_FOUND, Html(NotFoundTemplate { nav })).into_response())
}
