use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::models::{NewPost, Project, Tag, User};
use crate::db::{posts, projects, tags, users};
use crate::error::AppResult;
use crate::routes::home::Html;
use crate::routes::view::{Directory, NavProject};
use crate::state::AppState;

const MAX_TAGS: usize = 5;

#[derive(Template)]
#[template(path = "pages/ask.html")]
pub struct AskTemplate {
    pub nav: Vec<NavProject>,
    pub projects: Vec<Project>,
    pub tags: Vec<Tag>,
    pub users: Vec<User>,
    pub error: Option<String>,
    pub form: AskForm,
}

/// Fields arrive as strings so a rejected submission can be echoed back
/// into the form unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub project_id: String,
    /// Tag names separated by spaces or commas.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub author_id: String,
    pub anonymous: Option<String>,
}

impl AskForm {
    pub fn is_anonymous(&self) -> bool {
        self.anonymous.is_some()
    }

    pub fn selected_project(&self, id: &i64) -> bool {
        self.project_id == id.to_string()
    }

    pub fn selected_author(&self, id: &i64) -> bool {
        self.author_id == id.to_string()
    }

    /// Turns the submission into a post, resolving tag names to ids.
    pub fn validate(&self, conn: &Connection) -> AppResult<Result<NewPost, String>> {
        let title = self.title.trim();
        if title.is_empty() {
            return Ok(Err("Give your question a title.".into()));
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Ok(Err("Describe the problem in the body.".into()));
        }

        let Ok(project_id) = self.project_id.parse::<i64>() else {
            return Ok(Err("Pick a project.".into()));
        };
        if projects::find(conn, project_id)?.is_none() {
            return Ok(Err("Unknown project.".into()));
        }

        let author_id = match (self.is_anonymous(), self.author_id.trim()) {
            (true, _) => None,
            (false, "") => return Ok(Err("Choose who is asking, or post anonymously.".into())),
            (false, raw) => match raw.parse::<i64>() {
                Ok(id) if users::find(conn, id)?.is_some() => Some(id),
                _ => return Ok(Err("Unknown author.".into())),
            },
        };

        let names = split_tag_names(&self.tags);
        if names.len() > MAX_TAGS {
            return Ok(Err(format!("Use at most {} tags.", MAX_TAGS)));
        }
        let mut tag_ids = Vec::with_capacity(names.len());
        for name in names {
            match tags::find_by_name(conn, name)? {
                Some(tag) => tag_ids.push(tag.id),
                None => return Ok(Err(format!("Unknown tag: {}", name))),
            }
        }

        Ok(Ok(NewPost {
            title: title.to_string(),
            content: content.to_string(),
            author_id,
            project_id,
            tags: tag_ids,
            is_anonymous: self.is_anonymous(),
        }))
    }
}

fn split_tag_names(raw: &str) -> Vec<&str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ask", get(ask_page).post(submit_question))
}

fn render(
    conn: &Connection,
    form: AskForm,
    error: Option<String>,
) -> AppResult<AskTemplate> {
    let directory = Directory::load(conn)?;
    let users = users::list(conn)?;
    Ok(AskTemplate {
        nav: directory.nav(),
        projects: directory.projects,
        tags: directory.tags,
        users,
        error,
        form,
    })
}

async fn ask_page(State(state): State<AppState>) -> AppResult<Html<AskTemplate>> {
    let conn = state.db.get()?;
    Ok(Html(render(&conn, AskForm::default(), None)?))
}

async fn submit_question(
    State(state): State<AppState>,
    Form(form): Form<AskForm>,
) -> AppResult<Response> {
    let mut conn = state.db.get()?;

    let new_post = match form.validate(&conn)? {
        Ok(new_post) => new_post,
        Err(message) => {
            let page = render(&conn, form, Some(message))?;
            return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
        }
    };

    let post = posts::create(&mut conn, &new_post)?;
    tracing::info!(post_id = post.id, project_id = post.project_id, "Question asked");
    Ok(Redirect::to(&format!("/question/{}", post.id)).into_response())
}
