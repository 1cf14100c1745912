use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::db::models::{Answer, NewAnswer, User};
use crate::db::{answers, posts, users};
use crate::error::{AppError, AppResult};
use crate::routes::home::{not_found_page, Html};
use crate::routes::view::{format_relative_time, Directory, NavProject};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct AnswerView {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub votes: i64,
    pub is_accepted: bool,
    pub created_at: String,
}

#[derive(Template)]
#[template(path = "pages/question.html")]
pub struct QuestionTemplate {
    pub nav: Vec<NavProject>,
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub project_id: i64,
    pub project_name: String,
    pub project_color: String,
    pub tags: Vec<String>,
    pub votes: i64,
    pub views: i64,
    pub created_at: String,
    pub answers: Vec<AnswerView>,
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_id: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/question/{id}", get(question_page))
        .route("/question/{id}/answers", post(submit_answer))
}

/// Accepted answer first, then by votes; ties keep posting order.
fn ordered(mut answers: Vec<Answer>) -> Vec<Answer> {
    answers.sort_by(|a, b| {
        b.is_accepted
            .cmp(&a.is_accepted)
            .then(b.votes.cmp(&a.votes))
            .then(a.id.cmp(&b.id))
    });
    answers
}

async fn question_page(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Response> {
    let mut conn = state.db.get()?;
    let Some(post) = posts::view(&mut conn, id)? else {
        return not_found_page(&conn);
    };

    let directory = Directory::load(&conn)?;
    let project = directory.project(post.project_id);

    let answers = ordered(post.answers)
        .into_iter()
        .map(|a| AnswerView {
            id: a.id,
            content: a.content,
            author: directory.author_name(Some(a.author_id)),
            votes: a.votes,
            is_accepted: a.is_accepted,
            created_at: format_relative_time(&a.created_at),
        })
        .collect();

    let page = QuestionTemplate {
        nav: directory.nav(),
        id: post.id,
        title: post.title,
        content: post.content,
        author: directory.author_name(post.author_id),
        project_id: post.project_id,
        project_name: project.map(|p| p.name.clone()).unwrap_or_default(),
        project_color: project.map(|p| p.color.clone()).unwrap_or_default(),
        tags: post
            .tags
            .iter()
            .filter_map(|t| directory.tag_name(*t))
            .map(str::to_string)
            .collect(),
        votes: post.votes,
        views: post.views,
        created_at: format_relative_time(&post.created_at),
        answers,
        users: users::list(&conn)?,
    };
    Ok(Html(page).into_response())
}

async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<AnswerForm>,
) -> AppResult<Response> {
    let conn = state.db.get()?;
    if posts::find(&conn, id)?.is_none() {
        return not_found_page(&conn);
    }

    let content = form.content.trim();
    let author_id = form.author_id.trim().parse::<i64>().ok();
    let author_id = match author_id {
        Some(author_id) if users::find(&conn, author_id)?.is_some() => author_id,
        _ => return Err(AppError::BadRequest("Choose who is answering".into())),
    };
    if content.is_empty() {
        return Err(AppError::BadRequest("Answer cannot be empty".into()));
    }

    let answer = answers::create(
        &conn,
        &NewAnswer {
            post_id: id,
            content: content.to_string(),
            author_id,
        },
    )?;
    tracing::info!(answer_id = answer.id, post_id = id, "Answer posted");
    Ok(Redirect::to(&format!("/question/{}#answer-{}", id, answer.id)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn answer(id: i64, votes: i64, is_accepted: bool) -> Answer {
        Answer {
            id,
            post_id: 1,
            content: String::new(),
            author_id: 1,
            created_at: Utc::now(),
            votes,
            is_accepted,
        }
    }

    #[test]
    fn accepted_answer_comes_first() {
        let sorted = ordered(vec![answer(1, 10, false), answer(2, 1, true), answer(3, 5, false)]);
        let ids: Vec<i64> = sorted.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn equal_votes_keep_posting_order() {
        let sorted = ordered(vec![answer(4, 2, false), answer(3, 2, false)]);
        let ids: Vec<i64> = sorted.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
