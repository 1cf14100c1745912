use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::db::models::Project;
use crate::db::posts;
use crate::error::AppResult;
use crate::routes::home::{not_found_page, Html};
use crate::routes::view::{Directory, NavProject, QuestionCard};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/project.html")]
pub struct ProjectTemplate {
    pub nav: Vec<NavProject>,
    pub project: Project,
    pub questions: Vec<QuestionCard>,
    pub answered: usize,
    pub answer_rate: u32,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/project/{id}", get(project_page))
}

async fn project_page(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Response> {
    let conn = state.db.get()?;
    let directory = Directory::load(&conn)?;

    let Some(project) = directory.project(id).cloned() else {
        return not_found_page(&conn);
    };

    let questions: Vec<QuestionCard> = posts::list(&conn, Some(id))?
        .iter()
        .map(|p| directory.card(p))
        .collect();
    let answered = questions.iter().filter(|q| q.answers > 0).count();

    Ok(Html(ProjectTemplate {
        nav: directory.nav(),
        project,
        answer_rate: answer_rate(answered, questions.len()),
        answered,
        questions,
    })
    .into_response())
}

/// Share of questions with at least one answer, as a whole percentage.
fn answer_rate(answered: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((answered * 100) / total) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_rate_of_empty_project_is_zero() {
        assert_eq!(answer_rate(0, 0), 0);
    }

    #[test]
    fn answer_rate_rounds_down() {
        assert_eq!(answer_rate(2, 3), 66);
        assert_eq!(answer_rate(3, 3), 100);
    }
}
