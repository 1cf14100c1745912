use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::db::models::{PostSummary, Project, Tag, User};
use crate::db::{projects, tags, users};

// --- View structs ---

#[derive(Debug, Clone)]
pub struct NavProject {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct QuestionCard {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub project_id: i64,
    pub project_name: String,
    pub project_color: String,
    pub tags: Vec<String>,
    pub votes: i64,
    pub answers: i64,
    pub views: i64,
    pub author: String,
    pub is_anonymous: bool,
    pub created_at: String,
}

/// Names and colors for everything a page may reference by id, loaded once
/// per request.
pub struct Directory {
    pub users: HashMap<i64, User>,
    pub projects: Vec<Project>,
    pub tags: Vec<Tag>,
}

impl Directory {
    pub fn load(conn: &Connection) -> rusqlite::Result<Self> {
        let users = users::list(conn)?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        Ok(Self {
            users,
            projects: projects::list(conn)?,
            tags: tags::list(conn)?,
        })
    }

    pub fn nav(&self) -> Vec<NavProject> {
        self.projects
            .iter()
            .map(|p| NavProject {
                id: p.id,
                name: p.name.clone(),
                description: p.description.clone(),
                color: p.color.clone(),
            })
            .collect()
    }

    pub fn project(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn tag_name(&self, id: i64) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    pub fn author_name(&self, author_id: Option<i64>) -> String {
        match author_id {
            None => "Anonymous".to_string(),
            Some(id) => self
                .users
                .get(&id)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| format!("User {}", id)),
        }
    }

    pub fn card(&self, post: &PostSummary) -> QuestionCard {
        let project = self.project(post.project_id);
        QuestionCard {
            id: post.id,
            title: post.title.clone(),
            excerpt: excerpt(&post.content, 180),
            project_id: post.project_id,
            project_name: project.map(|p| p.name.clone()).unwrap_or_default(),
            project_color: project.map(|p| p.color.clone()).unwrap_or_default(),
            tags: post
                .tags
                .iter()
                .filter_map(|id| self.tag_name(*id))
                .map(str::to_string)
                .collect(),
            votes: post.votes,
            answers: post.answers,
            views: post.views,
            author: self.author_name(post.author_id),
            is_anonymous: post.author_id.is_none(),
            created_at: format_relative_time(&post.created_at),
        }
    }
}

/// Plain-text preview: whitespace collapsed, cut at a char boundary.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

// --- Time formatting ---

pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let diff = Utc::now().signed_duration_since(*dt);

    let seconds = diff.num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = diff.num_minutes();
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = diff.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = diff.num_days();
    if days < 7 {
        return format!("{}d ago", days);
    }

    dt.format("%b %-d, %Y").to_string()
}
