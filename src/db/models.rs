use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(FromSqlError::Other(
                format!("unknown role: {}", other).into(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// CSS class used for the project's accent, e.g. `bg-indigo-500`.
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTag {
    pub name: String,
}

/// A post as it appears in feeds: tag ids and an answer count instead of
/// the answers themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: Option<i64>,
    pub project_id: i64,
    pub tags: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub views: i64,
    pub answers: i64,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: Option<i64>,
    pub project_id: i64,
    pub tags: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub views: i64,
    pub is_anonymous: bool,
    pub answers: Vec<Answer>,
}

impl PostDetail {
    pub fn new(summary: PostSummary, answers: Vec<Answer>) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            content: summary.content,
            author_id: summary.author_id,
            project_id: summary.project_id,
            tags: summary.tags,
            created_at: summary.created_at,
            votes: summary.votes,
            views: summary.views,
            is_anonymous: summary.is_anonymous,
            answers,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author_id: Option<i64>,
    pub project_id: i64,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub is_accepted: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnswer {
    pub post_id: i64,
    pub content: String,
    pub author_id: i64,
}

/// Request body for the vote endpoints. `direction` is added to the stored
/// total as-is.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Vote {
    pub direction: i32,
}

/// Result of applying a vote to a post or answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Counted(i64),
    /// The new total would not fit in an integer; nothing was written.
    OutOfRange,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub votes: i64,
}
