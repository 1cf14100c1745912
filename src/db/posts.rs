use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::answers;
use crate::db::models::{NewPost, PostDetail, PostSummary, VoteOutcome};

const SUMMARY_COLUMNS: &str = "p.id, p.title, p.content, p.author_id, p.project_id,
    p.created_at, p.votes, p.views, p.is_anonymous,
    (SELECT COUNT(*) FROM answers a WHERE a.post_id = p.id)";

/// Maps a `SUMMARY_COLUMNS` row. Tags are filled in separately.
fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<PostSummary> {
    Ok(PostSummary {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author_id: row.get(3)?,
        project_id: row.get(4)?,
        tags: Vec::new(),
        created_at: row.get(5)?,
        votes: row.get(6)?,
        views: row.get(7)?,
        is_anonymous: row.get(8)?,
        answers: row.get(9)?,
    })
}

/// All posts in id order, optionally restricted to one project.
pub fn list(conn: &Connection, project_id: Option<i64>) -> rusqlite::Result<Vec<PostSummary>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM posts p WHERE (?1 IS NULL OR p.project_id = ?1) ORDER BY p.id",
        SUMMARY_COLUMNS
    ))?;
    let mut posts = stmt
        .query_map(params![project_id], summary_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut tags = tags_by_post(conn)?;
    for post in &mut posts {
        if let Some(post_tags) = tags.remove(&post.id) {
            post.tags = post_tags;
        }
    }

    Ok(posts)
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<PostSummary>> {
    let summary = conn
        .query_row(
            &format!("SELECT {} FROM posts p WHERE p.id = ?1", SUMMARY_COLUMNS),
            params![id],
            summary_from_row,
        )
        .optional()?;

    match summary {
        Some(mut post) => {
            post.tags = tag_ids(conn, id)?;
            Ok(Some(post))
        }
        None => Ok(None),
    }
}

/// Counts a view and returns the post with its answers. Returns `None`, and
/// writes nothing, when the post does not exist.
pub fn view(conn: &mut Connection, id: i64) -> rusqlite::Result<Option<PostDetail>> {
    let tx = conn.transaction()?;

    let updated = tx.execute(
        "UPDATE posts SET views = views + 1 WHERE id = ?1",
        params![id],
    )?;
    if updated == 0 {
        return Ok(None);
    }

    let Some(summary) = find(&tx, id)? else {
        return Ok(None);
    };
    let answers = answers::list_for_post(&tx, id)?;
    tx.commit()?;

    Ok(Some(PostDetail::new(summary, answers)))
}

/// Inserts the post and one tag row per distinct tag id in a single
/// transaction. Anonymous posts never keep an author.
pub fn create(conn: &mut Connection, new: &NewPost) -> rusqlite::Result<PostSummary> {
    let author_id = if new.is_anonymous { None } else { new.author_id };
    let created_at = Utc::now();

    let mut tags = Vec::with_capacity(new.tags.len());
    for tag in &new.tags {
        if !tags.contains(tag) {
            tags.push(*tag);
        }
    }
    tags.sort_unstable();

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO posts (title, content, author_id, project_id, created_at, votes, views, is_anonymous)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, ?6)",
        params![
            new.title,
            new.content,
            author_id,
            new.project_id,
            created_at,
            new.is_anonymous
        ],
    )?;
    let id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare("INSERT INTO post_tags (post_id, tag_id) VALUES (?1, ?2)")?;
        for tag in &tags {
            stmt.execute(params![id, tag])?;
        }
    }
    tx.commit()?;

    Ok(PostSummary {
        id,
        title: new.title.clone(),
        content: new.content.clone(),
        author_id,
        project_id: new.project_id,
        tags,
        created_at,
        votes: 0,
        views: 0,
        answers: 0,
        is_anonymous: new.is_anonymous,
    })
}

/// Adds `direction` to the post's votes. A total that would leave the
/// integer range is refused rather than stored.
pub fn vote(conn: &Connection, id: i64, direction: i32) -> rusqlite::Result<VoteOutcome> {
    let votes: Option<i64> = conn
        .query_row(
            "UPDATE posts SET votes = votes + ?2
             WHERE id = ?1 AND typeof(votes + ?2) = 'integer'
             RETURNING votes",
            params![id, direction],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(votes) = votes {
        return Ok(VoteOutcome::Counted(votes));
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(if exists {
        VoteOutcome::OutOfRange
    } else {
        VoteOutcome::Missing
    })
}

fn tag_ids(conn: &Connection, post_id: i64) -> rusqlite::Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT tag_id FROM post_tags WHERE post_id = ?1 ORDER BY tag_id")?;
    let ids = stmt.query_map(params![post_id], |row| row.get(0))?.collect();
    ids
}

fn tags_by_post(conn: &Connection) -> rusqlite::Result<HashMap<i64, Vec<i64>>> {
    let mut stmt = conn.prepare("SELECT post_id, tag_id FROM post_tags ORDER BY post_id, tag_id")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;

    let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
    for row in rows {
        let (post_id, tag_id) = row?;
        map.entry(post_id).or_default().push(tag_id);
    }
    Ok(map)
}
