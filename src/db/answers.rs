use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::models::{Answer, NewAnswer, VoteOutcome};

const COLUMNS: &str = "id, post_id, content, author_id, created_at, votes, is_accepted";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Answer> {
    Ok(Answer {
        id: row.get(0)?,
        post_id: row.get(1)?,
        content: row.get(2)?,
        author_id: row.get(3)?,
        created_at: row.get(4)?,
        votes: row.get(5)?,
        is_accepted: row.get(6)?,
    })
}

pub fn list_for_post(conn: &Connection, post_id: i64) -> rusqlite::Result<Vec<Answer>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM answers WHERE post_id = ?1 ORDER BY id",
        COLUMNS
    ))?;
    let answers = stmt.query_map(params![post_id], from_row)?.collect();
    answers
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<Answer>> {
    conn.query_row(
        &format!("SELECT {} FROM answers WHERE id = ?1", COLUMNS),
        params![id],
        from_row,
    )
    .optional()
}

/// Inserts an unaccepted answer with no votes. The post and author must
/// exist; otherwise the foreign keys reject the row.
pub fn create(conn: &Connection, new: &NewAnswer) -> rusqlite::Result<Answer> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO answers (post_id, content, author_id, created_at, votes, is_accepted)
         VALUES (?1, ?2, ?3, ?4, 0, 0)",
        params![new.post_id, new.content, new.author_id, created_at],
    )?;

    Ok(Answer {
        id: conn.last_insert_rowid(),
        post_id: new.post_id,
        content: new.content.clone(),
        author_id: new.author_id,
        created_at,
        votes: 0,
        is_accepted: false,
    })
}

/// Adds `direction` to the answer's votes. A total that would leave the
/// integer range is refused rather than stored.
pub fn vote(conn: &Connection, id: i64, direction: i32) -> rusqlite::Result<VoteOutcome> {
    let votes: Option<i64> = conn
        .query_row(
            "UPDATE answers SET votes = votes + ?2
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
        "SELECT EXISTS(SELECT 1 FROM answers WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(if exists {
        VoteOutcome::OutOfRange
    } else {
        VoteOutcome::Missing
    })
}

/// Marks `id` as the accepted answer of its post and clears the flag on every
/// sibling, in one statement. Returns `false` when the answer does not exist.
pub fn accept(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let updated = conn.execute(
        "UPDATE answers SET is_accepted = (id = ?1)
         WHERE post_id = (SELECT post_id FROM answers WHERE id = ?1)",
        params![id],
    )?;
    Ok(updated > 0)
}
