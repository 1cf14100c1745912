use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::models::{NewTag, Tag};

fn from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn list(conn: &Connection) -> rusqlite::Result<Vec<Tag>> {
    let mut stmt = conn.prepare("SELECT id, name FROM tags ORDER BY id")?;
    let tags = stmt.query_map([], from_row)?.collect();
    tags
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<Tag>> {
    conn.query_row(
        "SELECT id, name FROM tags WHERE id = ?1",
        params![id],
        from_row,
    )
    .optional()
}

/// Case-insensitive lookup, used to resolve tag names typed into the ask form.
pub fn find_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<Tag>> {
    conn.query_row(
        "SELECT id, name FROM tags WHERE name = ?1 COLLATE NOCASE ORDER BY id LIMIT 1",
        params![name],
        from_row,
    )
    .optional()
}

pub fn create(conn: &Connection, new: &NewTag) -> rusqlite::Result<Tag> {
    conn.execute("INSERT INTO tags (name) VALUES (?1)", params![new.name])?;

    Ok(Tag {
        id: conn.last_insert_rowid(),
        name: new.name.clone(),
    })
}
