use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::models::{NewProject, Project};

fn from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        color: row.get(3)?,
    })
}

pub fn list(conn: &Connection) -> rusqlite::Result<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT id, name, description, color FROM projects ORDER BY id")?;
    let projects = stmt.query_map([], from_row)?.collect();
    projects
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<Project>> {
    conn.query_row(
        "SELECT id, name, description, color FROM projects WHERE id = ?1",
        params![id],
        from_row,
    )
    .optional()
}

pub fn create(conn: &Connection, new: &NewProject) -> rusqlite::Result<Project> {
    conn.execute(
        "INSERT INTO projects (name, description, color) VALUES (?1, ?2, ?3)",
        params![new.name, new.description, new.color],
    )?;

    Ok(Project {
        id: conn.last_insert_rowid(),
        name: new.name.clone(),
        description: new.description.clone(),
        color: new.color.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[test]
    fn create_then_find() {
        let pool = test_pool();
        let conn = pool.get().unwrap();

        let created = create(
            &conn,
            &NewProject {
                name: "Helios Core".into(),
                description: "Main backend infrastructure".into(),
                color: "bg-indigo-500".into(),
            },
        )
        .unwrap();

        assert_eq!(find(&conn, created.id).unwrap(), Some(created.clone()));
        assert_eq!(list(&conn).unwrap(), vec![created]);
    }

    #[test]
    fn find_missing_returns_none() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        assert!(find(&conn, 1).unwrap().is_none());
    }
}
