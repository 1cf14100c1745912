use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::models::{NewUser, User};

fn from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        avatar: row.get(3)?,
        role: row.get(4)?,
    })
}

pub fn list(conn: &Connection) -> rusqlite::Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, name, email, avatar, role FROM users ORDER BY id")?;
    let users = stmt.query_map([], from_row)?.collect();
    users
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, name, email, avatar, role FROM users WHERE id = ?1",
        params![id],
        from_row,
    )
    .optional()
}

pub fn create(conn: &Connection, new: &NewUser) -> rusqlite::Result<User> {
    conn.execute(
        "INSERT INTO users (name, email, avatar, role) VALUES (?1, ?2, ?3, ?4)",
        params![new.name, new.email, new.avatar, new.role],
    )?;

    Ok(User {
        id: conn.last_insert_rowid(),
        name: new.name.clone(),
        email: new.email.clone(),
        avatar: new.avatar.clone(),
        role: new.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Role;
    use crate::db::test_pool;

    fn alice() -> NewUser {
        NewUser {
            name: "Alice".into(),
            email: "alice@company.com".into(),
            avatar: "https://example.com/a.png".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn create_then_find_round_trips_fields() {
        let pool = test_pool();
        let conn = pool.get().unwrap();

        let created = create(&conn, &alice()).unwrap();
        let found = find(&conn, created.id).unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.role, Role::Admin);
    }

    #[test]
    fn find_missing_returns_none() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        assert!(find(&conn, 404).unwrap().is_none());
    }

    #[test]
    fn ids_are_unique() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let a = create(&conn, &alice()).unwrap();
        let b = create(&conn, &alice()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(list(&conn).unwrap().len(), 2);
    }
}
