//! Demo data inserted on first start, when the users table is empty.

use chrono::{Duration, Utc};
use rusqlite::{params, Transaction, TransactionBehavior};

use crate::db::models::Role;
use crate::state::DbPool;

struct SeedUser {
    name: &'static str,
    email: &'static str,
    avatar: &'static str,
    role: Role,
}

struct SeedProject {
    name: &'static str,
    description: &'static str,
    color: &'static str,
}

/// Indices below refer to positions in the other seed arrays, not row ids.
struct SeedPost {
    title: &'static str,
    content: &'static str,
    author: Option<usize>,
    project: usize,
    age_minutes: i64,
    votes: i64,
    views: i64,
    tags: &'static [usize],
}

struct SeedAnswer {
    post: usize,
    content: &'static str,
    author: usize,
    age_minutes: i64,
    votes: i64,
    is_accepted: bool,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        name: "Alex Rivera",
        email: "alex@company.com",
        avatar: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?auto=format&fit=facearea&facepad=2&w=256&h=256&q=80",
        role: Role::Admin,
    },
    SeedUser {
        name: "Sarah Chen",
        email: "sarah@company.com",
        avatar: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?auto=format&fit=facearea&facepad=2&w=256&h=256&q=80",
        role: Role::User,
    },
    SeedUser {
        name: "Mike Ross",
        email: "mike@company.com",
        avatar: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?auto=format&fit=facearea&facepad=2&w=256&h=256&q=80",
        role: Role::User,
    },
];

const PROJECTS: &[SeedProject] = &[
    SeedProject {
        name: "Helios Core",
        description: "Main backend infrastructure",
        color: "bg-indigo-500",
    },
    SeedProject {
        name: "Nebula UI",
        description: "Frontend component library",
        color: "bg-pink-500",
    },
    SeedProject {
        name: "Orbit Mobile",
        description: "React Native mobile app",
        color: "bg-sky-500",
    },
    SeedProject {
        name: "Vanguard API",
        description: "Public facing API gateway",
        color: "bg-emerald-500",
    },
];

const TAGS: &[&str] = &[
    "bug",
    "feature-request",
    "deployment",
    "database",
    "frontend",
    "performance",
];

const POSTS: &[SeedPost] = &[
    SeedPost {
        title: "How do I handle optimistic updates in Nebula UI DataGrid?",
        content: "I'm trying to implement row deletion but the UI flickers before the API responds. I'm using React Query for mutation but the cache update seems delayed. Here is my code snippet:\n\n```tsx\nconst mutation = useMutation({\n  onMutate: async (newTodo) => {\n    await queryClient.cancelQueries({ queryKey: ['todos'] })\n    // ...\n  }\n})\n```",
        author: Some(0),
        project: 1,
        age_minutes: 120,
        votes: 12,
        views: 340,
        tags: &[4, 5],
    },
    SeedPost {
        title: "Database connection pool exhaustion on production",
        content: "We are seeing 500 errors related to max connections during peak hours. Is there a leak in the new worker service?",
        author: None,
        project: 0,
        age_minutes: 24 * 60,
        votes: 45,
        views: 1200,
        tags: &[0, 3, 5],
    },
    SeedPost {
        title: "Best practices for versioning Vanguard API endpoints?",
        content: "Should we use URL versioning or header versioning for the v2 release?",
        author: Some(1),
        project: 3,
        age_minutes: 2 * 24 * 60,
        votes: 8,
        views: 150,
        tags: &[1],
    },
    SeedPost {
        title: "Orbit Mobile crash on Android 14",
        content: "The app crashes immediately on launch on Pixel 8 devices running Android 14 beta.",
        author: Some(0),
        project: 2,
        age_minutes: 3 * 24 * 60,
        votes: 23,
        views: 560,
        tags: &[0, 4],
    },
];

const ANSWERS: &[SeedAnswer] = &[
    SeedAnswer {
        post: 0,
        content: "You need to ensure you are returning the previous context in `onMutate` and using it in `onError` to rollback. Also, check if `queryClient.setQueryData` is actually updating the cache synchronously.",
        author: 1,
        age_minutes: 60,
        votes: 5,
        is_accepted: true,
    },
    SeedAnswer {
        post: 0,
        content: "Have you tried disabling the refetchOnMount? Sometimes that causes a flicker if the invalidation happens too quickly.",
        author: 2,
        age_minutes: 30,
        votes: 2,
        is_accepted: false,
    },
    SeedAnswer {
        post: 1,
        content: "I checked the logs, it seems the `ReportingWorker` isn't releasing connections properly after the nightly batch job. I'll push a hotfix.",
        author: 0,
        age_minutes: 12 * 60,
        votes: 10,
        is_accepted: false,
    },
];

/// Inserts the demo data if no users exist yet. Returns whether anything was
/// written.
pub fn seed_if_empty(pool: &DbPool) -> anyhow::Result<bool> {
    let mut conn = pool.get()?;

    // Take the write lock before counting so concurrent starts seed once
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let user_count: i64 = tx.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if user_count > 0 {
        tracing::debug!("Skipping seed data, {} users present", user_count);
        return Ok(false);
    }

    insert_all(&tx)?;
    tx.commit()?;

    tracing::info!(
        users = USERS.len(),
        projects = PROJECTS.len(),
        tags = TAGS.len(),
        posts = POSTS.len(),
        answers = ANSWERS.len(),
        "Inserted seed data"
    );
    Ok(true)
}

/// Each batch is written before the next, since later batches point at the
/// ids the earlier ones were given.
fn insert_all(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    let now = Utc::now();

    let mut user_ids = Vec::with_capacity(USERS.len());
    for user in USERS {
        tx.execute(
            "INSERT INTO users (name, email, avatar, role) VALUES (?1, ?2, ?3, ?4)",
            params![user.name, user.email, user.avatar, user.role],
        )?;
        user_ids.push(tx.last_insert_rowid());
    }

    let mut project_ids = Vec::with_capacity(PROJECTS.len());
    for project in PROJECTS {
        tx.execute(
            "INSERT INTO projects (name, description, color) VALUES (?1, ?2, ?3)",
            params![project.name, project.description, project.color],
        )?;
        project_ids.push(tx.last_insert_rowid());
    }

    let mut tag_ids = Vec::with_capacity(TAGS.len());
    for name in TAGS {
        tx.execute("INSERT INTO tags (name) VALUES (?1)", params![name])?;
        tag_ids.push(tx.last_insert_rowid());
    }

    let mut post_ids = Vec::with_capacity(POSTS.len());
    for post in POSTS {
        let author_id = post.author.map(|i| user_ids[i]);
        tx.execute(
            "INSERT INTO posts (title, content, author_id, project_id, created_at, votes, views, is_anonymous)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                post.title,
                post.content,
                author_id,
                project_ids[post.project],
                now - Duration::minutes(post.age_minutes),
                post.votes,
                post.views,
                author_id.is_none()
            ],
        )?;
        post_ids.push(tx.last_insert_rowid());
    }

    for (post, post_id) in POSTS.iter().zip(&post_ids) {
        for tag in post.tags {
            tx.execute(
                "INSERT INTO post_tags (post_id, tag_id) VALUES (?1, ?2)",
                params![post_id, tag_ids[*tag]],
            )?;
        }
    }

    for answer in ANSWERS {
        tx.execute(
            "INSERT INTO answers (post_id, content, author_id, created_at, votes, is_accepted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                post_ids[answer.post],
                answer.content,
                user_ids[answer.author],
                now - Duration::minutes(answer.age_minutes),
                answer.votes,
                answer.is_accepted
            ],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{posts, test_pool};

    fn count(pool: &DbPool, table: &str) -> i64 {
        let conn = pool.get().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn concurrent_starts_seed_once() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("devflow.db");
        let first = crate::db::create_pool(&path).unwrap();
        crate::db::run_migrations(&first).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = crate::db::create_pool(&path).unwrap();
                std::thread::spawn(move || seed_if_empty(&pool).unwrap())
            })
            .collect();
        let seeded = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|wrote| *wrote)
            .count();

        assert_eq!(seeded, 1);
        assert_eq!(count(&first, "users"), 3);
        assert_eq!(count(&first, "posts"), 4);
    }

    #[test]
    fn seeds_empty_database() {
        let pool = test_pool();
        assert!(seed_if_empty(&pool).unwrap());

        assert_eq!(count(&pool, "users"), 3);
        assert_eq!(count(&pool, "projects"), 4);
        assert_eq!(count(&pool, "tags"), 6);
        assert_eq!(count(&pool, "posts"), 4);
        assert_eq!(count(&pool, "post_tags"), 8);
        assert_eq!(count(&pool, "answers"), 3);
    }

    #[test]
    fn seeding_runs_once() {
        let pool = test_pool();
        assert!(seed_if_empty(&pool).unwrap());
        assert!(!seed_if_empty(&pool).unwrap());
        assert_eq!(count(&pool, "posts"), 4);
    }

    #[test]
    fn skips_when_users_exist() {
        let pool = test_pool();
        {
            let conn = pool.get().unwrap();
            conn.execute(
                "INSERT INTO users (name, email, role) VALUES ('Ann', 'ann@x', 'user')",
                [],
            )
            .unwrap();
        }
        assert!(!seed_if_empty(&pool).unwrap());
        assert_eq!(count(&pool, "projects"), 0);
    }

    #[test]
    fn anonymous_seed_post_has_no_author() {
        let pool = test_pool();
        seed_if_empty(&pool).unwrap();

        let conn = pool.get().unwrap();
        let all = posts::list(&conn, None).unwrap();
        let anonymous: Vec<_> = all.iter().filter(|p| p.is_anonymous).collect();
        assert_eq!(anonymous.len(), 1);
        assert_eq!(anonymous[0].author_id, None);
        assert_eq!(anonymous[0].tags.len(), 3);
    }

    #[test]
    fn seed_keeps_one_accepted_answer() {
        let pool = test_pool();
        seed_if_empty(&pool).unwrap();

        let accepted: i64 = {
            let conn = pool.get().unwrap();
            conn.query_row(
                "SELECT COUNT(*) FROM answers WHERE is_accepted = 1",
                [],
                |row| row.get(0),
            )
            .unwrap()
        };
        assert_eq!(accepted, 1);
    }
}
