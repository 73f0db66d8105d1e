//! Persistence for scored submissions.
//!
//! The `user_data` table is append-only: rows are inserted once per successful
//! analysis and never updated or deleted.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::models::submission::{NewSubmission, Submission};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_EMAIL_CHARS: usize = 100;
pub const MAX_CONTACT_CHARS: usize = 20;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS user_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT,
        Email TEXT,
        Contact TEXT,
        Resume_score INTEGER,
        Date TEXT
    )
"#;

/// Owns the submissions table. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct SubmissionStore {
    pool: SqlitePool,
}

impl SubmissionStore {
    /// Wraps a pool and makes sure the table exists. Safe to call repeatedly.
    pub async fn open(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        debug!("user_data table ready");
        Ok(Self { pool })
    }

    /// Inserts a submission and returns its id. Over-long values are cut
    /// silently, never rejected.
    pub async fn insert(&self, submission: &NewSubmission) -> Result<i64, sqlx::Error> {
        let name = truncate_chars(submission.name.as_deref(), MAX_NAME_CHARS);
        let email = truncate_chars(submission.email.as_deref(), MAX_EMAIL_CHARS);
        let contact = truncate_chars(submission.contact.as_deref(), MAX_CONTACT_CHARS);

        let result = sqlx::query(
            "INSERT INTO user_data (Name, Email, Contact, Resume_score, Date) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&name)
        .bind(&email)
        .bind(&contact)
        .bind(i64::from(submission.score))
        .bind(submission.date)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!("Stored submission {id} (score {})", submission.score);
        Ok(id)
    }

    /// All submissions in id order.
    pub async fn fetch_all(&self) -> Result<Vec<Submission>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT id,
                   COALESCE(Name, '') AS name,
                   COALESCE(Email, '') AS email,
                   COALESCE(Contact, '') AS contact,
                   COALESCE(Resume_score, 0) AS score,
                   Date AS date
            FROM user_data
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

fn truncate_chars(value: Option<&str>, max: usize) -> String {
    value
        .map(|v| v.chars().take(max).collect())
        .unwrap_or_default()
}
