//! Application store backed by SQLite.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::codec::{decode_list, encode_list};
use crate::errors::AppError;
use crate::models::{Application, NewApplication};

/// Append-only storage for course applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Persist a validated submission and return its generated id.
    async fn insert(&self, application: &NewApplication) -> Result<i64, AppError>;

    /// All stored applications, newest first.
    async fn list_all(&self) -> Result<Vec<Application>, AppError>;
}

/// SQLite implementation of [`ApplicationStore`].
#[derive(Clone)]
pub struct SqliteApplicationStore {
    pool: SqlitePool,
}

impl SqliteApplicationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for SqliteApplicationStore {
    async fn insert(&self, application: &NewApplication) -> Result<i64, AppError> {
        let result = sqlx::query(
            "INSERT INTO applications (name, email, phone, experience, goals, platforms, timezone, preferred_times, consent) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1)"
        )
        .bind(&application.name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.experience)
        .bind(&application.goals)
        .bind(encode_list(&application.platforms))
        .bind(&application.timezone)
        .bind(encode_list(&application.preferred_times))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list_all(&self) -> Result<Vec<Application>, AppError> {
        // created_at is declared DATETIME, so it is cast to read back as plain text.
        // Timestamps have one-second resolution; id breaks ties.
        let rows = sqlx::query(
            "SELECT id, name, email, phone, experience, goals, platforms, timezone, preferred_times, consent, CAST(created_at AS TEXT) AS created_at FROM applications ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(application_from_row).collect())
    }
}

fn application_from_row(row: &sqlx::sqlite::SqliteRow) -> Application {
    let consent: Option<i64> = row.get("consent");
    let platforms: Option<String> = row.get("platforms");
    let preferred_times: Option<String> = row.get("preferred_times");
    let text = |column: &str| -> String {
        let value: Option<String> = row.get(column);
        value.unwrap_or_default()
    };

    Application {
        id: row.get("id"),
        name: text("name"),
        email: text("email"),
        phone: text("phone"),
        experience: text("experience"),
        goals: text("goals"),
        platforms: decode_list(platforms.as_deref()),
        timezone: text("timezone"),
        preferred_times: decode_list(preferred_times.as_deref()),
        consent: consent.unwrap_or(0) != 0,
        created_at: text("created_at"),
    }
}
