use std::{future::Future, str::FromStr, time::Duration};

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::instrument;

use super::answer_key::{normalize_answers, normalize_test_id, AnswerKeyRecord};
use crate::error::StoreError;

pub struct Connection {
    pool: SqlitePool,
}

impl Connection {
    pub async fn connect(
        connection_string: &str,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(connection_string)?.create_if_missing(true);
        // an in-memory database lives only as long as its connection
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .idle_timeout(Option::<Duration>::None)
            .max_lifetime(Option::<Duration>::None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        let connection = Self::connect("sqlite::memory:", 1).await?;
        connection.run_migrations().await?;
        Ok(connection)
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        tracing::debug!("Running migrations");
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}

pub trait StoreAnswerKey {
    fn put(&self, test_id: &str, answers: &str)
        -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Writes the key only when the id is free. Returns whether it was written.
    fn insert_if_absent(
        &self,
        test_id: &str,
        answers: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

pub trait RetreiveAnswerKey {
    /// Storage faults are logged and read as `None` (or an empty list).
    fn get(&self, test_id: &str) -> impl Future<Output = Option<String>> + Send;

    fn list_all(&self) -> impl Future<Output = Vec<AnswerKeyRecord>> + Send;
}

pub trait DeleteAnswerKey {
    fn delete(&self, test_id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

impl StoreAnswerKey for Connection {
    #[instrument(level = "debug", skip(self))]
    async fn put(&self, test_id: &str, answers: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO tests (test_id, answers, created_at) VALUES (?, ?, ?) \
             ON CONFLICT(test_id) DO UPDATE SET answers = excluded.answers, created_at = excluded.created_at",
        )
        .bind(normalize_test_id(test_id))
        .bind(normalize_answers(answers))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .inspect_err(|e| tracing::error!("Failed to store test '{}': {}", test_id, e))?;

        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn insert_if_absent(&self, test_id: &str, answers: &str) -> Result<bool, StoreError> {
        let inserted = sqlx::query(
            "INSERT INTO tests (test_id, answers, created_at) VALUES (?, ?, ?) \
             ON CONFLICT(test_id) DO NOTHING",
        )
        .bind(normalize_test_id(test_id))
        .bind(normalize_answers(answers))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .inspect_err(|e| tracing::error!("Failed to insert test '{}': {}", test_id, e))?
        .rows_affected();

        Ok(inserted > 0)
    }
}

impl RetreiveAnswerKey for Connection {
    #[instrument(level = "debug", skip(self))]
    async fn get(&self, test_id: &str) -> Option<String> {
        sqlx::query_scalar::<_, String>("SELECT answers FROM tests WHERE test_id = ?")
            .bind(normalize_test_id(test_id))
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Failed to retreive test '{}': {}", test_id, e);
                None
            })
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_all(&self) -> Vec<AnswerKeyRecord> {
        sqlx::query_as::<_, AnswerKeyRecord>(
            "SELECT test_id, answers, created_at FROM tests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to retreive tests: {}", e);
            Vec::new()
        })
    }
}

impl DeleteAnswerKey for Connection {
    #[instrument(level = "debug", skip(self))]
    async fn delete(&self, test_id: &str) -> Result<bool, StoreError> {
        let deleted = sqlx::query("DELETE FROM tests WHERE test_id = ?")
            .bind(normalize_test_id(test_id))
            .execute(&self.pool)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete test '{}': {}", test_id, e))?
            .rows_affected();

        Ok(deleted > 0)
    }
}
