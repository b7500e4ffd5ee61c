use thiserror::Error;

/// Failures of the answer-key storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} should be set")]
    Missing(&'static str),

    #[error("{name} can't be parsed: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Malformed `id:answers` input from the admin add-flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestDataError {
    #[error("expected format `test_id:answers`")]
    MissingSeparator,

    #[error("test id is empty")]
    EmptyId,

    #[error("answers are empty")]
    EmptyAnswers,
}
