//! CLI subcommand implementations.

pub mod list;
pub mod migrate;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use listmate_server::db::{self, RepositoryError};
use listmate_server::services::AuthError;

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Account error.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] listmate_core::EmailError),

    /// Invalid list ID.
    #[error("Invalid list ID '{0}': expected a UUID")]
    InvalidListId(String),

    /// No such user.
    #[error("No user with email: {0}")]
    UserNotFound(String),

    /// No such list.
    #[error("No shopping list with ID: {0}")]
    ListNotFound(String),
}

/// Connect using `LISTMATE_DATABASE_URL`, falling back to `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("LISTMATE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("LISTMATE_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&SecretString::from(database_url)).await?)
}
