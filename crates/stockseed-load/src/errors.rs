use thiserror::Error;

use stockseed_generate::GenerationError;

/// Errors raised while seeding a store.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("constraint violation on {table}: {message}")]
    Constraint { table: &'static str, message: String },
}
