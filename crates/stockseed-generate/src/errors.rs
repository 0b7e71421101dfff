use thiserror::Error;

/// Errors emitted by the generators.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("could not issue a unique {what} after {attempts} attempts")]
    UniquenessExhausted { what: &'static str, attempts: u32 },
}
